//! Meeting cost model

mod money;

pub use money::{format_currency, round_to_cents};

/// Milliseconds in one hour
pub const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Cost of `attendee_count` people at `hourly_rate` each for `elapsed_ms`.
///
/// Inputs are validated upstream; negative rates are a caller bug.
pub fn cost(elapsed_ms: u64, attendee_count: usize, hourly_rate: f64) -> f64 {
    attendee_count as f64 * hourly_rate * (elapsed_ms as f64 / MILLIS_PER_HOUR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_hour_single_attendee() {
        assert_eq!(cost(3_600_000, 1, 50.0), 50.0);
    }

    #[test]
    fn scales_with_attendees_and_time() {
        let c = cost(1_800_000, 4, 100.0);
        assert!((c - 200.0).abs() < 1e-9);
    }

    #[test]
    fn matches_formula_for_odd_values() {
        for ms in [0u64, 1, 999, 61_234, 7_654_321] {
            let expected = 3.0 * 42.5 * ms as f64 / 3_600_000.0;
            assert!((cost(ms, 3, 42.5) - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn zero_attendees_costs_nothing() {
        assert_eq!(cost(3_600_000, 0, 120.0), 0.0);
        assert_eq!(cost(0, 0, 0.0), 0.0);
    }

    #[test]
    fn zero_elapsed_costs_nothing() {
        assert_eq!(cost(0, 10, 80.0), 0.0);
    }
}

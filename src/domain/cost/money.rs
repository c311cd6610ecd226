//! Currency formatting

/// Round an amount to whole cents.
///
/// The amount is scaled to cents in `f64` and rounded half-to-even, so
/// `0.125` becomes `0.12` and `0.135` becomes `0.14`. Values whose binary
/// representation sits below the midpoint (such as `12.005`) round down.
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round_ties_even() / 100.0
}

/// Format an amount as US dollars, e.g. `$1,234.57` or `-$3.10`.
///
/// Uses the same rounding rule as [`round_to_cents`].
pub fn format_currency(amount: f64) -> String {
    let cents = (amount * 100.0).round_ties_even();
    let negative = cents < 0.0;
    let cents = cents.abs() as u64;

    let dollars = group_thousands(cents / 100);
    let sign = if negative { "-" } else { "" };

    format!("{}${}.{:02}", sign, dollars, cents % 100)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

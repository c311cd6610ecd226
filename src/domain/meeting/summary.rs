//! Archive-wide totals and cost trend

use super::record::{MeetingId, MeetingRecord};

/// One meeting on the cost trend line
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub id: MeetingId,
    pub name: String,
    pub ended_at: i64,
    pub duration_milliseconds: u64,
    pub total_cost: f64,
}

/// Aggregate view over archived meetings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArchiveSummary {
    pub meeting_count: usize,
    pub total_cost: f64,
    pub total_duration_ms: u64,
    pub average_cost: f64,
    pub average_duration_ms: u64,
    pub most_expensive: Option<MeetingId>,
    /// Oldest first
    pub trend: Vec<TrendPoint>,
}

impl ArchiveSummary {
    pub fn from_records(records: &[MeetingRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let meeting_count = records.len();
        let total_cost: f64 = records.iter().map(|r| r.total_cost).sum();
        let total_duration_ms: u64 = records.iter().map(|r| r.duration_milliseconds).sum();
        let most_expensive = records
            .iter()
            .max_by(|a, b| a.total_cost.total_cmp(&b.total_cost))
            .map(|r| r.id);

        let mut trend: Vec<TrendPoint> = records
            .iter()
            .map(|r| TrendPoint {
                id: r.id,
                name: r.name.clone(),
                ended_at: r.ended_at,
                duration_milliseconds: r.duration_milliseconds,
                total_cost: r.total_cost,
            })
            .collect();
        trend.sort_by_key(|p| (p.ended_at, p.id));

        Self {
            meeting_count,
            total_cost,
            total_duration_ms,
            average_cost: total_cost / meeting_count as f64,
            average_duration_ms: total_duration_ms / meeting_count as u64,
            most_expensive,
            trend,
        }
    }
}

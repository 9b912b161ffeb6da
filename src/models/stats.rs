use serde::{Deserialize, Serialize};

/// Aggregate hours computed by the backend (`GET /sessions/stats`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_hours_worked: f64,
    pub contracted_hours: f64,
}

impl Stats {
    /// Share of the contracted quota already worked, always within `[0, 100]`.
    pub fn progress_percentage(&self) -> f64 {
        let worked = self.total_hours_worked;
        let contracted = self.contracted_hours;

        if !contracted.is_finite() || contracted <= 0.0 {
            return if worked > 0.0 { 100.0 } else { 0.0 };
        }

        let ratio = worked / contracted;
        if ratio.is_nan() || ratio <= 0.0 {
            0.0
        } else {
            ratio.min(1.0) * 100.0
        }
    }

    pub fn remaining_hours(&self) -> f64 {
        (self.contracted_hours - self.total_hours_worked).max(0.0)
    }
}

/// Progress of an optional snapshot. No stats yet means nothing to show.
pub fn progress_percentage(stats: Option<&Stats>) -> f64 {
    stats.map(Stats::progress_percentage).unwrap_or(0.0)
}

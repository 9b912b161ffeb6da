//! Calendar helpers: day labels and grouping of the session history by day.

use crate::models::WorkSession;
use chrono::{DateTime, NaiveDate, TimeZone};

/// A bucket of completed sessions that started on the same calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub label: String,
    pub sessions: Vec<WorkSession>,
}

impl DayGroup {
    pub fn total_minutes(&self) -> i64 {
        self.sessions
            .iter()
            .filter_map(WorkSession::duration_minutes)
            .sum()
    }
}

/// "Today", "Yesterday", or e.g. "Monday, Jan 1".
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(date) {
        "Yesterday".to_string()
    } else {
        date.format("%A, %b %-d").to_string()
    }
}

/// Bucket completed sessions by the calendar day of their start, in the time
/// zone of `now`.
///
/// Open sessions are left out. Buckets appear in the order their first
/// session is met while scanning `sessions`; sessions keep their input order
/// inside a bucket. No sorting happens here: the backend decides the order.
pub fn group_by_day<Tz: TimeZone>(sessions: &[WorkSession], now: &DateTime<Tz>) -> Vec<DayGroup> {
    let tz = now.timezone();
    let today = now.date_naive();
    let mut groups: Vec<DayGroup> = Vec::new();

    for session in sessions.iter().filter(|s| s.is_completed()) {
        let date = session.start_time.with_timezone(&tz).date_naive();

        match groups.iter_mut().find(|g| g.date == date) {
            Some(group) => group.sessions.push(session.clone()),
            None => groups.push(DayGroup {
                date,
                label: day_label(date, today),
                sessions: vec![session.clone()],
            }),
        }
    }

    groups
}

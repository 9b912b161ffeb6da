//! Formatting utilities used for CLI outputs.

use crate::errors::{AppError, AppResult};
use crate::models::WorkSession;
use chrono::TimeZone;
use std::fmt::Display;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

/// Seconds → `HH:MM:SS`. Hours are not capped: 100+ hours just get wider.
pub fn format_clock(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Inverse of [`format_clock`].
pub fn parse_clock(s: &str) -> AppResult<u64> {
    let invalid = || AppError::InvalidClock(s.to_string());

    let parts: Vec<&str> = s.split(':').collect();
    let [h, m, sec] = parts.as_slice() else {
        return Err(invalid());
    };

    if h.len() < 2 || m.len() != 2 || sec.len() != 2 {
        return Err(invalid());
    }

    let hours: u64 = h.parse().map_err(|_| invalid())?;
    let minutes: u64 = m.parse().map_err(|_| invalid())?;
    let seconds: u64 = sec.parse().map_err(|_| invalid())?;

    if minutes > 59 || seconds > 59 {
        return Err(invalid());
    }

    hours
        .checked_mul(3600)
        .and_then(|h| h.checked_add(minutes * 60 + seconds))
        .ok_or_else(invalid)
}

/// `"1h 30m"`, `"45m"`, or `"--:--"` while the session is still open.
pub fn format_duration(session: &WorkSession) -> String {
    match session.duration_minutes() {
        None => "--:--".to_string(),
        Some(total) => {
            let hours = total / 60;
            let minutes = total % 60;
            if hours > 0 {
                format!("{}h {}m", hours, minutes)
            } else {
                format!("{}m", minutes)
            }
        }
    }
}

/// `"09:00 - 10:30"` in `tz`, or `"09:00 - now"` for an open session.
pub fn format_time_range<Tz>(session: &WorkSession, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let start = session.start_time.with_timezone(tz).format("%H:%M");
    match session.end_time {
        Some(end) => format!("{} - {}", start, end.with_timezone(tz).format("%H:%M")),
        None => format!("{} - now", start),
    }
}

pub fn format_hours(hours: f64) -> String {
    format!("{:.1}h", hours)
}

pub fn format_percentage(pct: f64) -> String {
    format!("{:.1}%", pct)
}

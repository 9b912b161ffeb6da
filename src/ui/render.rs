//! Text rendering of the dashboards.
//!
//! Everything here returns a `String` so the views can be checked without a
//! terminal. Colors are plain ANSI escapes.

use crate::core::admin::AdminPanel;
use crate::core::client_view::{ClientView, PresenceStatus};
use crate::core::dashboard::DashboardState;
use crate::models::WorkSession;
use crate::models::stats::progress_percentage;
use crate::utils::colors::{CYAN, GREEN, GREY, RED, RESET, color_for_progress, colorize_optional};
use crate::utils::date::DayGroup;
use crate::utils::formatting::{
    bold, format_duration, format_hours, format_percentage, format_time_range, pad_right,
};
use crate::utils::table::{Column, Table};
use crate::utils::time::to_local;
use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;
use std::fmt::Write;

const BAR_WIDTH: usize = 30;
const RECENT_SESSIONS: usize = 3;

/// `[██████░░░░░░]` filled proportionally to `pct` (0-100).
pub fn progress_bar(pct: f64, width: usize) -> String {
    let pct = pct.clamp(0.0, 100.0);
    let filled = ((pct / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!(
        "[{}{}{}{}{}]",
        color_for_progress(pct),
        "█".repeat(filled),
        GREY,
        "░".repeat(width - filled),
        RESET
    )
}

fn hours_line(worked: f64, contracted: f64, pct: f64) -> String {
    format!(
        "{} / {} ({})",
        format_hours(worked),
        format_hours(contracted),
        format_percentage(pct)
    )
}

/// Single line redrawn every tick by `status --watch`.
pub fn clock_line(panel: &AdminPanel, now: DateTime<Utc>) -> String {
    match panel.active_session() {
        Some(session) => format!("⏱  {CYAN}{}{RESET}  {}", panel.clock(now), session.description),
        None => format!("{GREY}⏱  {} idle{RESET}", panel.clock(now)),
    }
}

pub fn render_admin(panel: &AdminPanel, state: &DashboardState, now: DateTime<Utc>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", bold("Admin panel"));
    if let Some(err) = panel.error().or(state.error.as_deref()) {
        let _ = writeln!(out, "{RED}! {err}{RESET}");
    }

    match panel.active_session() {
        Some(session) => {
            let _ = writeln!(out, "Status:   {GREEN}● running{RESET}");
            let _ = writeln!(out, "Task:     {}", session.description);
            let _ = writeln!(out, "Clock:    {CYAN}{}{RESET}", panel.clock(now));
            if let Some(label) = panel.started_at_label() {
                let _ = writeln!(out, "          {GREY}{label}{RESET}");
            }
        }
        None => {
            let _ = writeln!(out, "Status:   {GREY}○ idle{RESET}");
            let _ = writeln!(out, "Start a timer with `rtracker start <description>`");
        }
    }

    let _ = writeln!(out);
    let pct = progress_percentage(state.stats.as_ref());
    if let Some(stats) = &state.stats {
        let _ = writeln!(
            out,
            "Worked:   {}",
            hours_line(stats.total_hours_worked, stats.contracted_hours, pct)
        );
        let _ = writeln!(out, "          {}", progress_bar(pct, BAR_WIDTH));
    }
    let _ = writeln!(out, "Completed sessions: {}", state.completed().count());

    let recent = state.recent_completed(RECENT_SESSIONS);
    if !recent.is_empty() {
        let _ = writeln!(out, "\nRecent:");
        for session in recent {
            let _ = writeln!(
                out,
                "  {}  {}  {}",
                to_local(session.start_time).format("%Y-%m-%d"),
                pad_right(&session.description, 32),
                colorize_optional(&format_duration(session))
            );
        }
    } else {
        let _ = writeln!(out, "{GREY}No completed sessions yet{RESET}");
    }

    out
}

pub fn render_client<Tz>(view: &mut ClientView, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();

    let _ = writeln!(out, "{}", bold("Retainer dashboard"));
    match view.status() {
        PresenceStatus::Online => {
            let task = view
                .active_session()
                .map(|s| s.description.clone())
                .unwrap_or_default();
            let _ = writeln!(out, "Status:    {GREEN}● {}{RESET}  {}", PresenceStatus::Online.label(), task);
        }
        PresenceStatus::Offline => {
            let _ = writeln!(out, "Status:    {GREY}○ {}{RESET}", PresenceStatus::Offline.label());
        }
    }

    let pct = view.progress_percentage();
    let _ = writeln!(
        out,
        "Hours:     {}",
        hours_line(view.hours_worked(), view.contracted_hours(), pct)
    );
    let _ = writeln!(out, "           {}", progress_bar(pct, BAR_WIDTH));
    let _ = writeln!(out, "Remaining: {}", format_hours(view.remaining_hours()));
    let _ = writeln!(out, "Sessions:  {}", view.completed_count());
    let _ = writeln!(out);

    let tz = now.timezone();
    let groups = view.groups(now);
    out.push_str(&render_history(groups, &tz));
    out
}

pub fn render_history<Tz>(groups: &[DayGroup], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if groups.is_empty() {
        return format!("{GREY}No sessions recorded yet{RESET}\n");
    }

    let mut out = String::new();
    for group in groups {
        let _ = writeln!(
            out,
            "{}  {GREY}{}{RESET}",
            bold(&group.label),
            format_minutes_total(group.total_minutes())
        );

        let mut table = Table::new(vec![
            Column::new("Task", 36),
            Column::new("Time", 14),
            Column::new("Duration", 8),
        ]);
        for session in &group.sessions {
            table.add_row(session_row(session, tz));
        }
        out.push_str(&table.render());
        out.push('\n');
    }
    out
}

fn session_row<Tz>(session: &WorkSession, tz: &Tz) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    vec![
        session.description.clone(),
        format_time_range(session, tz),
        format_duration(session),
    ]
}

fn format_minutes_total(total: i64) -> String {
    let hours = total / 60;
    let minutes = total % 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

//! Read-only client view: progress against the contracted hours and the
//! session history grouped by day.
//!
//! Inputs come from the page. The progress percentage and the day groups are
//! cached and only recomputed when the inputs they depend on change.

use crate::models::stats::progress_percentage;
use crate::models::{Stats, WorkSession};
use crate::utils::date::{DayGroup, group_by_day};
use chrono::{DateTime, NaiveDate, TimeZone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceStatus {
    Online,
    Offline,
}

impl PresenceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PresenceStatus::Online => "online",
            PresenceStatus::Offline => "offline",
        }
    }
}

#[derive(Debug, Default)]
pub struct ClientView {
    sessions: Vec<WorkSession>,
    active: Option<WorkSession>,
    stats: Option<Stats>,

    progress: Option<f64>,
    groups: Option<(NaiveDate, Vec<DayGroup>)>,
    grouping_runs: usize,
}

impl ClientView {
    pub fn new(
        sessions: Vec<WorkSession>,
        active: Option<WorkSession>,
        stats: Option<Stats>,
    ) -> Self {
        Self {
            sessions,
            active,
            stats,
            ..Self::default()
        }
    }

    /// Feed a new snapshot. Caches survive when their inputs are unchanged.
    pub fn update(
        &mut self,
        sessions: &[WorkSession],
        active: Option<&WorkSession>,
        stats: Option<&Stats>,
    ) {
        if self.sessions != sessions {
            self.sessions = sessions.to_vec();
            self.groups = None;
        }
        if self.stats.as_ref() != stats {
            self.stats = stats.copied();
            self.progress = None;
        }
        self.active = active.cloned();
    }

    pub fn sessions(&self) -> &[WorkSession] {
        &self.sessions
    }

    pub fn active_session(&self) -> Option<&WorkSession> {
        self.active.as_ref()
    }

    pub fn stats(&self) -> Option<&Stats> {
        self.stats.as_ref()
    }

    pub fn status(&self) -> PresenceStatus {
        if self.active.is_some() {
            PresenceStatus::Online
        } else {
            PresenceStatus::Offline
        }
    }

    pub fn progress_percentage(&mut self) -> f64 {
        *self
            .progress
            .get_or_insert_with(|| progress_percentage(self.stats.as_ref()))
    }

    /// Completed sessions grouped by day, relative to `now`.
    pub fn groups<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> &[DayGroup] {
        let today = now.date_naive();
        let stale = !matches!(&self.groups, Some((day, _)) if *day == today);

        if stale {
            self.grouping_runs += 1;
            self.groups = Some((today, group_by_day(&self.sessions, now)));
        }

        match &self.groups {
            Some((_, groups)) => groups.as_slice(),
            None => &[],
        }
    }

    /// How many times the grouping actually ran.
    pub fn grouping_runs(&self) -> usize {
        self.grouping_runs
    }

    pub fn hours_worked(&self) -> f64 {
        self.stats.map(|s| s.total_hours_worked).unwrap_or(0.0)
    }

    pub fn contracted_hours(&self) -> f64 {
        self.stats.map(|s| s.contracted_hours).unwrap_or(0.0)
    }

    pub fn remaining_hours(&self) -> f64 {
        self.stats.map(|s| s.remaining_hours()).unwrap_or(0.0)
    }

    pub fn completed_count(&self) -> usize {
        self.sessions.iter().filter(|s| s.is_completed()).count()
    }
}

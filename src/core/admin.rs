//! Admin panel: the start/stop state machine behind the work timer.
//!
//! ```text
//!   Idle --start(description) ok--> Active(session)
//!   Active --stop() ok-----------> Idle
//! ```
//! A failed call leaves the state untouched and records an inline error the
//! user can dismiss before retrying. Both calls borrow the panel mutably for
//! the whole round trip, which is what keeps them single-flight.

use crate::api::SessionGateway;
use crate::errors::{AppError, AppResult};
use crate::models::WorkSession;
use crate::utils::formatting::format_clock;
use crate::utils::time::{elapsed_seconds, to_local};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

pub const EMPTY_DESCRIPTION: &str = "Please enter a task description";
pub const START_FAILED: &str = "Failed to start session. Please try again.";
pub const STOP_FAILED: &str = "Failed to stop session. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelState {
    Idle,
    Active(WorkSession),
}

#[derive(Debug, Clone)]
pub struct AdminPanel {
    state: PanelState,
    error: Option<String>,
}

impl AdminPanel {
    pub fn new(active: Option<WorkSession>) -> Self {
        Self {
            state: Self::state_for(active),
            error: None,
        }
    }

    fn state_for(active: Option<WorkSession>) -> PanelState {
        match active {
            Some(session) if session.is_active() => PanelState::Active(session),
            _ => PanelState::Idle,
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn active_session(&self) -> Option<&WorkSession> {
        match &self.state {
            PanelState::Active(session) => Some(session),
            PanelState::Idle => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, PanelState::Active(_))
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Adopt the active session from a fresh page snapshot.
    pub fn sync(&mut self, active: Option<WorkSession>) {
        self.state = Self::state_for(active);
    }

    /// Seconds on the clock at `now`; zero while idle.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> u64 {
        self.active_session()
            .map(|s| elapsed_seconds(s.start_time, now))
            .unwrap_or(0)
    }

    pub fn clock(&self, now: DateTime<Utc>) -> String {
        format_clock(self.elapsed_seconds(now))
    }

    pub fn started_at_label(&self) -> Option<String> {
        self.active_session()
            .map(|s| format!("Started at {}", to_local(s.start_time).format("%H:%M:%S")))
    }

    /// Trimmed description, or a validation error for blank input.
    pub fn validate_description(description: &str) -> AppResult<&str> {
        let trimmed = description.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(EMPTY_DESCRIPTION.to_string()));
        }
        Ok(trimmed)
    }

    pub async fn start<G>(&mut self, gateway: &G, description: &str) -> AppResult<WorkSession>
    where
        G: SessionGateway + ?Sized,
    {
        if let PanelState::Active(current) = &self.state {
            return Err(AppError::InvalidState(format!(
                "A session is already running (\"{}\"). Stop it before starting a new one.",
                current.description
            )));
        }

        let description = match Self::validate_description(description) {
            Ok(d) => d,
            Err(e) => {
                self.error = Some(EMPTY_DESCRIPTION.to_string());
                return Err(e);
            }
        };

        self.error = None;
        match gateway.start_session(description).await {
            Ok(session) => {
                info!(id = session.id, description = %session.description, "session started");
                self.state = PanelState::Active(session.clone());
                Ok(session)
            }
            Err(e) => {
                warn!(error = %e, "start session failed");
                self.record_failure(&e, START_FAILED);
                Err(e)
            }
        }
    }

    pub async fn stop<G>(&mut self, gateway: &G) -> AppResult<WorkSession>
    where
        G: SessionGateway + ?Sized,
    {
        if !self.is_active() {
            return Err(AppError::InvalidState(
                "No active session to stop.".to_string(),
            ));
        }

        self.error = None;
        match gateway.stop_session().await {
            Ok(session) => {
                info!(id = session.id, "session stopped");
                self.state = PanelState::Idle;
                Ok(session)
            }
            Err(e) => {
                warn!(error = %e, "stop session failed");
                self.record_failure(&e, STOP_FAILED);
                Err(e)
            }
        }
    }

    // 401 is handled globally (credential wiped, back to login): no inline message.
    fn record_failure(&mut self, error: &AppError, message: &str) {
        if !error.is_unauthorized() {
            self.error = Some(message.to_string());
        }
    }
}

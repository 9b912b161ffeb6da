//! Page-level state shared by the admin and client dashboards.
//!
//! A page owns one snapshot of the backend (active session, history, stats),
//! replaces it wholesale on refresh, and patches it from the responses of
//! start/stop. Results of async work are only applied while the page is
//! still mounted.

use super::admin::AdminPanel;
use super::ticker::Mount;
use crate::api::SessionGateway;
use crate::errors::{AppError, AppResult};
use crate::models::{Stats, WorkSession};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub const LOAD_FAILED: &str = "Failed to load data. Please try again.";

/// Everything a dashboard shows, fetched in one go.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub active: Option<WorkSession>,
    pub sessions: Vec<WorkSession>,
    pub stats: Stats,
}

/// Issue the three reads concurrently; the snapshot only exists if all succeed.
pub async fn fetch_snapshot<G>(gateway: &G) -> AppResult<Snapshot>
where
    G: SessionGateway + ?Sized,
{
    let (active, sessions, stats) = tokio::try_join!(
        gateway.active_session(),
        gateway.all_sessions(),
        gateway.stats(),
    )?;

    Ok(Snapshot {
        active,
        sessions,
        stats,
    })
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub active: Option<WorkSession>,
    pub sessions: Vec<WorkSession>,
    pub stats: Option<Stats>,
    pub error: Option<String>,
    /// Until the first load completes, successfully or not.
    pub loading: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            active: None,
            sessions: Vec::new(),
            stats: None,
            error: None,
            loading: true,
        }
    }
}

impl DashboardState {
    pub fn apply(&mut self, snapshot: Snapshot) {
        self.active = snapshot.active;
        self.sessions = snapshot.sessions;
        self.stats = Some(snapshot.stats);
        self.error = None;
        self.loading = false;
    }

    pub fn fail(&mut self, error: &AppError) {
        if !error.is_unauthorized() {
            self.error = Some(LOAD_FAILED.to_string());
        }
        self.loading = false;
    }

    /// The new session goes live and on top of the history.
    pub fn on_session_started(&mut self, session: WorkSession) {
        self.active = Some(session.clone());
        self.sessions.insert(0, session);
    }

    /// The closed copy replaces the open one in the history.
    pub fn on_session_stopped(&mut self, session: WorkSession) {
        self.active = None;
        for s in self.sessions.iter_mut().filter(|s| s.id == session.id) {
            *s = session.clone();
        }
    }

    pub fn apply_stats(&mut self, stats: Stats) {
        self.stats = Some(stats);
    }

    pub fn completed(&self) -> impl Iterator<Item = &WorkSession> {
        self.sessions.iter().filter(|s| s.is_completed())
    }

    pub fn recent_completed(&self, n: usize) -> Vec<&WorkSession> {
        self.completed().take(n).collect()
    }
}

pub struct DashboardPage<G: SessionGateway + ?Sized> {
    gateway: Arc<G>,
    state: Arc<Mutex<DashboardState>>,
    mount: Mount,
}

impl<G: SessionGateway + ?Sized> Clone for DashboardPage<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            state: Arc::clone(&self.state),
            mount: self.mount.clone(),
        }
    }
}

impl<G: SessionGateway + ?Sized> DashboardPage<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            state: Arc::new(Mutex::new(DashboardState::default())),
            mount: Mount::new(),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    pub fn unmount(&self) {
        self.mount.unmount();
    }

    /// Copy of the current state, for rendering.
    pub async fn state(&self) -> DashboardState {
        self.state.lock().await.clone()
    }

    pub async fn refresh(&self) -> AppResult<()> {
        let result = fetch_snapshot(&*self.gateway).await;

        if !self.mount.is_mounted() {
            debug!("page unmounted, dropping refresh result");
            return result.map(|_| ());
        }

        let mut state = self.state.lock().await;
        match result {
            Ok(snapshot) => {
                state.apply(snapshot);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "dashboard refresh failed");
                state.fail(&e);
                Err(e)
            }
        }
    }

    pub async fn start(&self, panel: &mut AdminPanel, description: &str) -> AppResult<WorkSession> {
        let session = panel.start(&*self.gateway, description).await?;

        if self.mount.is_mounted() {
            self.state.lock().await.on_session_started(session.clone());
        }
        Ok(session)
    }

    /// Stop, flip the page to idle, and only then refetch the totals.
    pub async fn stop(&self, panel: &mut AdminPanel) -> AppResult<WorkSession> {
        let session = panel.stop(&*self.gateway).await?;

        if !self.mount.is_mounted() {
            return Ok(session);
        }
        self.state.lock().await.on_session_stopped(session.clone());

        match self.gateway.stats().await {
            Ok(stats) if self.mount.is_mounted() => self.state.lock().await.apply_stats(stats),
            Ok(_) => {}
            Err(e) => warn!(error = %e, "stats refresh after stop failed"),
        }

        Ok(session)
    }
}

mod common;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use common::{at, completed, running};
use rtracker::api::SessionGateway;
use rtracker::core::admin::{AdminPanel, EMPTY_DESCRIPTION, PanelState, START_FAILED, STOP_FAILED};
use rtracker::core::client_view::{ClientView, PresenceStatus};
use rtracker::core::clock::{Clock, ManualClock};
use rtracker::core::dashboard::{DashboardPage, LOAD_FAILED, fetch_snapshot};
use rtracker::errors::{AppError, AppResult};
use rtracker::models::{Stats, WorkSession};
use rtracker::utils::time::to_local;
use rtracker::ui::render::{render_admin, render_client, render_history};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory backend that records every call it receives.
#[derive(Default)]
struct FakeGateway {
    active: Mutex<Option<WorkSession>>,
    sessions: Mutex<Vec<WorkSession>>,
    stats: Mutex<Option<Stats>>,
    calls: Mutex<Vec<&'static str>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
    fail_stats: AtomicBool,
    unauthorized: AtomicBool,
    page: Mutex<Option<DashboardPage<FakeGateway>>>,
    idle_when_stats_requested: Mutex<Vec<bool>>,
}

impl FakeGateway {
    fn with_history(sessions: Vec<WorkSession>, worked: f64) -> Arc<Self> {
        let gw = FakeGateway::default();
        *gw.sessions.lock().unwrap() = sessions;
        *gw.stats.lock().unwrap() = Some(Stats {
            total_hours_worked: worked,
            contracted_hours: 60.0,
        });
        Arc::new(gw)
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) -> AppResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.unauthorized.load(Ordering::SeqCst) {
            return Err(AppError::Unauthorized);
        }
        Ok(())
    }

    fn server_error() -> AppError {
        AppError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        }
    }
}

#[async_trait]
impl SessionGateway for FakeGateway {
    async fn active_session(&self) -> AppResult<Option<WorkSession>> {
        self.record("active")?;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::server_error());
        }
        Ok(self.active.lock().unwrap().clone())
    }

    async fn all_sessions(&self) -> AppResult<Vec<WorkSession>> {
        self.record("sessions")?;
        Ok(self.sessions.lock().unwrap().clone())
    }

    async fn stats(&self) -> AppResult<Stats> {
        self.record("stats")?;

        let page = self.page.lock().unwrap().clone();
        if let Some(page) = page {
            let idle = page.state().await.active.is_none();
            self.idle_when_stats_requested.lock().unwrap().push(idle);
        }

        if self.fail_stats.load(Ordering::SeqCst) {
            return Err(Self::server_error());
        }
        self.stats.lock().unwrap().ok_or_else(Self::server_error)
    }

    async fn start_session(&self, description: &str) -> AppResult<WorkSession> {
        self.record("start")?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::server_error());
        }

        let session = running(100, description, Utc::now());
        *self.active.lock().unwrap() = Some(session.clone());
        self.sessions.lock().unwrap().insert(0, session.clone());
        Ok(session)
    }

    async fn stop_session(&self) -> AppResult<WorkSession> {
        self.record("stop")?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::server_error());
        }

        let Some(mut session) = self.active.lock().unwrap().take() else {
            return Err(AppError::Api {
                status: 400,
                message: "No active session to stop".into(),
            });
        };
        session.end_time = Some(session.start_time + Duration::minutes(90));

        for s in self.sessions.lock().unwrap().iter_mut() {
            if s.id == session.id {
                *s = session.clone();
            }
        }
        if let Some(stats) = self.stats.lock().unwrap().as_mut() {
            stats.total_hours_worked += 1.5;
        }
        Ok(session)
    }
}

fn history() -> Vec<WorkSession> {
    vec![
        completed(1, "Design", at(2024, 1, 15, 9, 0), 90),
        completed(2, "Review", at(2024, 1, 14, 10, 0), 30),
    ]
}

// ---------------------------
// Admin panel
// ---------------------------

#[tokio::test]
async fn test_blank_description_never_reaches_gateway() {
    let gw = FakeGateway::with_history(history(), 2.0);
    let mut panel = AdminPanel::new(None);

    let err = panel.start(&*gw, "   ").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(panel.error(), Some(EMPTY_DESCRIPTION));
    assert_eq!(*panel.state(), PanelState::Idle);
    assert!(gw.calls().is_empty());
}

#[tokio::test]
async fn test_start_trims_and_activates() {
    let gw = FakeGateway::with_history(history(), 2.0);
    let mut panel = AdminPanel::new(None);

    let session = panel.start(&*gw, "  Write tests ").await.unwrap();
    assert_eq!(session.description, "Write tests");
    assert!(panel.is_active());
    assert_eq!(panel.error(), None);
    assert_eq!(gw.calls(), vec!["start"]);
}

#[tokio::test]
async fn test_failed_start_stays_idle_with_inline_error() {
    let gw = FakeGateway::with_history(history(), 2.0);
    gw.fail_writes.store(true, Ordering::SeqCst);
    let mut panel = AdminPanel::new(None);

    assert!(panel.start(&*gw, "Deploy").await.is_err());
    assert_eq!(*panel.state(), PanelState::Idle);
    assert_eq!(panel.error(), Some(START_FAILED));

    panel.dismiss_error();
    assert_eq!(panel.error(), None);
}

#[tokio::test]
async fn test_failed_stop_stays_active_with_inline_error() {
    let gw = FakeGateway::with_history(history(), 2.0);
    let open = running(100, "Deploy", at(2024, 1, 15, 11, 0));
    *gw.active.lock().unwrap() = Some(open.clone());
    gw.fail_writes.store(true, Ordering::SeqCst);

    let mut panel = AdminPanel::new(Some(open.clone()));
    assert!(panel.stop(&*gw).await.is_err());
    assert_eq!(panel.active_session(), Some(&open));
    assert_eq!(panel.error(), Some(STOP_FAILED));
}

#[tokio::test]
async fn test_unauthorized_leaves_no_inline_error() {
    let gw = FakeGateway::with_history(history(), 2.0);
    gw.unauthorized.store(true, Ordering::SeqCst);
    let mut panel = AdminPanel::new(None);

    let err = panel.start(&*gw, "Deploy").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(panel.error(), None);
}

#[tokio::test]
async fn test_start_while_active_and_stop_while_idle_are_rejected_locally() {
    let gw = FakeGateway::with_history(history(), 2.0);

    let mut active = AdminPanel::new(Some(running(100, "Deploy", at(2024, 1, 15, 11, 0))));
    let err = active.start(&*gw, "Another").await.unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    let mut idle = AdminPanel::new(None);
    let err = idle.stop(&*gw).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    assert!(gw.calls().is_empty());
}

#[test]
fn test_completed_session_does_not_make_panel_active() {
    let panel = AdminPanel::new(Some(completed(1, "Done", at(2024, 1, 15, 9, 0), 10)));
    assert!(!panel.is_active());
}

#[test]
fn test_clock_follows_server_start_time() {
    let start = at(2024, 1, 15, 9, 0);
    let clock = ManualClock::new(start);
    let panel = AdminPanel::new(Some(running(1, "Deploy", start)));

    assert_eq!(panel.clock(clock.now()), "00:00:00");
    clock.advance(Duration::seconds(3661));
    assert_eq!(panel.clock(clock.now()), "01:01:01");
    assert_eq!(
        panel.started_at_label(),
        Some(format!("Started at {}", to_local(start).format("%H:%M:%S")))
    );

    let idle = AdminPanel::new(None);
    assert_eq!(idle.clock(clock.now()), "00:00:00");
    assert_eq!(idle.started_at_label(), None);
}

// ---------------------------
// Dashboard page
// ---------------------------

#[tokio::test]
async fn test_refresh_applies_snapshot() {
    let gw = FakeGateway::with_history(history(), 2.0);
    let page = DashboardPage::new(Arc::clone(&gw));
    assert!(page.state().await.loading);

    page.refresh().await.unwrap();
    let state = page.state().await;
    assert!(!state.loading);
    assert_eq!(state.sessions.len(), 2);
    assert_eq!(state.stats.unwrap().total_hours_worked, 2.0);
    assert_eq!(state.error, None);

    let mut calls = gw.calls();
    calls.sort();
    assert_eq!(calls, vec!["active", "sessions", "stats"]);
}

#[tokio::test]
async fn test_refresh_failure_sets_load_error() {
    let gw = FakeGateway::with_history(history(), 2.0);
    gw.fail_reads.store(true, Ordering::SeqCst);
    let page = DashboardPage::new(Arc::clone(&gw));

    assert!(page.refresh().await.is_err());
    let state = page.state().await;
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some(LOAD_FAILED));
}

#[tokio::test]
async fn test_refresh_after_unmount_is_dropped() {
    let gw = FakeGateway::with_history(history(), 2.0);
    let page = DashboardPage::new(Arc::clone(&gw));
    page.unmount();

    page.refresh().await.unwrap();
    let state = page.state().await;
    assert!(state.loading);
    assert!(state.sessions.is_empty());
}

#[tokio::test]
async fn test_fetch_snapshot_is_all_or_nothing() {
    let gw = FakeGateway::with_history(history(), 2.0);
    gw.fail_stats.store(true, Ordering::SeqCst);
    assert!(fetch_snapshot(&*gw).await.is_err());
}

#[tokio::test]
async fn test_page_start_prepends_session() {
    let gw = FakeGateway::with_history(history(), 2.0);
    let page = DashboardPage::new(Arc::clone(&gw));
    page.refresh().await.unwrap();

    let mut panel = AdminPanel::new(None);
    let session = page.start(&mut panel, "Standup").await.unwrap();

    let state = page.state().await;
    assert_eq!(state.active.as_ref(), Some(&session));
    assert_eq!(state.sessions[0].id, session.id);
    assert_eq!(state.sessions.len(), 3);
}

#[tokio::test]
async fn test_stop_shows_idle_before_stats_refetch() {
    let gw = FakeGateway::with_history(history(), 2.0);
    let page = DashboardPage::new(Arc::clone(&gw));
    *gw.page.lock().unwrap() = Some(page.clone());

    page.refresh().await.unwrap();
    let mut panel = AdminPanel::new(None);
    page.start(&mut panel, "Standup").await.unwrap();
    gw.idle_when_stats_requested.lock().unwrap().clear();
    gw.calls.lock().unwrap().clear();

    let stopped = page.stop(&mut panel).await.unwrap();
    assert!(stopped.is_completed());
    assert!(!panel.is_active());
    assert_eq!(gw.calls(), vec!["stop", "stats"]);
    assert_eq!(*gw.idle_when_stats_requested.lock().unwrap(), vec![true]);

    let state = page.state().await;
    assert_eq!(state.active, None);
    assert_eq!(state.sessions[0], stopped);
    assert_eq!(state.stats.unwrap().total_hours_worked, 3.5);

    // break the page <-> gateway cycle
    gw.page.lock().unwrap().take();
}

#[tokio::test]
async fn test_stop_succeeds_even_if_stats_refetch_fails() {
    let gw = FakeGateway::with_history(history(), 2.0);
    let page = DashboardPage::new(Arc::clone(&gw));
    page.refresh().await.unwrap();

    let mut panel = AdminPanel::new(None);
    page.start(&mut panel, "Standup").await.unwrap();
    gw.fail_stats.store(true, Ordering::SeqCst);

    assert!(page.stop(&mut panel).await.is_ok());
    let state = page.state().await;
    assert_eq!(state.active, None);
    assert_eq!(state.stats.unwrap().total_hours_worked, 2.0);
    assert_eq!(state.error, None);
}

// ---------------------------
// Client view
// ---------------------------

#[test]
fn test_client_view_status_and_progress() {
    let stats = Stats {
        total_hours_worked: 30.0,
        contracted_hours: 60.0,
    };
    let mut view = ClientView::new(history(), None, Some(stats));
    assert_eq!(view.status(), PresenceStatus::Offline);
    assert_eq!(view.progress_percentage(), 50.0);
    assert_eq!(view.remaining_hours(), 30.0);
    assert_eq!(view.completed_count(), 2);

    view.update(
        &history(),
        Some(&running(3, "Live", at(2024, 1, 15, 11, 0))),
        Some(&stats),
    );
    assert_eq!(view.status(), PresenceStatus::Online);
}

#[test]
fn test_client_view_groups_are_memoized() {
    let now = at(2024, 1, 15, 12, 0);
    let mut view = ClientView::new(history(), None, None);

    assert_eq!(view.groups(&now).len(), 2);
    assert_eq!(view.groups(&now).len(), 2);
    assert_eq!(view.grouping_runs(), 1);

    // same inputs: cache survives
    view.update(&history(), None, None);
    view.groups(&now);
    assert_eq!(view.grouping_runs(), 1);

    // new session: regrouped
    let mut more = history();
    more.push(completed(3, "Old", at(2024, 1, 10, 9, 0), 15));
    view.update(&more, None, None);
    assert_eq!(view.groups(&now).len(), 3);
    assert_eq!(view.grouping_runs(), 2);

    // day rolled over: labels change
    let tomorrow = now + Duration::days(1);
    assert_eq!(view.groups(&tomorrow)[0].label, "Yesterday");
    assert_eq!(view.grouping_runs(), 3);
}

#[test]
fn test_client_view_progress_recomputed_on_new_stats() {
    let mut view = ClientView::new(
        Vec::new(),
        None,
        Some(Stats {
            total_hours_worked: 6.0,
            contracted_hours: 60.0,
        }),
    );
    assert_eq!(view.progress_percentage(), 10.0);

    view.update(
        &[],
        None,
        Some(&Stats {
            total_hours_worked: 60.0,
            contracted_hours: 60.0,
        }),
    );
    assert_eq!(view.progress_percentage(), 100.0);
}

// ---------------------------
// Rendering
// ---------------------------

#[test]
fn test_render_history_lists_groups() {
    let now = at(2024, 1, 15, 12, 0);
    let groups = rtracker::utils::date::group_by_day(&history(), &now);
    let text = render_history(&groups, &Utc);

    assert!(text.contains("Today"));
    assert!(text.contains("Yesterday"));
    assert!(text.contains("09:00 - 10:30"));
    assert!(text.contains("1h 30m"));
    assert!(render_history(&[], &Utc).contains("No sessions recorded yet"));
}

#[test]
fn test_render_client_and_admin() {
    let now = at(2024, 1, 15, 12, 0);
    let stats = Stats {
        total_hours_worked: 30.0,
        contracted_hours: 60.0,
    };

    let mut view = ClientView::new(history(), None, Some(stats));
    let text = render_client(&mut view, &now);
    assert!(text.contains("offline"));
    assert!(text.contains("30.0h / 60.0h (50.0%)"));

    let state = rtracker::core::dashboard::DashboardState {
        sessions: history(),
        stats: Some(stats),
        loading: false,
        ..Default::default()
    };
    let panel = AdminPanel::new(None);
    let text = render_admin(&panel, &state, now);
    assert!(text.contains("idle"));
    assert!(text.contains("Completed sessions: 2"));
}

//! Periodic tasks with an explicit start/stop, and the mount guard that
//! keeps late results away from torn-down pages.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Runs `task` immediately and then once every `period` until stopped.
///
/// Ticks missed while a task is still running are skipped, so a task never
/// overlaps with itself. A task that is already running when the ticker is
/// stopped is allowed to finish. Dropping the ticker stops it.
pub struct Ticker {
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn start<F, Fut>(period: Duration, mut task: F) -> Self
    where
        F: FnMut(u64) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let stopped = token.clone();
        let period = period.max(Duration::from_millis(1));

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut tick: u64 = 0;

            loop {
                tokio::select! {
                    biased;
                    _ = stopped.cancelled() => break,
                    _ = interval.tick() => {}
                }

                task(tick).await;
                tick += 1;
            }

            tracing::trace!(ticks = tick, "ticker stopped");
        });

        Self {
            token,
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled() && self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop ticking and wait for an in-flight task to wind down.
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Whether a page is still on screen.
///
/// Async work started by a page checks this before touching page state,
/// so a response landing after the page went away is dropped.
#[derive(Debug, Clone, Default)]
pub struct Mount {
    token: CancellationToken,
}

impl Mount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mounted(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn unmount(&self) {
        self.token.cancel();
    }

    /// Resolves once the page has been torn down.
    pub async fn unmounted(&self) {
        self.token.cancelled().await
    }
}

//! Outbound calls to the tracking backend.

pub mod client;

pub use client::ApiClient;

use crate::errors::AppResult;
use crate::models::{Stats, WorkSession};
use async_trait::async_trait;

/// Session operations the dashboards depend on.
///
/// [`ApiClient`] is the real implementation; page logic only sees this
/// trait so it can run against an in-memory backend in tests.
#[async_trait]
pub trait SessionGateway: Send + Sync {
    /// `None` when the backend reports no running session.
    async fn active_session(&self) -> AppResult<Option<WorkSession>>;
    async fn all_sessions(&self) -> AppResult<Vec<WorkSession>>;
    async fn stats(&self) -> AppResult<Stats>;
    async fn start_session(&self, description: &str) -> AppResult<WorkSession>;
    async fn stop_session(&self) -> AppResult<WorkSession>;
}

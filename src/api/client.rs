//! HTTP client for the tracking backend.
//!
//! Every request carries the cached Basic credential. A 401 from any
//! authenticated call wipes that credential and moves the navigator to the
//! login route before the error is handed back to the caller.

use super::SessionGateway;
use crate::auth::{CredentialStore, basic_token};
use crate::config::Config;
use crate::core::router::{Navigator, resolve_home};
use crate::errors::{AppError, AppResult};
use crate::models::work_session::StartSessionRequest;
use crate::models::{AuthSession, AuthUser, Route, Stats, WorkSession};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
    navigator: Navigator,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        store: Arc<dyn CredentialStore>,
        navigator: Navigator,
    ) -> AppResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT, store, navigator)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
        store: Arc<dyn CredentialStore>,
        navigator: Navigator,
    ) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("rtracker/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
            navigator,
        })
    }

    pub fn from_config(
        cfg: &Config,
        store: Arc<dyn CredentialStore>,
        navigator: Navigator,
    ) -> AppResult<Self> {
        Self::with_timeout(cfg.base_url(), cfg.request_timeout(), store, navigator)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ============ Auth ============

    /// Check the credentials against `/auth/me`; cache token + role only on success.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<AuthUser> {
        let token = basic_token(username, password);

        debug!(username, "login");
        let response = self
            .http
            .get(self.url("/auth/me"))
            .header(AUTHORIZATION, format!("Basic {}", token))
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(AppError::InvalidCredentials);
        }
        let response = ensure_success(response).await?;
        let user: AuthUser = decode(response).await?;

        self.store.save(&AuthSession::issue(token, user.role))?;
        self.navigator.navigate(resolve_home(Some(user.role)));
        info!(username = %user.username, role = %user.role, "logged in");

        Ok(user)
    }

    /// Drop the cached credential. No server call.
    pub fn logout(&self) -> AppResult<()> {
        self.store.clear()?;
        self.navigator.navigate(Route::Login);
        info!("logged out");
        Ok(())
    }

    /// Re-validate the cached credential.
    pub async fn whoami(&self) -> AppResult<AuthUser> {
        let response = self.send(self.http.get(self.url("/auth/me"))).await?;
        decode(response).await
    }

    // ============ Sessions ============

    pub async fn get_all_sessions(&self) -> AppResult<Vec<WorkSession>> {
        let response = self.send(self.http.get(self.url("/sessions"))).await?;
        decode(response).await
    }

    /// 204 (or an empty 2xx body) means no running session.
    pub async fn get_active_session(&self) -> AppResult<Option<WorkSession>> {
        let response = self
            .send(self.http.get(self.url("/sessions/active")))
            .await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response.text().await?;
        if body.trim().is_empty() || body.trim() == "null" {
            return Ok(None);
        }

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| AppError::Decode(format!("active session: {}", e)))
    }

    pub async fn start_session(&self, description: &str) -> AppResult<WorkSession> {
        let request = self
            .http
            .post(self.url("/sessions/start"))
            .json(&StartSessionRequest { description });
        let response = self.send(request).await?;
        decode(response).await
    }

    pub async fn stop_session(&self) -> AppResult<WorkSession> {
        let response = self.send(self.http.post(self.url("/sessions/stop"))).await?;
        decode(response).await
    }

    pub async fn get_stats(&self) -> AppResult<Stats> {
        let response = self
            .send(self.http.get(self.url("/sessions/stats")))
            .await?;
        decode(response).await
    }

    // ============ Plumbing ============

    /// Attach the cached credential, send, and intercept 401.
    async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        let request = match self.store.load()? {
            Some(session) => request.header(AUTHORIZATION, session.authorization_header()),
            None => request,
        };

        let request = request.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let response = self.http.execute(request).await?;
        debug!(%method, %path, status = response.status().as_u16(), "response");

        if response.status() == StatusCode::UNAUTHORIZED {
            self.invalidate();
            return Err(AppError::Unauthorized);
        }

        ensure_success(response).await
    }

    fn invalidate(&self) {
        warn!("credential rejected by server, clearing cached session");
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear cached credential");
        }
        self.navigator.navigate(Route::Login);
    }
}

/// Turn non-2xx responses into `AppError::Api`, keeping the backend's
/// `{"error": "..."}` message when there is one.
async fn ensure_success(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    });

    Err(AppError::Api {
        status: status.as_u16(),
        message,
    })
}

fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let path = response.url().path().to_string();
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| AppError::Decode(format!("{}: {}", path, e)))
}

#[async_trait]
impl SessionGateway for ApiClient {
    async fn active_session(&self) -> AppResult<Option<WorkSession>> {
        self.get_active_session().await
    }

    async fn all_sessions(&self) -> AppResult<Vec<WorkSession>> {
        self.get_all_sessions().await
    }

    async fn stats(&self) -> AppResult<Stats> {
        self.get_stats().await
    }

    async fn start_session(&self, description: &str) -> AppResult<WorkSession> {
        ApiClient::start_session(self, description).await
    }

    async fn stop_session(&self) -> AppResult<WorkSession> {
        ApiClient::stop_session(self).await
    }
}

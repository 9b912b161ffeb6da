//! Unified application error type.
//! All modules (api, auth, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Input validation (never reaches the network)
    // ---------------------------
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidState(String),

    // ---------------------------
    // Authentication
    // ---------------------------
    #[error("Session expired, please log in again")]
    Unauthorized,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Not logged in. Run `rtracker login` first")]
    NotLoggedIn,

    // ---------------------------
    // HTTP / API
    // ---------------------------
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response from server: {0}")]
    Decode(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid clock value: {0}")]
    InvalidClock(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl AppError {
    /// Network failures and server-side (5xx) errors. The user may simply try again.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Http(_) => true,
            AppError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// 401 from an authenticated call: the credential has already been wiped.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized)
    }
}

pub type AppResult<T> = Result<T, AppError>;

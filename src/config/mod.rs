use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
    #[serde(default = "default_clock_tick")]
    pub clock_tick_ms: u64,
    #[serde(default = "default_credentials_file")]
    pub credentials_file: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}
fn default_request_timeout() -> u64 {
    15
}
fn default_refresh_interval() -> u64 {
    30
}
fn default_clock_tick() -> u64 {
    1000
}
fn default_credentials_file() -> String {
    Config::credentials_path().to_string_lossy().to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout(),
            refresh_interval_secs: default_refresh_interval(),
            clock_tick_ms: default_clock_tick(),
            credentials_file: default_credentials_file(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rtracker")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rtracker")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtracker.conf")
    }

    /// Return the full path of the cached credential
    pub fn credentials_path() -> PathBuf {
        Self::config_dir().join("credentials.yaml")
    }

    /// Load `path`, or defaults if there is none yet
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> AppResult<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "api_url must start with http:// or https:// (got '{}')",
                self.api_url
            )));
        }
        if self.refresh_interval_secs == 0 {
            return Err(AppError::Config("refresh_interval_secs must be > 0".into()));
        }
        if self.clock_tick_ms == 0 {
            return Err(AppError::Config("clock_tick_ms must be > 0".into()));
        }
        Ok(())
    }

    /// Base URL without the trailing slash, ready for `format!("{}/sessions")`.
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    pub fn credentials_file_path(&self) -> PathBuf {
        expand_tilde(&self.credentials_file)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn clock_tick(&self) -> Duration {
        Duration::from_millis(self.clock_tick_ms)
    }

    /// Write the defaults to `path`, creating the parent directory.
    pub fn init_at(path: &Path) -> AppResult<Self> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let config = Config::default();
        let yaml = serde_yaml::to_string(&config)?;
        let mut file = fs::File::create(path).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes())
            .map_err(|_| AppError::ConfigSave)?;

        Ok(config)
    }
}

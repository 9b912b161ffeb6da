//! Everything a command needs, wired once per invocation.

use crate::api::ApiClient;
use crate::auth::{CredentialStore, FileCredentialStore};
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::clock::{Clock, SystemClock};
use crate::core::router::{Access, Navigator};
use crate::errors::AppResult;
use crate::models::{AuthSession, Route};
use crate::ui::messages;
use crate::utils::path::expand_tilde;
use std::path::PathBuf;
use std::sync::Arc;

pub struct App {
    pub cfg: Config,
    pub config_path: PathBuf,
    pub store: Arc<dyn CredentialStore>,
    pub navigator: Navigator,
    pub api: Arc<ApiClient>,
    pub clock: Arc<dyn Clock>,
}

impl App {
    /// Load the config (file, then command-line overrides) and build the client.
    pub fn from_cli(cli: &Cli) -> AppResult<Self> {
        let config_path = cli
            .config
            .as_deref()
            .map(expand_tilde)
            .unwrap_or_else(Config::config_file);

        let mut cfg = Config::load_from(&config_path)?;
        if let Some(url) = &cli.api_url {
            cfg.api_url = url.clone();
        }
        if let Some(creds) = &cli.credentials {
            cfg.credentials_file = creds.clone();
        }
        cfg.validate()?;

        let store: Arc<dyn CredentialStore> =
            Arc::new(FileCredentialStore::new(cfg.credentials_file_path()));
        Self::with_store(cfg, config_path, store)
    }

    pub fn with_store(
        cfg: Config,
        config_path: PathBuf,
        store: Arc<dyn CredentialStore>,
    ) -> AppResult<Self> {
        let navigator = Navigator::default();
        let api = Arc::new(ApiClient::from_config(
            &cfg,
            Arc::clone(&store),
            navigator.clone(),
        )?);

        Ok(Self {
            cfg,
            config_path,
            store,
            navigator,
            api,
            clock: Arc::new(SystemClock),
        })
    }

    pub fn session(&self) -> AppResult<Option<AuthSession>> {
        self.store.load()
    }

    /// Navigate to `target` through the role guard and return where we landed.
    ///
    /// A cached credential whose role is unreadable is wiped on the way back
    /// to login.
    pub fn enter(&self, target: Route) -> AppResult<Route> {
        let session = self.session()?;
        let access = self.navigator.visit(session.as_ref(), target);

        if let Access::Redirect(route) = access {
            match (&session, route) {
                (Some(stale), Route::Login) => {
                    tracing::warn!(role = %stale.role, "cached role is not recognised");
                    self.store.clear()?;
                    messages::warning("Cached session is invalid, please log in again");
                }
                (Some(s), _) => messages::redirect(format!(
                    "{} is not available to {} users, showing {} instead",
                    target, s.role, route
                )),
                (None, _) => {}
            }
        }

        Ok(access.route())
    }
}

use crate::errors::AppResult;
use crate::models::AuthSession;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Where the cached credential lives.
///
/// The gateway client receives one of these instead of reading ambient
/// global state, so tests can hand it an in-memory store.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> AppResult<Option<AuthSession>>;
    fn save(&self, session: &AuthSession) -> AppResult<()>;
    fn clear(&self) -> AppResult<()>;

    fn is_authenticated(&self) -> bool {
        matches!(self.load(), Ok(Some(_)))
    }
}

/// YAML file next to the configuration (`~/.rtracker/credentials.yaml`).
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> AppResult<Option<AuthSession>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        match serde_yaml::from_str::<AuthSession>(&content) {
            Ok(session) if !session.token.trim().is_empty() => Ok(Some(session)),
            Ok(_) => Ok(None),
            Err(e) => {
                // unreadable cache is as good as no cache
                tracing::warn!(path = %self.path.display(), error = %e, "discarding corrupt credentials file");
                Ok(None)
            }
        }
    }

    fn save(&self, session: &AuthSession) -> AppResult<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let yaml = serde_yaml::to_string(session)?;
        let mut file = open_private(&self.path)?;
        file.write_all(yaml.as_bytes())?;
        // an older file keeps its mode when truncated
        restrict_permissions(&self.path)?;
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Open for writing; on unix a new file is created 0600 so the token is
/// never readable by others.
fn open_private(path: &Path) -> AppResult<fs::File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    Ok(options.open(path)?)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> AppResult<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> AppResult<()> {
    Ok(())
}

#[derive(Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<Option<AuthSession>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: AuthSession) -> Self {
        Self {
            inner: Mutex::new(Some(session)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> AppResult<Option<AuthSession>> {
        Ok(self.inner.lock().ok().and_then(|slot| (*slot).clone()))
    }

    fn save(&self, session: &AuthSession) -> AppResult<()> {
        if let Ok(mut slot) = self.inner.lock() {
            *slot = Some(session.clone());
        }
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        if let Ok(mut slot) = self.inner.lock() {
            *slot = None;
        }
        Ok(())
    }
}

use super::role::Role;
use serde::{Deserialize, Serialize};

/// Identity returned by `GET /auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub username: String,
    pub role: Role,
}

/// The locally cached credential.
///
/// Issued on a successful login, invalidated on logout or on any 401.
/// `role` keeps the raw string that was cached so a corrupt or stale value
/// can be told apart from a missing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub role: String,
}

impl AuthSession {
    pub fn issue(token: String, role: Role) -> Self {
        Self {
            token,
            role: role.as_str().to_string(),
        }
    }

    /// `None` when the cached role is not one we know.
    pub fn role(&self) -> Option<Role> {
        Role::from_cached(&self.role)
    }

    pub fn authorization_header(&self) -> String {
        format!("Basic {}", self.token)
    }
}

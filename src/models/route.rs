use super::role::Role;
use std::fmt;

/// User-visible screens of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Admin,
    Client,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Admin => "/admin",
            Route::Client => "/client",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "/login" => Some(Route::Login),
            "/admin" => Some(Route::Admin),
            "/client" => Some(Route::Client),
            _ => None,
        }
    }

    /// Roles allowed to reach this route. Empty for public routes.
    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Route::Login => &[],
            Route::Admin => &[Role::Admin],
            Route::Client => &[Role::Client, Role::Admin],
        }
    }

    pub fn is_public(&self) -> bool {
        self.allowed_roles().is_empty()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

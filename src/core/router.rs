//! Role-gated routing.
//!
//! Every decision about which screen a cached credential may reach goes
//! through [`resolve_home`], [`is_allowed`], and [`guard`]. They are pure and
//! know nothing about the terminal.

use crate::models::{AuthSession, Role, Route};
use std::sync::{Arc, RwLock};

/// Outcome of guarding a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted(Route),
    Redirect(Route),
}

impl Access {
    /// The route that ends up on screen either way.
    pub fn route(&self) -> Route {
        match self {
            Access::Granted(r) | Access::Redirect(r) => *r,
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted(_))
    }
}

/// Home route of a role. Unknown or missing roles go back to login.
pub fn resolve_home(role: Option<Role>) -> Route {
    match role {
        Some(Role::Admin) => Route::Admin,
        Some(Role::Client) => Route::Client,
        None => Route::Login,
    }
}

pub fn is_allowed(role: Role, route: Route) -> bool {
    route.is_public() || route.allowed_roles().contains(&role)
}

pub fn is_authenticated(session: Option<&AuthSession>) -> bool {
    session.is_some_and(|s| !s.token.is_empty())
}

/// Decide where a navigation to `target` lands.
///
/// - not authenticated: login (login itself is granted)
/// - authenticated with a corrupt/unknown role: login
/// - authenticated, known role, visiting login: the role's home
/// - authenticated, wrong role: the role's home, never an error page
pub fn guard(session: Option<&AuthSession>, target: Route) -> Access {
    let Some(session) = session.filter(|s| !s.token.is_empty()) else {
        return if target == Route::Login {
            Access::Granted(Route::Login)
        } else {
            Access::Redirect(Route::Login)
        };
    };

    let Some(role) = session.role() else {
        return if target == Route::Login {
            Access::Granted(Route::Login)
        } else {
            Access::Redirect(Route::Login)
        };
    };

    if target == Route::Login {
        return Access::Redirect(resolve_home(Some(role)));
    }

    if is_allowed(role, target) {
        Access::Granted(target)
    } else {
        Access::Redirect(resolve_home(Some(role)))
    }
}

/// Holds the user-visible route. Cloned handles share the same slot, so the
/// gateway client can force the login screen from inside any request.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Arc<RwLock<Route>>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Login)
    }
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        Self {
            current: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn current(&self) -> Route {
        self.current
            .read()
            .map(|r| *r)
            .unwrap_or(Route::Login)
    }

    pub fn navigate(&self, route: Route) {
        if let Ok(mut slot) = self.current.write() {
            if *slot != route {
                tracing::debug!(from = %*slot, to = %route, "navigate");
            }
            *slot = route;
        }
    }

    /// Guard `target` against `session` and move there (or to the redirect).
    pub fn visit(&self, session: Option<&AuthSession>, target: Route) -> Access {
        let access = guard(session, target);
        self.navigate(access.route());
        access
    }
}

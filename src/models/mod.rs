pub mod auth;
pub mod role;
pub mod route;
pub mod stats;
pub mod work_session;

pub use auth::{AuthSession, AuthUser};
pub use role::Role;
pub use route::Route;
pub use stats::Stats;
pub use work_session::WorkSession;

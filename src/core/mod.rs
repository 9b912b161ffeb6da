pub mod admin;
pub mod client_view;
pub mod clock;
pub mod dashboard;
pub mod router;
pub mod ticker;

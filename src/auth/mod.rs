//! Cached credential handling: Basic token encoding and the store that
//! persists the token + role pair between invocations.

pub mod store;
pub mod token;

pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use token::basic_token;

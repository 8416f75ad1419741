//! Session lifecycle for warden clients.
//!
//! [`SessionStore`] is the single owner of the authenticated [`User`]
//! (re-exported from `warden-core`). It recovers an existing session at
//! startup, establishes new ones through login or registration, ends them
//! through logout, and keeps them fresh with a [`RefreshScheduler`] that
//! re-validates the session once a minute while a user is held.
//!
//! The store is generic over [`AuthApi`](warden_core::AuthApi), so it runs
//! against the HTTP implementation in `warden-http` or any test double.

pub mod scheduler;
pub mod store;

pub use scheduler::{MIN_REFRESH_INTERVAL, REFRESH_INTERVAL, RefreshScheduler};
pub use store::{SessionState, SessionStore};
pub use warden_core::User;

//! Seams between the session store, the transport and the host environment.

mod auth_api;
mod navigator;

pub use auth_api::AuthApi;
pub use navigator::{LOGIN_PATH, MemoryNavigator, Navigator};

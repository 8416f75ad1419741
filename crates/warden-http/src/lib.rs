//! warden-http - HTTP transport for the warden session client.
//!
//! [`ApiClient`] is the single chokepoint for outbound calls. It keeps the
//! session cookie in a persistent jar, unwraps the server's
//! `{ code, message, data }` envelope, normalizes every failure into
//! [`warden_core::Error`], and asks the injected [`warden_core::Navigator`]
//! to go to the login surface when the server answers 401.
//!
//! [`HttpAuthApi`] implements [`warden_core::AuthApi`] on top of it.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use warden_core::{AuthApi, Credentials, MemoryNavigator};
//! use warden_http::{ApiClient, ClientConfig, HttpAuthApi};
//!
//! # async fn example() -> Result<(), warden_core::Error> {
//! let config = ClientConfig::from_env()?;
//! let client = ApiClient::new(config, Arc::new(MemoryNavigator::new("/")))?;
//! let api = HttpAuthApi::new(client);
//!
//! let auth = api.login(&Credentials::new("alice@example.com", "hunter22")).await?;
//! println!("Logged in as {}", auth.user.display_name());
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
mod config;
mod endpoints;

pub use auth::HttpAuthApi;
pub use client::ApiClient;
pub use config::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, ENV_ALLOW_HTTP, ENV_BASE_URL, ENV_ORIGIN,
    ENV_TIMEOUT_SECS,
};
pub use endpoints::{CURRENT_USER, LOGIN, LOGOUT, PUBLIC_SETTINGS, REGISTER, SEND_VERIFY_CODE};

//! Session wiring for a single CLI invocation.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tokio::sync::watch;
use tracing::debug;

use warden_core::{MemoryNavigator, Navigator, User};
use warden_http::{ApiClient, HttpAuthApi};
use warden_session::{REFRESH_INTERVAL, SessionStore};

use crate::cli::ApiArgs;
use crate::output;

pub type CliStore = SessionStore<HttpAuthApi>;

/// Options for keeping a session open after sign-in.
#[derive(Args, Debug, Clone)]
pub struct HoldArgs {
    /// Keep the session alive until Ctrl-C, then log out
    #[arg(long)]
    pub hold: bool,

    /// Seconds between background session checks while holding
    #[arg(
        long,
        default_value_t = REFRESH_INTERVAL.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..),
        requires = "hold"
    )]
    pub refresh_secs: u64,
}

impl HoldArgs {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }
}

/// A store plus the navigator it redirects through.
pub struct CliSession {
    pub store: CliStore,
    pub navigator: Arc<MemoryNavigator>,
}

impl CliSession {
    /// Build a fresh session whose virtual location starts at `location`.
    pub fn open(api: &ApiArgs, location: &str) -> Result<Self> {
        Self::with_refresh_interval(api, location, REFRESH_INTERVAL)
    }

    /// Like [`CliSession::open`], with a custom background refresh cadence.
    pub fn with_refresh_interval(
        api: &ApiArgs,
        location: &str,
        refresh_interval: Duration,
    ) -> Result<Self> {
        let config = api.client_config()?;
        debug!(base_url = %config.base_url, "Opening session");

        let navigator = Arc::new(MemoryNavigator::new(location));
        let client =
            ApiClient::new(config, navigator.clone()).context("Failed to build HTTP client")?;

        Ok(Self {
            store: SessionStore::with_refresh_interval(HttpAuthApi::new(client), refresh_interval),
            navigator,
        })
    }

    /// Keep the session alive until Ctrl-C or until the server ends it.
    ///
    /// On Ctrl-C the session is logged out; if the server ended it first
    /// there is nothing left to log out.
    pub async fn hold(self) -> Result<()> {
        self.navigator.navigate("/dashboard");
        let mut updates = self.store.subscribe();

        eprintln!(
            "{}",
            "Holding session with background refresh. Press Ctrl-C to log out.".dimmed()
        );

        let ended_by_server = tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl-C")?;
                false
            }
            _ = session_ended(&mut updates) => true,
        };

        if ended_by_server {
            output::error("Session ended by the server");
            if self.navigator.redirect_count() > 0 {
                output::field("Location", &self.navigator.current_location());
            }
        } else {
            eprintln!("{}", "Logging out...".dimmed());
            self.store.logout().await;
            output::success("Logged out");
        }

        self.store.shutdown();
        Ok(())
    }
}

async fn session_ended(updates: &mut watch::Receiver<Option<User>>) {
    loop {
        match updates.borrow_and_update().as_ref() {
            Some(user) => debug!(user_id = user.id, "Session still valid"),
            None => return,
        }
        if updates.changed().await.is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;
    use warden_core::Role;

    fn user() -> User {
        User {
            id: 1,
            email: "erin@example.com".to_string(),
            username: "erin".to_string(),
            role: Role::User,
            status: None,
            profile: Map::new(),
        }
    }

    #[tokio::test]
    async fn session_ended_waits_for_clear() {
        let (tx, mut rx) = watch::channel(Some(user()));

        let waiter = tokio::spawn(async move { session_ended(&mut rx).await });
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        // A refresh that keeps the user does not end the hold.
        tx.send_replace(Some(user()));
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        tx.send_replace(None);
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn session_ended_returns_when_store_is_gone() {
        let (tx, mut rx) = watch::channel(Some(user()));
        drop(tx);
        session_ended(&mut rx).await;
    }
}

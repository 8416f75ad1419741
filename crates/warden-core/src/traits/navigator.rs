//! Navigate-to-login capability.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use tracing::info;

/// Location of the login surface.
pub const LOGIN_PATH: &str = "/login";

/// The host environment's navigation, as seen by the transport.
///
/// The transport consults [`Navigator::current_location`] on every
/// authorization failure and calls [`Navigator::redirect_to_login`] unless
/// the user is already on the login surface.
pub trait Navigator: Send + Sync {
    /// Current location, e.g. `/dashboard`.
    fn current_location(&self) -> String;

    /// Send the user to the login surface.
    fn redirect_to_login(&self);

    /// Returns true if the current location is the login surface.
    ///
    /// Only the path is matched; query and fragment are ignored.
    fn is_on_login(&self) -> bool {
        location_path(&self.current_location()).contains(LOGIN_PATH)
    }
}

/// The path part of a location such as `/dashboard?next=/login#top`.
fn location_path(location: &str) -> &str {
    location.split(['?', '#']).next().unwrap_or_default()
}

/// A navigator that only tracks a location string.
///
/// Suitable for headless front ends and tests: redirects are counted and
/// move the location to [`LOGIN_PATH`].
#[derive(Debug)]
pub struct MemoryNavigator {
    location: Mutex<String>,
    redirects: AtomicUsize,
}

impl MemoryNavigator {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: Mutex::new(location.into()),
            redirects: AtomicUsize::new(0),
        }
    }

    /// Move to a new location.
    pub fn navigate(&self, location: impl Into<String>) {
        *self.location.lock() = location.into();
    }

    /// Number of redirects performed so far.
    pub fn redirect_count(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for MemoryNavigator {
    fn current_location(&self) -> String {
        self.location.lock().clone()
    }

    fn redirect_to_login(&self) {
        let mut location = self.location.lock();
        info!(from = %*location, "redirecting to login");
        *location = LOGIN_PATH.to_string();
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }
}

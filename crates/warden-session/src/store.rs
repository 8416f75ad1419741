//! The session store: single owner of the current user.

use std::fmt;
use std::ops::ControlFlow;
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, info, instrument, trace, warn};

use warden_core::{
    AuthApi, AuthResponse, Credentials, PublicSettings, RegisterRequest, Result,
    SendVerifyCodeRequest, SendVerifyCodeResponse, User,
};

use crate::scheduler::{REFRESH_INTERVAL, RefreshScheduler};

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No user is held.
    Unauthenticated,
    /// A restore is in flight.
    CheckingSession,
    /// A user is held.
    Authenticated,
}

/// Authoritative holder of the session's [`User`].
///
/// Every transition of the held user goes through one of the lifecycle
/// operations here: [`restore`](Self::restore), [`login`](Self::login),
/// [`register`](Self::register), [`logout`](Self::logout) and
/// [`refresh_user`](Self::refresh_user). While a user is held, a background
/// task re-validates the session every refresh interval; whenever the user
/// is cleared the task is cancelled.
///
/// Handles are cheap to clone and share one session. Dropping the last
/// handle cancels the background task.
///
/// # Concurrency
///
/// State is only mutated between suspension points, under a lock that is
/// never held across an `.await`. Restores are single-flight. Login,
/// registration and refresh are last-write-wins.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use warden_core::{Credentials, MemoryNavigator};
/// use warden_http::{ApiClient, ClientConfig, HttpAuthApi};
/// use warden_session::SessionStore;
///
/// # async fn example() -> Result<(), warden_core::Error> {
/// let client = ApiClient::new(ClientConfig::from_env()?, Arc::new(MemoryNavigator::default()))?;
/// let store = SessionStore::new(HttpAuthApi::new(client));
///
/// store.restore().await;
/// if !store.is_authenticated() {
///     store.login(&Credentials::new("alice@example.com", "hunter22")).await?;
/// }
/// assert!(store.is_authenticated());
/// # Ok(())
/// # }
/// ```
pub struct SessionStore<A> {
    inner: Arc<StoreInner<A>>,
}

struct StoreInner<A> {
    api: A,
    user: watch::Sender<Option<User>>,
    control: Mutex<Control>,
}

struct Control {
    checking: bool,
    active: bool,
    scheduler: RefreshScheduler,
}

impl<A> Clone for SessionStore<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: AuthApi + 'static> SessionStore<A> {
    /// Create an unauthenticated store refreshing every [`REFRESH_INTERVAL`].
    pub fn new(api: A) -> Self {
        Self::with_refresh_interval(api, REFRESH_INTERVAL)
    }

    /// Create an unauthenticated store with a custom refresh interval.
    pub fn with_refresh_interval(api: A, interval: Duration) -> Self {
        let (user, _) = watch::channel(None);
        Self {
            inner: Arc::new(StoreInner {
                api,
                user,
                control: Mutex::new(Control {
                    checking: false,
                    active: true,
                    scheduler: RefreshScheduler::new(interval),
                }),
            }),
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Recover the session the server already holds for this client.
    ///
    /// Intended to run once at startup. Never fails: any error simply leaves
    /// the store unauthenticated. While one restore is in flight, further
    /// calls return immediately without a request.
    #[instrument(skip(self))]
    pub async fn restore(&self) {
        let Some(guard) = CheckingGuard::acquire(&self.inner) else {
            debug!("Session restore already in flight");
            return;
        };

        let result = self.inner.api.current_user().await;

        let mut control = self.inner.control.lock();
        guard.release(&mut control);
        if !control.active {
            debug!("Store shut down during restore; result discarded");
            return;
        }

        match result {
            Ok(user) => {
                info!(user_id = user.id, "Session restored");
                self.authenticate(&mut control, user);
            }
            Err(e) => {
                debug!(error = %e, "No session to restore");
                self.clear(&mut control);
            }
        }
    }

    /// Authenticate with credentials.
    ///
    /// # Errors
    ///
    /// Returns the server or transport error; the store is left
    /// unauthenticated.
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<User> {
        let result = self.inner.api.login(credentials).await;
        self.complete_sign_in(result)
    }

    /// Create an account and authenticate.
    ///
    /// # Errors
    ///
    /// Same contract as [`login`](Self::login).
    #[instrument(skip(self, request), fields(email = %request.email()))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<User> {
        let result = self.inner.api.register(request).await;
        self.complete_sign_in(result)
    }

    /// End the session.
    ///
    /// The server is notified first, but local state is cleared whatever the
    /// outcome; a failed notification is only logged.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        if let Err(e) = self.inner.api.logout().await {
            warn!(error = %e, "Server-side logout failed; clearing local session anyway");
        }

        let mut control = self.inner.control.lock();
        if control.active {
            self.clear(&mut control);
        }
        info!("Logged out");
    }

    /// Re-fetch the current user, replacing the held one.
    ///
    /// # Errors
    ///
    /// Propagates every failure. An authorization failure also clears the
    /// session; any other failure leaves it untouched.
    #[instrument(skip(self))]
    pub async fn refresh_user(&self) -> Result<User> {
        let result = self.inner.api.current_user().await;

        let mut control = self.inner.control.lock();
        match result {
            Ok(user) => {
                if control.active {
                    trace!(user_id = user.id, "User refreshed");
                    self.inner.user.send_replace(Some(user.clone()));
                    if !control.scheduler.is_armed() {
                        self.arm(&mut control);
                    }
                }
                Ok(user)
            }
            Err(e) => {
                if e.is_authorization() && control.active {
                    info!("Session rejected during refresh; clearing");
                    self.clear(&mut control);
                }
                Err(e)
            }
        }
    }

    /// Stop the store. Completions of requests still in flight are
    /// discarded and the refresh task is cancelled.
    pub fn shutdown(&self) {
        let mut control = self.inner.control.lock();
        control.active = false;
        control.scheduler.disarm();
        debug!("Session store shut down");
    }

    // ========================================================================
    // Pass-through
    // ========================================================================

    /// Fetch configuration visible without a session.
    pub async fn public_settings(&self) -> Result<PublicSettings> {
        self.inner.api.public_settings().await
    }

    /// Request an email verification code.
    pub async fn send_verify_code(
        &self,
        request: &SendVerifyCodeRequest,
    ) -> Result<SendVerifyCodeResponse> {
        self.inner.api.send_verify_code(request).await
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn complete_sign_in(&self, result: Result<AuthResponse>) -> Result<User> {
        let mut control = self.inner.control.lock();
        match result {
            Ok(AuthResponse { user }) => {
                if control.active {
                    info!(user_id = user.id, role = %user.role, "Session established");
                    self.authenticate(&mut control, user.clone());
                }
                Ok(user)
            }
            Err(e) => {
                debug!(error = %e, "Sign-in failed");
                if control.active {
                    self.clear(&mut control);
                }
                Err(e)
            }
        }
    }

    fn authenticate(&self, control: &mut Control, user: User) {
        self.inner.user.send_replace(Some(user));
        self.arm(control);
    }

    fn clear(&self, control: &mut Control) {
        control.scheduler.disarm();
        self.inner.user.send_if_modified(|user| user.take().is_some());
    }

    fn arm(&self, control: &mut Control) {
        let weak = Arc::downgrade(&self.inner);
        control
            .scheduler
            .arm(move || background_refresh(Weak::clone(&weak)));
    }
}

impl<A> SessionStore<A> {
    /// Current state, derived from the held user and the restore flag.
    pub fn state(&self) -> SessionState {
        let control = self.inner.control.lock();
        let held = self.inner.user.borrow().is_some();
        derive_state(&control, held)
    }

    /// Snapshot of the held user.
    pub fn current_user(&self) -> Option<User> {
        self.inner.user.borrow().clone()
    }

    /// True iff a user is held.
    pub fn is_authenticated(&self) -> bool {
        self.inner.user.borrow().is_some()
    }

    /// True iff a user is held and their role is privileged.
    pub fn is_admin(&self) -> bool {
        self.inner.user.borrow().as_ref().is_some_and(User::is_admin)
    }

    /// Returns true while the background refresh is scheduled.
    pub fn is_refresh_scheduled(&self) -> bool {
        self.inner.control.lock().scheduler.is_armed()
    }

    /// False once [`shutdown`](SessionStore::shutdown) has run.
    pub fn is_active(&self) -> bool {
        self.inner.control.lock().active
    }

    /// Observe every change of the held user.
    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.inner.user.subscribe()
    }
}

// Lock order is always `control` then the user watch; writers hold
// `control` while they publish.
fn derive_state(control: &Control, held: bool) -> SessionState {
    if control.checking {
        SessionState::CheckingSession
    } else if held {
        SessionState::Authenticated
    } else {
        SessionState::Unauthenticated
    }
}

impl<A> fmt::Debug for SessionStore<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (state, user_id, refresh_scheduled) = {
            let control = self.inner.control.lock();
            let user_id = self.inner.user.borrow().as_ref().map(|u| u.id);
            (
                derive_state(&control, user_id.is_some()),
                user_id,
                control.scheduler.is_armed(),
            )
        };

        f.debug_struct("SessionStore")
            .field("state", &state)
            .field("user_id", &user_id)
            .field("refresh_scheduled", &refresh_scheduled)
            .finish()
    }
}

/// One scheduler tick. Failures stay here: nobody awaits a background
/// refresh, and only the refresh's own authorization branch may clear state.
async fn background_refresh<A: AuthApi + 'static>(inner: Weak<StoreInner<A>>) -> ControlFlow<()> {
    let Some(inner) = inner.upgrade() else {
        return ControlFlow::Break(());
    };
    let store = SessionStore { inner };

    if !store.is_authenticated() {
        trace!("No session held; tick skipped");
        return ControlFlow::Continue(());
    }

    if let Err(e) = store.refresh_user().await {
        warn!(error = %e, "Background session refresh failed");
    }
    ControlFlow::Continue(())
}

/// Holds the single-flight restore flag. Dropping it without
/// [`CheckingGuard::release`] (a cancelled restore) still clears the flag.
struct CheckingGuard<'a, A> {
    inner: &'a StoreInner<A>,
    held: bool,
}

impl<'a, A> CheckingGuard<'a, A> {
    fn acquire(inner: &'a StoreInner<A>) -> Option<Self> {
        let mut control = inner.control.lock();
        if control.checking {
            return None;
        }
        control.checking = true;
        Some(Self { inner, held: true })
    }

    fn release(mut self, control: &mut Control) {
        control.checking = false;
        self.held = false;
    }
}

impl<A> Drop for CheckingGuard<'_, A> {
    fn drop(&mut self) {
        if self.held {
            self.inner.control.lock().checking = false;
        }
    }
}

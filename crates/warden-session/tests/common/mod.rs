//! In-memory [`AuthApi`] for driving the session store without a server.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Map;
use tokio::sync::Notify;
use warden_core::{
    ApplicationError, AuthApi, AuthResponse, AuthorizationError, Credentials, Error,
    NetworkError, PublicSettings, RegisterRequest, Result, Role, SendVerifyCodeRequest,
    SendVerifyCodeResponse, User,
};

/// What the fake answers for a given endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    /// HTTP 401.
    Unauthorized,
    /// No response.
    NetworkDown,
    /// Envelope with a non-zero code.
    Rejected,
}

impl Outcome {
    fn into_error(self) -> Option<Error> {
        match self {
            Outcome::Ok => None,
            Outcome::Unauthorized => Some(
                AuthorizationError {
                    status: 401,
                    code: Some(401),
                    message: "Unauthorized".to_string(),
                }
                .into(),
            ),
            Outcome::NetworkDown => Some(NetworkError::unreachable().into()),
            Outcome::Rejected => {
                Some(ApplicationError::new(7, Some("bad password".to_string())).into())
            }
        }
    }
}

pub fn user(id: i64, role: Role) -> User {
    User {
        id,
        email: format!("user{id}@example.com"),
        username: format!("user{id}"),
        role,
        status: Some("active".to_string()),
        profile: Map::new(),
    }
}

struct FakeState {
    user: Mutex<User>,
    current_user: Mutex<Outcome>,
    sign_in: Mutex<Outcome>,
    logout: Mutex<Outcome>,
    gate: Mutex<Option<Arc<Notify>>>,
    current_user_calls: AtomicUsize,
    login_calls: AtomicUsize,
    register_calls: AtomicUsize,
    logout_calls: AtomicUsize,
}

/// Scriptable auth API. Clones share state, so a test keeps one handle
/// while the store owns another.
#[derive(Clone)]
pub struct FakeAuthApi {
    state: Arc<FakeState>,
}

impl FakeAuthApi {
    /// Every endpoint succeeds, serving `user`.
    pub fn new(user: User) -> Self {
        Self {
            state: Arc::new(FakeState {
                user: Mutex::new(user),
                current_user: Mutex::new(Outcome::Ok),
                sign_in: Mutex::new(Outcome::Ok),
                logout: Mutex::new(Outcome::Ok),
                gate: Mutex::new(None),
                current_user_calls: AtomicUsize::new(0),
                login_calls: AtomicUsize::new(0),
                register_calls: AtomicUsize::new(0),
                logout_calls: AtomicUsize::new(0),
            }),
        }
    }

    pub fn set_user(&self, user: User) {
        *self.state.user.lock().unwrap() = user;
    }

    pub fn set_current_user(&self, outcome: Outcome) {
        *self.state.current_user.lock().unwrap() = outcome;
    }

    pub fn set_sign_in(&self, outcome: Outcome) {
        *self.state.sign_in.lock().unwrap() = outcome;
    }

    pub fn set_logout(&self, outcome: Outcome) {
        *self.state.logout.lock().unwrap() = outcome;
    }

    /// Hold every `current_user` call until the returned notify fires.
    pub fn gate_current_user(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.state.gate.lock().unwrap() = Some(Arc::clone(&notify));
        notify
    }

    pub fn current_user_calls(&self) -> usize {
        self.state.current_user_calls.load(Ordering::SeqCst)
    }

    pub fn login_calls(&self) -> usize {
        self.state.login_calls.load(Ordering::SeqCst)
    }

    pub fn register_calls(&self) -> usize {
        self.state.register_calls.load(Ordering::SeqCst)
    }

    pub fn logout_calls(&self) -> usize {
        self.state.logout_calls.load(Ordering::SeqCst)
    }

    fn answer(&self, outcome: &Mutex<Outcome>) -> Result<User> {
        match outcome.lock().unwrap().into_error() {
            Some(e) => Err(e),
            None => Ok(self.state.user.lock().unwrap().clone()),
        }
    }
}

#[async_trait]
impl AuthApi for FakeAuthApi {
    async fn login(&self, _credentials: &Credentials) -> Result<AuthResponse> {
        self.state.login_calls.fetch_add(1, Ordering::SeqCst);
        let user = self.answer(&self.state.sign_in)?;
        Ok(AuthResponse { user })
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<AuthResponse> {
        self.state.register_calls.fetch_add(1, Ordering::SeqCst);
        let user = self.answer(&self.state.sign_in)?;
        Ok(AuthResponse { user })
    }

    async fn current_user(&self) -> Result<User> {
        self.state.current_user_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.state.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.answer(&self.state.current_user)
    }

    async fn logout(&self) -> Result<()> {
        self.state.logout_calls.fetch_add(1, Ordering::SeqCst);
        match self.state.logout.lock().unwrap().into_error() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn public_settings(&self) -> Result<PublicSettings> {
        Ok(PublicSettings {
            registration_enabled: true,
            ..PublicSettings::default()
        })
    }

    async fn send_verify_code(
        &self,
        _request: &SendVerifyCodeRequest,
    ) -> Result<SendVerifyCodeResponse> {
        Ok(SendVerifyCodeResponse {
            message: Some("Verification code sent successfully".to_string()),
            countdown: 60,
        })
    }
}

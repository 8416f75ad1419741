//! Auth endpoint trait.

use async_trait::async_trait;

use crate::Result;
use crate::types::{
    AuthResponse, Credentials, PublicSettings, RegisterRequest, SendVerifyCodeRequest,
    SendVerifyCodeResponse, User,
};

/// The server operations a session store depends on.
///
/// Implementations return already-normalized errors: an expired or missing
/// session must surface as [`crate::Error::Authorization`].
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Authenticate with credentials.
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse>;

    /// Create an account and authenticate.
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse>;

    /// Fetch the user of the current session.
    async fn current_user(&self) -> Result<User>;

    /// Invalidate the server-side session.
    async fn logout(&self) -> Result<()>;

    /// Fetch configuration visible without a session.
    async fn public_settings(&self) -> Result<PublicSettings>;

    /// Request an email verification code.
    async fn send_verify_code(
        &self,
        request: &SendVerifyCodeRequest,
    ) -> Result<SendVerifyCodeResponse>;
}

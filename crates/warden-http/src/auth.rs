//! HTTP-backed implementation of the auth endpoints.

use async_trait::async_trait;
use serde::de::IgnoredAny;
use tracing::{debug, info, instrument};

use warden_core::{
    AuthApi, AuthResponse, Credentials, PublicSettings, RegisterRequest, Result,
    SendVerifyCodeRequest, SendVerifyCodeResponse, User,
};

use crate::client::ApiClient;
use crate::endpoints::{
    CURRENT_USER, LOGIN, LOGOUT, PUBLIC_SETTINGS, REGISTER, SEND_VERIFY_CODE,
};

/// [`AuthApi`] over an [`ApiClient`].
///
/// The session credential never passes through here: the server sets it as
/// a cookie on login/registration and the client's jar replays it.
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    client: ApiClient,
}

impl HttpAuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        info!("Logging in");
        self.client.post(LOGIN, credentials).await
    }

    #[instrument(skip(self, request), fields(email = %request.email()))]
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        info!("Registering account");
        self.client.post(REGISTER, request).await
    }

    #[instrument(skip(self))]
    async fn current_user(&self) -> Result<User> {
        debug!("Fetching current user");
        self.client.get(CURRENT_USER).await
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> Result<()> {
        info!("Logging out");
        let _: IgnoredAny = self.client.post_empty(LOGOUT).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn public_settings(&self) -> Result<PublicSettings> {
        debug!("Fetching public settings");
        self.client.get(PUBLIC_SETTINGS).await
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn send_verify_code(
        &self,
        request: &SendVerifyCodeRequest,
    ) -> Result<SendVerifyCodeResponse> {
        info!("Requesting verification code");
        self.client.post(SEND_VERIFY_CODE, request).await
    }
}

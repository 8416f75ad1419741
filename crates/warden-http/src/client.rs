//! HTTP client with envelope unwrapping and 401 interception.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, ORIGIN};
use reqwest::{Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, instrument, trace, warn};

use warden_core::error::{
    AuthorizationError, Error, InvalidInputError, NetworkError, StatusError,
};
use warden_core::{ApiBaseUrl, Envelope, Navigator, Result};

use crate::config::ClientConfig;
use crate::endpoints::ErrorBody;

/// HTTP client for the warden API.
///
/// Cloning is cheap and clones share the cookie jar, so every clone sends
/// the same session.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: ApiBaseUrl,
    timeout: Duration,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    /// Create a client from `config`.
    ///
    /// `navigator` receives the login redirect when the server answers 401.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured origin is not a valid header value
    /// or the HTTP client cannot be built.
    pub fn new(config: ClientConfig, navigator: Arc<dyn Navigator>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(origin) = &config.origin {
            let value = HeaderValue::from_str(origin).map_err(|e| InvalidInputError::Setting {
                key: "origin".to_string(),
                value: origin.clone(),
                reason: e.to_string(),
            })?;
            headers.insert(ORIGIN, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("warden/", env!("CARGO_PKG_VERSION")))
            .cookie_store(true)
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| InvalidInputError::Other {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url,
            timeout: config.timeout,
            navigator,
        })
    }

    /// Returns the base URL this client is configured for.
    pub fn base_url(&self) -> &ApiBaseUrl {
        &self.base_url
    }

    /// Returns the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GET `path` and unwrap the payload.
    pub async fn get<R>(&self, path: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        self.send::<(), R>(Method::GET, path, None).await
    }

    /// POST a JSON body to `path` and unwrap the payload.
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(Method::POST, path, Some(body)).await
    }

    /// POST to `path` without a body.
    pub async fn post_empty<R>(&self, path: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        self.send::<(), R>(Method::POST, path, None).await
    }

    /// Send a request and normalize the outcome.
    ///
    /// Success envelopes unwrap to their `data`; every failure comes back as
    /// a [`warden_core::Error`]. No retries.
    #[instrument(skip(self, body), fields(base = %self.base_url))]
    pub async fn send<B, R>(&self, method: Method, path: &str, body: Option<&B>) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.base_url.endpoint(path);
        debug!(%method, path, "API request");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| network_error(&e))?;
        self.handle_response(response).await
    }

    async fn handle_response<R: DeserializeOwned>(&self, response: reqwest::Response) -> Result<R> {
        let status = response.status();
        trace!(status = %status, "API response");

        let bytes = response.bytes().await.map_err(|e| network_error(&e))?;

        if status.is_success() {
            unwrap_envelope(parse_body(&bytes))
        } else {
            Err(self.error_for_status(status, &bytes))
        }
    }

    fn error_for_status(&self, status: StatusCode, bytes: &[u8]) -> Error {
        let body = ErrorBody::parse(bytes);
        let code = body.numeric_code();
        let message = match body.message {
            Some(m) if !m.is_empty() => m,
            _ => format!("Request failed with status code {}", status.as_u16()),
        };

        if status == StatusCode::UNAUTHORIZED {
            self.on_unauthorized();
            AuthorizationError {
                status: status.as_u16(),
                code,
                message,
            }
            .into()
        } else {
            StatusError {
                status: status.as_u16(),
                code,
                message,
            }
            .into()
        }
    }

    /// The one side effect of an authorization failure.
    fn on_unauthorized(&self) {
        if self.navigator.is_on_login() {
            debug!("unauthorized on login surface; redirect suppressed");
            return;
        }
        warn!(
            location = %self.navigator.current_location(),
            "session rejected by server; redirecting to login"
        );
        self.navigator.redirect_to_login();
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn network_error(err: &reqwest::Error) -> Error {
    warn!(
        error = %err,
        timeout = err.is_timeout(),
        connect = err.is_connect(),
        "request failed without a response"
    );
    NetworkError::unreachable().into()
}

/// Empty bodies read as `null`; non-JSON bodies as a JSON string.
fn parse_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// Collapse an envelope into its payload. Bodies that are not envelopes
/// pass through as-is.
fn unwrap_envelope<R: DeserializeOwned>(body: Value) -> Result<R> {
    let payload = if Envelope::<Value>::is_envelope(&body) {
        let envelope: Envelope = serde_json::from_value(body)?;
        envelope.into_result()?.unwrap_or(Value::Null)
    } else {
        body
    };

    Ok(serde_json::from_value(payload)?)
}

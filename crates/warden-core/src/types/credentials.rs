//! Login and registration inputs.
//!
//! These are sent as JSON request bodies. Secrets never appear in `Debug`
//! output so a stray `?credentials` in a log line cannot leak them.

use serde::Serialize;
use std::fmt;

/// Login credentials.
///
/// # Example
///
/// ```
/// use warden_core::Credentials;
///
/// let creds = Credentials::new("alice@example.com", "hunter22");
/// assert_eq!(creds.email(), "alice@example.com");
/// assert!(!format!("{:?}", creds).contains("hunter22"));
/// ```
#[derive(Clone, Serialize)]
pub struct Credentials {
    email: String,
    password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    turnstile_token: Option<String>,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            turnstile_token: None,
        }
    }

    /// Attach a human-verification token for servers that require one.
    pub fn with_turnstile_token(mut self, token: impl Into<String>) -> Self {
        self.turnstile_token = Some(token.into());
        self
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("turnstile_token", &self.turnstile_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Registration data.
#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    email: String,
    password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    verify_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    turnstile_token: Option<String>,
}

impl RegisterRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            verify_code: None,
            turnstile_token: None,
        }
    }

    /// Attach the emailed verification code.
    pub fn with_verify_code(mut self, code: impl Into<String>) -> Self {
        self.verify_code = Some(code.into());
        self
    }

    pub fn with_turnstile_token(mut self, token: impl Into<String>) -> Self {
        self.turnstile_token = Some(token.into());
        self
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("verify_code", &self.verify_code)
            .field("turnstile_token", &self.turnstile_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Request for an email verification code.
#[derive(Debug, Clone, Serialize)]
pub struct SendVerifyCodeRequest {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turnstile_token: Option<String>,
}

impl SendVerifyCodeRequest {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            turnstile_token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn credentials_hide_password_in_debug() {
        let creds = Credentials::new("alice@example.com", "secret123").with_turnstile_token("tok");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("alice@example.com"));
        assert!(!debug.contains("secret123"));
        assert!(!debug.contains("\"tok\""));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn credentials_serialize_without_absent_token() {
        let creds = Credentials::new("alice@example.com", "secret123");
        assert_eq!(
            serde_json::to_value(&creds).unwrap(),
            json!({"email": "alice@example.com", "password": "secret123"})
        );
    }

    #[test]
    fn register_request_serializes_verify_code() {
        let req = RegisterRequest::new("bob@example.com", "pw123456").with_verify_code("424242");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"email": "bob@example.com", "password": "pw123456", "verify_code": "424242"})
        );
        assert!(!format!("{:?}", req).contains("pw123456"));
    }
}

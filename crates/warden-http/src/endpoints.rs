//! Endpoint paths and wire-only types.

use serde::Deserialize;
use serde_json::Value;

/// POST: authenticate with credentials.
pub const LOGIN: &str = "/auth/login";

/// POST: create an account and authenticate.
pub const REGISTER: &str = "/auth/register";

/// GET: the current session's user.
pub const CURRENT_USER: &str = "/auth/me";

/// POST: invalidate the server-side session.
pub const LOGOUT: &str = "/auth/logout";

/// GET: configuration visible without a session.
pub const PUBLIC_SETTINGS: &str = "/settings/public";

/// POST: request an email verification code.
pub const SEND_VERIFY_CODE: &str = "/auth/send-verify-code";

/// Body of an error response.
///
/// Parsed leniently: error bodies come from middleware as well as handlers,
/// and `code` is not always an integer.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub code: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn parse(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_default()
    }

    pub fn numeric_code(&self) -> Option<i64> {
        self.code.as_ref().and_then(Value::as_i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_parses_numeric_code() {
        let body = ErrorBody::parse(br#"{"code": 401, "message": "Token has expired"}"#);
        assert_eq!(body.numeric_code(), Some(401));
        assert_eq!(body.message.as_deref(), Some("Token has expired"));
    }

    #[test]
    fn error_body_tolerates_string_code_and_garbage() {
        let body = ErrorBody::parse(br#"{"code": "UNAUTHORIZED"}"#);
        assert_eq!(body.numeric_code(), None);

        let body = ErrorBody::parse(b"Internal Server Error");
        assert!(body.code.is_none());
        assert!(body.message.is_none());
    }
}

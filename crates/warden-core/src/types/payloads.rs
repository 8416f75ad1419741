//! Response payloads of the auth endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::User;

/// Payload of a successful login or registration.
///
/// The server may also echo a token in the body; it is deliberately not
/// modelled. The session lives in the cookie jar only.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub user: User,
}

/// Configuration the server exposes to unauthenticated clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicSettings {
    #[serde(default)]
    pub registration_enabled: bool,
    #[serde(default)]
    pub email_verify_enabled: bool,
    #[serde(default)]
    pub turnstile_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turnstile_site_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of a successful verification-code request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendVerifyCodeResponse {
    #[serde(default)]
    pub message: Option<String>,
    /// Seconds before another code may be requested.
    pub countdown: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn auth_response_ignores_echoed_token() {
        let resp: AuthResponse = serde_json::from_value(json!({
            "access_token": "eyJhbGciOi...",
            "token_type": "Bearer",
            "user": {"id": 1, "email": "a@example.com", "role": "user"}
        }))
        .unwrap();
        assert_eq!(resp.user.id, 1);
    }

    #[test]
    fn public_settings_tolerate_missing_and_extra_fields() {
        let settings: PublicSettings = serde_json::from_value(json!({
            "registration_enabled": true,
            "turnstile_site_key": "0x4AAA",
            "contact_info": "support@example.com"
        }))
        .unwrap();
        assert!(settings.registration_enabled);
        assert!(!settings.email_verify_enabled);
        assert_eq!(settings.turnstile_site_key.as_deref(), Some("0x4AAA"));
        assert_eq!(settings.extra["contact_info"], json!("support@example.com"));
    }
}

//! The authenticated identity.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Role classification of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
    /// Any role string this client does not know. Never privileged.
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Returns true for roles that carry administrative privileges.
    pub fn is_privileged(self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// The authenticated user as reported by the server.
///
/// Always replaced wholesale; fields the client does not model are kept in
/// [`User::profile`] so nothing is lost between fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub username: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl User {
    /// Returns true if this user's role is privileged.
    pub fn is_admin(&self) -> bool {
        self.role.is_privileged()
    }

    /// Name to show for this user: the username, or the email when unset.
    pub fn display_name(&self) -> &str {
        if self.username.is_empty() {
            &self.email
        } else {
            &self.username
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_with_extra_profile_fields() {
        let user: User = serde_json::from_value(json!({
            "id": 42,
            "email": "alice@example.com",
            "username": "alice",
            "role": "admin",
            "status": "active",
            "balance": 12.5,
            "concurrency": 3
        }))
        .unwrap();

        assert_eq!(user.id, 42);
        assert!(user.is_admin());
        assert_eq!(user.status.as_deref(), Some("active"));
        assert_eq!(user.profile["balance"], json!(12.5));
        assert_eq!(user.profile["concurrency"], json!(3));
    }

    #[test]
    fn unknown_role_is_not_privileged() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "email": "bob@example.com",
            "role": "superuser"
        }))
        .unwrap();

        assert_eq!(user.role, Role::Unknown);
        assert!(!user.is_admin());
        assert_eq!(user.display_name(), "bob@example.com");
    }

    #[test]
    fn plain_user_role() {
        assert!(!Role::User.is_privileged());
        assert_eq!(Role::User.to_string(), "user");
    }
}

//! The uniform response envelope.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ApplicationError;

/// Code reported for an envelope whose `code` is not an integer.
pub const NON_NUMERIC_CODE: i64 = -1;

/// `{ code, message, data }` wrapper around every server response.
///
/// `code == 0` means success; anything else is an application-level error,
/// including codes that are not integers (read as [`NON_NUMERIC_CODE`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    #[serde(deserialize_with = "lenient_code")]
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Returns true if the envelope reports success.
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// Collapse the envelope into its payload or an [`ApplicationError`].
    ///
    /// A success envelope without `data` yields `Ok(None)`.
    pub fn into_result(self) -> Result<Option<T>, ApplicationError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(ApplicationError::new(self.code, self.message))
        }
    }
}

impl Envelope<Value> {
    /// Returns true if a JSON body looks like an envelope (an object with a
    /// `code` member). Bodies that do not are passed through untouched.
    pub fn is_envelope(body: &Value) -> bool {
        body.as_object().is_some_and(|o| o.contains_key("code"))
    }
}

fn lenient_code<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let code = match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| (n.as_f64() == Some(0.0)).then_some(0))
            .unwrap_or(NON_NUMERIC_CODE),
        _ => NON_NUMERIC_CODE,
    };
    Ok(code)
}

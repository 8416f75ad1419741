//! Transport configuration.

use std::time::Duration;

use tracing::warn;
use warden_core::error::InvalidInputError;
use warden_core::{ApiBaseUrl, Result, SchemePolicy};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the API base URL.
pub const ENV_BASE_URL: &str = "WARDEN_API_BASE_URL";

/// Environment variable holding the request timeout in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "WARDEN_API_TIMEOUT_SECS";

/// Environment variable overriding the `Origin` header.
pub const ENV_ORIGIN: &str = "WARDEN_API_ORIGIN";

/// Environment variable permitting a plain-HTTP base URL on any host.
pub const ENV_ALLOW_HTTP: &str = "WARDEN_API_ALLOW_HTTP";

/// Settings fixed for the lifetime of an [`crate::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: ApiBaseUrl,
    pub timeout: Duration,
    /// Sent as the `Origin` header on every request. Cookie-authenticated
    /// servers commonly reject requests without one.
    pub origin: Option<String>,
}

impl ClientConfig {
    /// Configuration for `base_url` with the default timeout and the base
    /// URL's own origin.
    pub fn new(base_url: ApiBaseUrl) -> Self {
        let origin = Some(base_url.origin());
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            origin,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Send no `Origin` header.
    pub fn without_origin(mut self) -> Self {
        self.origin = None;
        self
    }

    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let policy = match lookup(ENV_ALLOW_HTTP) {
            Some(value) if is_truthy(&value) => SchemePolicy::AllowHttp,
            _ => SchemePolicy::Secure,
        };

        let base_url = match lookup(ENV_BASE_URL) {
            Some(value) if !value.trim().is_empty() => {
                ApiBaseUrl::with_policy(value.trim(), policy)?
            }
            _ => ApiBaseUrl::new(DEFAULT_BASE_URL)?,
        };
        if policy == SchemePolicy::AllowHttp && !base_url.is_secure() {
            warn!(base_url = %base_url, "session cookie will be sent over plain HTTP");
        }

        let mut config = Self::new(base_url);

        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout = parse_timeout(&value)?;
        }

        if let Some(value) = lookup(ENV_ORIGIN) {
            let value = value.trim();
            config = if value.is_empty() {
                config.without_origin()
            } else {
                config.with_origin(value)
            };
        }

        Ok(config)
    }
}

/// Anything but an empty value or `0`/`false`/`no`/`off`/`n`/`f` is true.
fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty()
        || ["0", "false", "no", "off", "n", "f"]
            .iter()
            .any(|falsey| value.eq_ignore_ascii_case(falsey)))
}

fn parse_timeout(value: &str) -> Result<Duration> {
    let invalid = |reason: &str| InvalidInputError::Setting {
        key: ENV_TIMEOUT_SECS.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let secs: u64 = value
        .trim()
        .parse()
        .map_err(|_| invalid("expected a whole number of seconds"))?;
    if secs == 0 {
        return Err(invalid("must be greater than zero").into());
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:8080/api/v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.origin.as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn reads_all_variables() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "https://api.example.com/v2"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_ORIGIN, "https://app.example.com"),
        ]))
        .unwrap();
        assert_eq!(config.base_url.host(), Some("api.example.com"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.origin.as_deref(), Some("https://app.example.com"));
    }

    #[test]
    fn empty_origin_disables_header() {
        let config = ClientConfig::from_lookup(lookup(&[(ENV_ORIGIN, "")])).unwrap();
        assert!(config.origin.is_none());
    }

    #[test]
    fn rejects_bad_timeout() {
        assert!(ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "soon")])).is_err());
        assert!(ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "0")])).is_err());
    }

    #[test]
    fn lan_http_needs_allow_flag() {
        let lan = (ENV_BASE_URL, "http://192.168.1.20:8080/api/v1");
        assert!(ClientConfig::from_lookup(lookup(&[lan])).is_err());
        assert!(ClientConfig::from_lookup(lookup(&[lan, (ENV_ALLOW_HTTP, "off")])).is_err());

        let config = ClientConfig::from_lookup(lookup(&[lan, (ENV_ALLOW_HTTP, "1")])).unwrap();
        assert_eq!(config.base_url.host(), Some("192.168.1.20"));
        assert_eq!(config.origin.as_deref(), Some("http://192.168.1.20:8080"));
    }

    #[test]
    fn truthy_values() {
        for value in ["1", "true", "YES", "on"] {
            assert!(is_truthy(value), "{value}");
        }
        for value in ["", " ", "0", "False", "no", "OFF", "n", "f"] {
            assert!(!is_truthy(value), "{value:?}");
        }
    }

    #[test]
    fn rejects_bad_base_url() {
        let result = ClientConfig::from_lookup(lookup(&[(ENV_BASE_URL, "http://example.com")]));
        assert!(result.is_err());
    }
}

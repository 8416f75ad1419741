//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::{Host, Url};

use crate::error::{Error, InvalidInputError};

/// Which schemes an [`ApiBaseUrl`] may use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SchemePolicy {
    /// HTTPS, or plain HTTP to a loopback host.
    #[default]
    Secure,
    /// Plain HTTP to any host. Session cookies then travel unencrypted, so
    /// this is meant for LAN deployments without TLS.
    AllowHttp,
}

/// A validated API base URL, e.g. `https://example.com/api/v1`.
///
/// Always absolute with a host. Query and fragment are dropped and a
/// trailing slash is trimmed, so endpoint paths join cleanly.
///
/// # Example
///
/// ```
/// use warden_core::{ApiBaseUrl, SchemePolicy};
///
/// let base = ApiBaseUrl::new("https://example.com/api/v1/").unwrap();
/// assert_eq!(base.endpoint("/auth/me"), "https://example.com/api/v1/auth/me");
///
/// assert!(ApiBaseUrl::new("http://nas.lan/api/v1").is_err());
/// assert!(ApiBaseUrl::with_policy("http://nas.lan/api/v1", SchemePolicy::AllowHttp).is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiBaseUrl(Url);

impl ApiBaseUrl {
    /// Parse and validate under [`SchemePolicy::Secure`].
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        Self::with_policy(s, SchemePolicy::Secure)
    }

    /// Parse and validate under an explicit scheme policy.
    pub fn with_policy(s: impl AsRef<str>, policy: SchemePolicy) -> Result<Self, Error> {
        let s = s.as_ref();
        let invalid = |reason: String| InvalidInputError::BaseUrl {
            value: s.to_string(),
            reason,
        };

        let mut url = Url::parse(s).map_err(|e| invalid(e.to_string()))?;
        check(&url, policy).map_err(|reason| invalid(reason.to_string()))?;

        // Endpoint paths are appended, so nothing may follow the path.
        url.set_query(None);
        url.set_fragment(None);
        let trimmed = url.path().trim_end_matches('/').to_string();
        url.set_path(&trimmed);

        Ok(Self(url))
    }

    /// Returns the full URL for an endpoint path such as `/auth/login`.
    pub fn endpoint(&self, path: &str) -> String {
        // `Url` keeps a "/" path on bare hosts
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Returns true for `https` base URLs.
    pub fn is_secure(&self) -> bool {
        self.0.scheme() == "https"
    }

    /// Returns the `scheme://host[:port]` origin of this URL.
    pub fn origin(&self) -> String {
        self.0.origin().ascii_serialization()
    }
}

fn check(url: &Url, policy: SchemePolicy) -> Result<(), &'static str> {
    // Must be absolute
    if url.cannot_be_a_base() {
        return Err("must be an absolute URL");
    }

    // Must have a host
    let Some(host) = url.host() else {
        return Err("must have a host");
    };

    // Must be HTTPS unless the policy or a loopback host permits HTTP
    match (url.scheme(), policy) {
        ("https", _) => Ok(()),
        ("http", SchemePolicy::AllowHttp) => Ok(()),
        ("http", SchemePolicy::Secure) if is_loopback(&host) => Ok(()),
        ("http", SchemePolicy::Secure) => {
            Err("must use HTTPS (HTTP allowed only for loopback hosts unless opted in)")
        }
        _ => Err("scheme must be http or https"),
    }
}

fn is_loopback(host: &Host<&str>) -> bool {
    match host {
        Host::Domain(name) => name.eq_ignore_ascii_case("localhost"),
        Host::Ipv4(ip) => ip.is_loopback(),
        Host::Ipv6(ip) => ip.is_loopback(),
    }
}

impl fmt::Display for ApiBaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl FromStr for ApiBaseUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ApiBaseUrl {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ApiBaseUrl> for String {
    fn from(base: ApiBaseUrl) -> Self {
        base.0.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let base = ApiBaseUrl::new("https://example.com/api/v1").unwrap();
        assert_eq!(base.host(), Some("example.com"));
        assert_eq!(base.origin(), "https://example.com");
        assert!(base.is_secure());
    }

    #[test]
    fn loopback_http_is_allowed_by_default() {
        for url in [
            "http://localhost:8080/api/v1",
            "http://127.0.0.1:8080/api/v1",
            "http://127.0.0.2/api/v1",
            "http://[::1]:8080/api/v1",
        ] {
            let base = ApiBaseUrl::new(url).unwrap_or_else(|e| panic!("{url}: {e}"));
            assert!(!base.is_secure());
        }
        assert_eq!(
            ApiBaseUrl::new("http://localhost:8080/api/v1").unwrap().origin(),
            "http://localhost:8080"
        );
    }

    #[test]
    fn lan_http_requires_opt_in() {
        assert!(ApiBaseUrl::new("http://192.168.1.20/api/v1").is_err());
        assert!(ApiBaseUrl::new("http://nas.lan/api/v1").is_err());

        let base =
            ApiBaseUrl::with_policy("http://192.168.1.20/api/v1", SchemePolicy::AllowHttp).unwrap();
        assert_eq!(base.origin(), "http://192.168.1.20");
    }

    #[test]
    fn other_schemes_are_rejected_under_any_policy() {
        assert!(ApiBaseUrl::with_policy("ftp://example.com", SchemePolicy::AllowHttp).is_err());
        assert!(ApiBaseUrl::with_policy("file:///tmp/api", SchemePolicy::AllowHttp).is_err());
    }

    #[test]
    fn query_fragment_and_trailing_slash_are_dropped() {
        let base = ApiBaseUrl::new("https://example.com/api/v1/?debug=1#top").unwrap();
        assert_eq!(base.as_str(), "https://example.com/api/v1");
    }

    #[test]
    fn endpoint_joins_with_single_slash() {
        let base = ApiBaseUrl::new("https://example.com/api/v1/").unwrap();
        assert_eq!(
            base.endpoint("/auth/login"),
            "https://example.com/api/v1/auth/login"
        );
        assert_eq!(
            base.endpoint("settings/public"),
            "https://example.com/api/v1/settings/public"
        );
    }

    #[test]
    fn endpoint_on_bare_host() {
        let base = ApiBaseUrl::new("https://example.com").unwrap();
        assert_eq!(base.endpoint("/auth/me"), "https://example.com/auth/me");
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ApiBaseUrl::new("/api/v1").is_err());
    }

    #[test]
    fn serde_validates_on_the_way_in() {
        let base: ApiBaseUrl = serde_json::from_str(r#""https://example.com/api/v1/""#).unwrap();
        assert_eq!(
            serde_json::to_string(&base).unwrap(),
            r#""https://example.com/api/v1""#
        );
        assert!(serde_json::from_str::<ApiBaseUrl>(r#""http://example.com""#).is_err());
    }
}

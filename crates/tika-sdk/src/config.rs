//! Tika endpoint configuration

use crate::error::{Result, TikaError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Address the Tika server listens on out of the box
pub const DEFAULT_ENDPOINT: &str = "http://localhost:9998";

/// Environment variable naming the Tika endpoint (Docker link style, `tcp://host:port`)
pub const ENDPOINT_ENV_VAR: &str = "TIKA_PORT";

/// Configuration for a Tika client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TikaConfig {
    /// Tika server address; scheme and path are ignored
    pub endpoint: String,

    /// Transport timeout applied to every request
    #[serde(default)]
    pub timeout: Option<Duration>,

    /// Custom user agent
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl TikaConfig {
    /// Read the endpoint from `TIKA_PORT`
    pub fn from_env() -> Result<Self> {
        Self::from_env_var(ENDPOINT_ENV_VAR)
    }

    /// Read the endpoint from the named environment variable
    pub fn from_env_var(name: &str) -> Result<Self> {
        let endpoint = std::env::var(name)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                TikaError::config(format!(
                    "'{name}' environment variable not set; expected to find the Tika endpoint"
                ))
            })?;

        Ok(Self::with_endpoint(endpoint))
    }

    /// Create configuration for the given endpoint
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Set the transport timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }
}

impl Default for TikaConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
            user_agent: None,
        }
    }
}

/// Reduce an address to `http://[user[:password]@]host[:port]`.
///
/// Whatever scheme was given is replaced by `http` and the path is cleared.
/// An explicit port is kept even when it is the default of the old scheme.
/// Query and fragment are dropped since endpoint paths are appended to the
/// result. A bare `host:port` is accepted as well.
pub(crate) fn normalize_base_url(address: &str) -> Result<String> {
    let address = address.trim();
    let parsed = if address.contains("://") {
        Url::parse(address)?
    } else {
        Url::parse(&format!("http://{address}"))?
    };

    let host = parsed.host_str().ok_or(url::ParseError::EmptyHost)?;
    let userinfo = match (parsed.username(), parsed.password()) {
        ("", None) => String::new(),
        (user, None) => format!("{user}@"),
        (user, Some(password)) => format!("{user}:{password}@"),
    };
    let port = parsed
        .port_or_known_default()
        .map(|port| format!(":{port}"))
        .unwrap_or_default();

    // `tcp` is not a special scheme, so the scheme cannot be swapped in place.
    let base = Url::parse(&format!("http://{userinfo}{host}{port}"))?;
    Ok(base.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docker_link_address() {
        assert_eq!(
            normalize_base_url("tcp://localhost:9998").unwrap(),
            "http://localhost:9998"
        );
    }

    #[test]
    fn test_path_and_query_are_cleared() {
        assert_eq!(
            normalize_base_url("https://tika.internal:9998/tika/extra?x=1#frag").unwrap(),
            "http://tika.internal:9998"
        );
    }

    #[test]
    fn test_bare_host_and_port() {
        assert_eq!(normalize_base_url("tika:9998").unwrap(), "http://tika:9998");
    }

    #[test]
    fn test_ipv6_host() {
        assert_eq!(
            normalize_base_url("tcp://[::1]:9998").unwrap(),
            "http://[::1]:9998"
        );
    }

    #[test]
    fn test_credentials_are_kept() {
        assert_eq!(
            normalize_base_url("http://user:pw@tika:9998/tika").unwrap(),
            "http://user:pw@tika:9998"
        );
        assert_eq!(
            normalize_base_url("tcp://reader@tika:9998").unwrap(),
            "http://reader@tika:9998"
        );
    }

    #[test]
    fn test_explicit_default_port_of_old_scheme_is_kept() {
        assert_eq!(
            normalize_base_url("https://tika.internal:443").unwrap(),
            "http://tika.internal:443"
        );
        assert_eq!(
            normalize_base_url("wss://tika.internal:443/socket").unwrap(),
            "http://tika.internal:443"
        );
    }

    #[test]
    fn test_http_default_port_is_elided() {
        assert_eq!(
            normalize_base_url("http://tika.internal:80").unwrap(),
            "http://tika.internal"
        );
        assert_eq!(normalize_base_url("tcp://tika").unwrap(), "http://tika");
    }

    #[test]
    fn test_invalid_addresses() {
        assert!(matches!(normalize_base_url(""), Err(TikaError::Url(_))));
        assert!(matches!(
            normalize_base_url("http://bad host:9998"),
            Err(TikaError::Url(_))
        ));
        assert!(matches!(
            normalize_base_url("tcp://localhost:notaport"),
            Err(TikaError::Url(_))
        ));
    }

    #[test]
    fn test_config_builder() {
        let config = TikaConfig::with_endpoint("tcp://tika:9998")
            .timeout(Duration::from_secs(30))
            .user_agent("indexer/1.0");

        assert_eq!(config.endpoint, "tcp://tika:9998");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.user_agent.as_deref(), Some("indexer/1.0"));
    }

    #[test]
    fn test_default_endpoint() {
        assert_eq!(TikaConfig::default().endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_from_env_var() {
        std::env::set_var("TIKA_SDK_TEST_ENDPOINT_SET", "tcp://localhost:9998");
        let config = TikaConfig::from_env_var("TIKA_SDK_TEST_ENDPOINT_SET").unwrap();
        assert_eq!(config.endpoint, "tcp://localhost:9998");
    }

    #[test]
    fn test_from_env_var_unset() {
        std::env::remove_var("TIKA_SDK_TEST_ENDPOINT_UNSET");
        let err = TikaConfig::from_env_var("TIKA_SDK_TEST_ENDPOINT_UNSET").unwrap_err();
        assert!(matches!(err, TikaError::Config(_)));
    }

    #[test]
    fn test_from_env_var_empty() {
        std::env::set_var("TIKA_SDK_TEST_ENDPOINT_EMPTY", "  ");
        let err = TikaConfig::from_env_var("TIKA_SDK_TEST_ENDPOINT_EMPTY").unwrap_err();
        assert!(matches!(err, TikaError::Config(_)));
    }

    #[test]
    fn test_deserialize_minimal() {
        let config: TikaConfig = serde_json::from_str(r#"{"endpoint":"tcp://tika:9998"}"#).unwrap();
        assert_eq!(config, TikaConfig::with_endpoint("tcp://tika:9998"));
    }
}

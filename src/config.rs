//! Environment-driven configuration for the server and the terminal client

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_BIND: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:8000";

/// Chat proxy server settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: IpAddr,
    pub port: u16,
    /// Upper bound on reply length passed upstream; `None` uses the provider default
    pub max_tokens: Option<u32>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND,
            port: DEFAULT_PORT,
            max_tokens: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            bind: parse_var(&lookup, "HAILEY_BIND").unwrap_or(defaults.bind),
            port: parse_var(&lookup, "HAILEY_PORT").unwrap_or(defaults.port),
            max_tokens: parse_var(&lookup, "HAILEY_MAX_TOKENS"),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

/// Terminal client settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the chat proxy
    pub proxy_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            proxy_url: DEFAULT_PROXY_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            proxy_url: lookup("HAILEY_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PROXY_URL.to_string()),
        }
    }
}

/// Parse a variable, ignoring empty values. Unparseable values are logged
/// and treated as unset.
fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = lookup(name).filter(|v| !v.trim().is_empty())?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(var = name, value = %raw, "Ignoring unparseable environment variable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_server_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn test_server_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("HAILEY_BIND", "127.0.0.1"),
            ("HAILEY_PORT", " 9001 "),
            ("HAILEY_MAX_TOKENS", "512"),
        ]));
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9001");
        assert_eq!(config.max_tokens, Some(512));
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("HAILEY_BIND", "not-an-ip"),
            ("HAILEY_PORT", "eighty"),
            ("HAILEY_MAX_TOKENS", "-1"),
        ]));
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_client_url() {
        assert_eq!(ClientConfig::from_lookup(lookup(&[])).proxy_url, DEFAULT_PROXY_URL);
        assert_eq!(
            ClientConfig::from_lookup(lookup(&[("HAILEY_URL", "")])).proxy_url,
            DEFAULT_PROXY_URL
        );
        assert_eq!(
            ClientConfig::from_lookup(lookup(&[("HAILEY_URL", "http://chat.local:8080")])).proxy_url,
            "http://chat.local:8080"
        );
    }
}

//! Server addresses for candidate authorization-service replicas.

use std::fmt;
use std::str::FromStr;

use crate::error::WardenError;

/// Host and port of one candidate authorization-service replica.
///
/// Immutable once constructed. Renders and parses as `host:port`; IPv6
/// literals use the bracketed form (`[::1]:8038`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerAddress {
    host: String,
    port: u16,
}

impl ServerAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') && !self.host.starts_with('[') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for ServerAddress {
    type Err = WardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| WardenError::InvalidConfig(format!("address '{s}' has no port")))?;
        let host = host.trim_start_matches('[').trim_end_matches(']');
        if host.is_empty() {
            return Err(WardenError::InvalidConfig(format!(
                "address '{s}' has an empty host"
            )));
        }
        let port = port
            .parse::<u16>()
            .map_err(|_| WardenError::InvalidConfig(format!("address '{s}' has a bad port")))?;
        Ok(Self::new(host, port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_host_port() {
        let addr: ServerAddress = "warden.example.com:8038".parse().unwrap();
        assert_eq!(addr.host(), "warden.example.com");
        assert_eq!(addr.port(), 8038);
        assert_eq!(addr.to_string(), "warden.example.com:8038");
    }

    #[test]
    fn test_parse_ipv6_bracketed() {
        let addr: ServerAddress = "[::1]:8038".parse().unwrap();
        assert_eq!(addr.host(), "::1");
        assert_eq!(addr.to_string(), "[::1]:8038");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("no-port".parse::<ServerAddress>().is_err());
        assert!(":8038".parse::<ServerAddress>().is_err());
        assert!("host:notaport".parse::<ServerAddress>().is_err());
        assert!("host:99999".parse::<ServerAddress>().is_err());
    }
}

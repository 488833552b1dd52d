//! Configuration for the Warden client.

use std::time::Duration;

use serde::Deserialize;

use crate::error::WardenError;

fn default_connect_timeout_ms() -> u64 {
    10_000
}
fn default_rpc_timeout_ms() -> u64 {
    30_000
}
fn default_max_retries() -> u32 {
    3
}
fn default_retry_backoff_ms() -> u64 {
    100
}

/// What the HA wrapper does with the candidate cursor after a connectivity
/// failure, before reconnecting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RetryPolicy {
    /// Advance to the next candidate before reconnecting (default). Avoids
    /// hammering a replica that just dropped the connection.
    #[default]
    AdvanceThenRetry,
    /// Reconnect to the same candidate first; advance only if that fails.
    /// Useful when candidates restart quickly in place.
    RetrySameFirst,
}

/// Configuration for connecting to the Warden authorization service.
///
/// Immutable for the lifetime of a client. Can be deserialized from an
/// application config file; all fields have defaults.
///
/// ```yaml
/// warden:
///   enable_authentication: true
///   service_principal: "warden"
///   connect_timeout_ms: 10000     # default: 10000
///   rpc_timeout_ms: 30000         # default: 30000
///   max_retries: 3                # default: 3
///   retry_backoff_ms: 100         # default: 100
///   retry_policy: advance-then-retry
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Whether to perform the security handshake when connecting.
    #[serde(default)]
    pub enable_authentication: bool,
    /// The principal the service is expected to run as. Required when
    /// authentication is enabled; the handshake fails if the server reports
    /// a different principal.
    #[serde(default)]
    pub service_principal: String,
    /// Connection establishment timeout in milliseconds. Default: 10000.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Per-call timeout in milliseconds. Default: 30000.
    #[serde(default = "default_rpc_timeout_ms")]
    pub rpc_timeout_ms: u64,
    /// Total attempts an `execute` makes before reporting `Unavailable`.
    /// Default: 3.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Delay between failover attempts in milliseconds. Default: 100.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    /// Cursor behavior on failover. Default: advance-then-retry.
    #[serde(default)]
    pub retry_policy: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientConfig {
    /// Create a configuration with authentication disabled and default
    /// timeouts.
    pub fn new() -> Self {
        Self {
            enable_authentication: false,
            service_principal: String::new(),
            connect_timeout_ms: default_connect_timeout_ms(),
            rpc_timeout_ms: default_rpc_timeout_ms(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
            retry_policy: RetryPolicy::default(),
        }
    }

    /// Enable the security handshake, expecting the given service principal.
    pub fn with_authentication(mut self, service_principal: impl Into<String>) -> Self {
        self.enable_authentication = true;
        self.service_principal = service_principal.into();
        self
    }

    /// Set the connection establishment timeout in milliseconds.
    pub fn with_connect_timeout_ms(mut self, ms: u64) -> Self {
        self.connect_timeout_ms = ms;
        self
    }

    /// Set the per-call timeout in milliseconds.
    pub fn with_rpc_timeout_ms(mut self, ms: u64) -> Self {
        self.rpc_timeout_ms = ms;
        self
    }

    /// Set the total attempt budget for `execute`.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the delay between failover attempts in milliseconds.
    pub fn with_retry_backoff_ms(mut self, ms: u64) -> Self {
        self.retry_backoff_ms = ms;
        self
    }

    /// Set the cursor behavior on failover.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_millis(self.rpc_timeout_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), WardenError> {
        if self.enable_authentication && self.service_principal.is_empty() {
            return Err(WardenError::InvalidConfig(
                "service_principal is required when authentication is enabled".into(),
            ));
        }
        if self.max_retries == 0 {
            return Err(WardenError::InvalidConfig(
                "max_retries must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new();
        assert!(!config.enable_authentication);
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert_eq!(config.rpc_timeout(), Duration::from_secs(30));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_backoff(), Duration::from_millis(100));
        assert_eq!(config.retry_policy, RetryPolicy::AdvanceThenRetry);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::new()
            .with_authentication("warden")
            .with_connect_timeout_ms(500)
            .with_rpc_timeout_ms(2_000)
            .with_max_retries(5)
            .with_retry_backoff_ms(50)
            .with_retry_policy(RetryPolicy::RetrySameFirst);
        assert!(config.enable_authentication);
        assert_eq!(config.service_principal, "warden");
        assert_eq!(config.connect_timeout_ms, 500);
        assert_eq!(config.rpc_timeout_ms, 2_000);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.retry_backoff_ms, 50);
        assert_eq!(config.retry_policy, RetryPolicy::RetrySameFirst);
    }

    #[test]
    fn test_validate_rejects_auth_without_principal() {
        let mut config = ClientConfig::new();
        config.enable_authentication = true;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_retries() {
        let config = ClientConfig::new().with_max_retries(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: ClientConfig = serde_json::from_str(
            r#"{"enable_authentication": true, "service_principal": "warden", "retry_policy": "retry-same-first"}"#,
        )
        .unwrap();
        assert!(config.enable_authentication);
        assert_eq!(config.service_principal, "warden");
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_policy, RetryPolicy::RetrySameFirst);
    }
}

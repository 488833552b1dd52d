//! Credential sources for the security handshake.
//!
//! The client never provisions or renews credentials; it only presents a
//! token that an external credential-management component has already
//! established. [`CredentialSource`] is the seam for that component.

use crate::error::WardenError;

/// Environment variable [`EnvCredentials`] reads by default.
pub const DEFAULT_TOKEN_VAR: &str = "WARDEN_CLIENT_TOKEN";

/// Supplies the opaque credential presented during the security handshake.
///
/// Called once per connection attempt, so a rotating implementation can hand
/// out fresh tokens without the client noticing.
pub trait CredentialSource: Send + Sync + 'static {
    /// The current credential, or [`WardenError::AuthenticationFailed`] if
    /// none is available.
    fn token(&self) -> Result<String, WardenError>;
}

/// A fixed credential, handed over at construction.
pub struct StaticCredentials {
    token: String,
}

impl StaticCredentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl CredentialSource for StaticCredentials {
    fn token(&self) -> Result<String, WardenError> {
        Ok(self.token.clone())
    }
}

/// Reads the credential from an environment variable at handshake time.
///
/// This is the default source: an external agent keeps the variable current
/// and the client picks up the latest value on every reconnect.
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_VAR)
    }
}

impl CredentialSource for EnvCredentials {
    fn token(&self) -> Result<String, WardenError> {
        std::env::var(&self.var).map_err(|_| {
            WardenError::AuthenticationFailed(format!(
                "no credential available in ${}",
                self.var
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_credentials() {
        let source = StaticCredentials::new("secret");
        assert_eq!(source.token().unwrap(), "secret");
    }

    #[test]
    #[serial_test::serial]
    fn test_env_credentials() {
        std::env::set_var("WARDEN_TEST_TOKEN", "from-env");
        let source = EnvCredentials::new("WARDEN_TEST_TOKEN");
        assert_eq!(source.token().unwrap(), "from-env");

        std::env::remove_var("WARDEN_TEST_TOKEN");
        assert!(matches!(
            source.token(),
            Err(WardenError::AuthenticationFailed(_))
        ));
    }
}

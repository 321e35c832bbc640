//! Directory client configuration.

use serde::{Deserialize, Serialize};

use crate::error::{DirectoryError, DirectoryResult};

/// Connection settings for the identity directory.
///
/// The [`Debug`] impl redacts the token to prevent accidental credential
/// exposure in log output.
#[derive(Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Base address of the directory, e.g. `https://vault.internal:8200`.
    pub address: String,

    /// Token presented on every request.
    pub token: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Verify the directory's TLS certificate. Disabling this is only
    /// acceptable against test servers.
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_tls_verify() -> bool {
    true
}

impl DirectoryConfig {
    /// Create a config with default timeout and TLS verification.
    pub fn new(address: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            token: token.into(),
            timeout_secs: default_timeout_secs(),
            tls_verify: default_tls_verify(),
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Toggle TLS certificate verification.
    #[must_use]
    pub fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Validate the configuration before building a client from it.
    pub fn validate(&self) -> DirectoryResult<()> {
        if self.address.trim().is_empty() {
            return Err(DirectoryError::invalid_config("address must not be empty"));
        }
        if !self.address.starts_with("http://") && !self.address.starts_with("https://") {
            return Err(DirectoryError::invalid_config(format!(
                "address must be an http(s) URL, got '{}'",
                self.address
            )));
        }
        if self.token.is_empty() {
            return Err(DirectoryError::invalid_config("token must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(DirectoryError::invalid_config("timeout_secs must be > 0"));
        }
        Ok(())
    }

    /// Request timeout as a [`std::time::Duration`].
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

impl std::fmt::Debug for DirectoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryConfig")
            .field("address", &self.address)
            .field("token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("tls_verify", &self.tls_verify)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = DirectoryConfig::new("https://vault.internal:8200", "s.token");
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout_secs, 30);
        assert!(config.tls_verify);
    }

    #[test]
    fn test_rejects_empty_address() {
        let config = DirectoryConfig::new("", "s.token");
        assert!(matches!(
            config.validate(),
            Err(DirectoryError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_rejects_non_http_address() {
        let config = DirectoryConfig::new("vault.internal:8200", "s.token");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_token() {
        let config = DirectoryConfig::new("http://127.0.0.1:8200", "");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = DirectoryConfig::new("http://127.0.0.1:8200", "s.supersecret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("supersecret"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn test_serde_defaults() {
        let config: DirectoryConfig = serde_json::from_value(serde_json::json!({
            "address": "http://127.0.0.1:8200",
            "token": "s.token"
        }))
        .unwrap();
        assert_eq!(config.timeout_secs, 30);
        assert!(config.tls_verify);
    }
}

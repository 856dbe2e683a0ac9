//! Gateway configuration.
//!
//! The hash secret is operator-held key material; it must never be empty
//! and never appears in logs or responses.

use fl_03_match_engine::DEFAULT_UNREGISTER_WINDOW_HOURS;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// HMAC key for all fingerprint derivation.
    pub hash_secret: String,
    /// Plan assigned to tenants with an unknown or missing tier.
    pub default_tier: String,
    /// Document type assumed when a register carries none.
    pub default_document_type: String,
    /// Rollback window for unregister, in hours.
    pub unregister_window_hours: i64,
    /// Whether threshold warnings are dispatched at all.
    pub warnings_enabled: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            hash_secret: String::new(),
            default_tier: "free".to_string(),
            default_document_type: "INV".to_string(),
            unregister_window_hours: DEFAULT_UNREGISTER_WINDOW_HOURS,
            warnings_enabled: true,
        }
    }
}

impl GatewayConfig {
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            hash_secret: secret.into(),
            ..Self::default()
        }
    }

    /// Read configuration from `FL_*` environment variables, leaving
    /// defaults in place for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(secret) = std::env::var("FL_HASH_SECRET") {
            config.hash_secret = secret;
        }
        if let Ok(tier) = std::env::var("FL_DEFAULT_TIER") {
            config.default_tier = tier;
        }
        if let Ok(doc_type) = std::env::var("FL_DEFAULT_DOCUMENT_TYPE") {
            config.default_document_type = doc_type;
        }
        if let Ok(hours) = std::env::var("FL_UNREGISTER_WINDOW_HOURS") {
            config.unregister_window_hours = hours
                .parse()
                .map_err(|_| ConfigError::InvalidWindow(hours))?;
        }
        if let Ok(enabled) = std::env::var("FL_WARNINGS_ENABLED") {
            config.warnings_enabled = enabled
                .parse()
                .map_err(|_| ConfigError::InvalidFlag("FL_WARNINGS_ENABLED", enabled))?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hash_secret.is_empty() {
            return Err(ConfigError::MissingHashSecret);
        }
        if self.unregister_window_hours <= 0 {
            return Err(ConfigError::InvalidWindow(
                self.unregister_window_hours.to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("hash secret is required; set FL_HASH_SECRET")]
    MissingHashSecret,

    #[error("unregister window must be a positive number of hours, got {0}")]
    InvalidWindow(String),

    #[error("{0} must be true or false, got {1}")]
    InvalidFlag(&'static str, String),
}

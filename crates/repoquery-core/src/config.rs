//! Module: config
//! Responsibility: executor settings shared by every template.
//! Does not own: per-method metadata (see `model`).


use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid executor config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("max_page_size must be at least 1")]
    ZeroMaxPageSize,
}

///
/// ExecutorConfig
///
/// Every field is optional in TOML; missing fields take their defaults.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExecutorConfig {
    /// Emit a `debug!` summary of every invocation.
    pub debug: bool,

    /// Invocations slower than this are logged on `repoquery::slow_query`.
    pub slow_query_threshold_ms: Option<u64>,

    /// Largest page size a caller may request.
    pub max_page_size: Option<u32>,
}

impl ExecutorConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    pub const fn validate(&self) -> Result<(), ConfigError> {
        if matches!(self.max_page_size, Some(0)) {
            return Err(ConfigError::ZeroMaxPageSize);
        }

        Ok(())
    }

    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub const fn with_slow_query_threshold_ms(mut self, threshold: u64) -> Self {
        self.slow_query_threshold_ms = Some(threshold);
        self
    }

    #[must_use]
    pub const fn with_max_page_size(mut self, max: u32) -> Self {
        self.max_page_size = Some(max);
        self
    }
}

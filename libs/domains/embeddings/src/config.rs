use core_config::{ConfigError, FromEnv, env_flag, env_or_default, env_parse_or};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://calcifer0323-matching.hf.space";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Output size of the sentence model behind the default service. Must match
/// the `vector(N)` columns.
pub const DEFAULT_DIMENSIONS: usize = 384;

/// Settings for the remote model service, read once at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct EmbeddingConfig {
    /// When false no request ever leaves the process and vectors are all zeros
    pub enabled: bool,
    pub base_url: String,
    pub timeout: Duration,
    pub dimensions: usize,
}

impl EmbeddingConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            dimensions: DEFAULT_DIMENSIONS,
        }
    }
}

impl FromEnv for EmbeddingConfig {
    /// - `ML_ENABLE` (default true)
    /// - `ML_BASE_URL` (default [`DEFAULT_BASE_URL`]), trailing `/` stripped
    /// - `ML_TIMEOUT_SECS` (default 30, must be positive)
    /// - `ML_DIMENSIONS` (default 384)
    fn from_env() -> Result<Self, ConfigError> {
        let enabled = env_flag("ML_ENABLE", true)?;
        let base_url = env_or_default("ML_BASE_URL", DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        let timeout_secs: u64 = env_parse_or("ML_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::ParseError {
                key: "ML_TIMEOUT_SECS".to_string(),
                details: "must be greater than zero".to_string(),
            });
        }
        let dimensions = env_parse_or("ML_DIMENSIONS", DEFAULT_DIMENSIONS)?;

        Ok(Self {
            enabled,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            dimensions,
        })
    }
}

//! runtime configuration, read from the environment (and `.env` if present)

use std::env;

use tracing_subscriber::EnvFilter;

/// database file used when no url is configured
pub const DB_NAME: &str = "activities.db";
/// compatibility and reconnect options carried by the default url
pub const DB_PARAMS: &str = ";MODE=MySQL;AUTO_RECONNECT=TRUE";

pub const ENV_URL: &str = "ACTIVITYDB_URL";
pub const ENV_USER: &str = "ACTIVITYDB_USER";
pub const ENV_PASSWORD: &str = "ACTIVITYDB_PASSWORD";
pub const ENV_LOG: &str = "ACTIVITYDB_LOG";
pub const ENV_STRICT_SEED: &str = "ACTIVITYDB_STRICT_SEED";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// connection string, `sqlite:<path>[;KEY=VALUE]*`
    pub url: String,
    pub user: String,
    pub password: String,
    /// tracing filter directive
    pub log_filter: String,
    /// abort startup when seeding fails instead of carrying on
    pub strict_seed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: default_url(),
            user: String::new(),
            password: String::new(),
            log_filter: Self::FALLBACK_LOG.to_string(),
            strict_seed: false,
        }
    }
}

impl Config {
    /// filter used when nothing, or nothing valid, is configured
    pub const FALLBACK_LOG: &'static str = "warn";

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // load .env file if present

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup; missing keys
    /// fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let strict_seed = match lookup(ENV_STRICT_SEED) {
            Some(value) => parse_flag(ENV_STRICT_SEED, &value)?,
            None => defaults.strict_seed,
        };

        let url = lookup(ENV_URL)
            .map(|v| v.trim().to_string())
            .unwrap_or(defaults.url);
        if url.is_empty() {
            return Err(ConfigError::Invalid { key: ENV_URL, value: url });
        }

        Ok(Self {
            url,
            user: lookup(ENV_USER).unwrap_or(defaults.user),
            password: lookup(ENV_PASSWORD).unwrap_or(defaults.password),
            log_filter: lookup(ENV_LOG)
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_filter),
            strict_seed,
        })
    }

    /// Parse `log_filter` into a tracing filter; the error is the parser's
    /// reason, for the caller to report before falling back.
    pub fn env_filter(&self) -> Result<EnvFilter, String> {
        EnvFilter::try_new(&self.log_filter).map_err(|e| e.to_string())
    }
}

pub fn default_url() -> String {
    format!("sqlite:./{}{}", DB_NAME, DB_PARAMS)
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        }),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

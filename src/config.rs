//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default interval between challenge close sweeps (5 minutes).
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 5 * 60;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Root directory for channel configs and leaderboard messages
    pub data_dir: PathBuf,
    /// Bearer token required for admin routes
    pub admin_token: String,
    /// Seconds between challenge close sweeps
    pub sweep_interval_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let admin_token = env::var("ADMIN_TOKEN")
            .map(|v| v.trim().to_string())
            .map_err(|_| ConfigError::Missing("ADMIN_TOKEN"))?;
        if admin_token.is_empty() {
            return Err(ConfigError::Invalid("ADMIN_TOKEN", "must not be empty".to_string()));
        }

        let sweep_interval_secs = match env::var("SWEEP_INTERVAL_SECS") {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid(
                        "SWEEP_INTERVAL_SECS",
                        format!("expected a positive number of seconds, got {:?}", raw),
                    ))
                }
            },
            Err(_) => DEFAULT_SWEEP_INTERVAL_SECS,
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            admin_token,
            sweep_interval_secs,
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            data_dir: PathBuf::from("data"),
            admin_token: "test_admin_token".to_string(),
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
        }
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Directory holding `channel_{id}.json` files.
    pub fn channels_dir(&self) -> PathBuf {
        self.data_dir.join("channels")
    }

    /// Directory holding `message_{id}.txt` files.
    pub fn messages_dir(&self) -> PathBuf {
        self.data_dir.join("messages")
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("ADMIN_TOKEN", "  secret-token  ");
        env::set_var("DATA_DIR", "/tmp/carrera-data");
        env::remove_var("SWEEP_INTERVAL_SECS");
        env::remove_var("PORT");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.admin_token, "secret-token");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/carrera-data"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.sweep_interval(), Duration::from_secs(300));
        assert_eq!(
            config.channels_dir(),
            PathBuf::from("/tmp/carrera-data/channels")
        );
    }
}

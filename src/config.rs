//! Configuration management for the lending desk

use chrono::Duration;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Accepted range for `loans.duration_days`
pub const MIN_LOAN_DAYS: i64 = 1;
pub const MAX_LOAN_DAYS: i64 = 3650;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

/// Loan rules applied by the lending service
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoansConfig {
    /// Length of a loan (and of each renewal) in days
    pub duration_days: i64,
    /// Maximum number of renewals per loan
    pub max_renews: u16,
}

impl LoansConfig {
    /// Reject loan lengths outside `MIN_LOAN_DAYS..=MAX_LOAN_DAYS`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_LOAN_DAYS..=MAX_LOAN_DAYS).contains(&self.duration_days) {
            return Err(ConfigError::Message(format!(
                "loans.duration_days must be between {} and {} (got {})",
                MIN_LOAN_DAYS, MAX_LOAN_DAYS, self.duration_days
            )));
        }
        Ok(())
    }

    /// Loan length, clamped into the accepted range so a due date never
    /// precedes its loan date
    pub fn duration(&self) -> Duration {
        let days = self.duration_days.clamp(MIN_LOAN_DAYS, MAX_LOAN_DAYS);
        Duration::try_days(days).unwrap_or_else(|| Duration::days(MIN_LOAN_DAYS))
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub loans: LoansConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (e.g. LENDING_LOANS__DURATION_DAYS)
            .add_source(
                Environment::with_prefix("LENDING")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // Override server port from PORT env var if present
            .set_override_option("server.port", env::var("PORT").ok())?
            .build()?;

        Self::from_config(config)
    }

    /// Deserialize and check loan rules
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let app: AppConfig = config.try_deserialize()?;
        app.loans.validate()?;
        Ok(app)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for LoansConfig {
    fn default() -> Self {
        Self {
            duration_days: 14,
            max_renews: 2,
        }
    }
}

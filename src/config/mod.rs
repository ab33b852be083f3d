//! Application configuration module
//!
//! Configuration is read from environment variables with the `DATATRACKER`
//! prefix; nested values use a double underscore. A `.env` file is loaded
//! first when present.
//!
//! # Example
//!
//! ```no_run
//! use datatracker::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod mail;
mod server;
mod storage;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use mail::{MailConfig, MailTransport};
pub use server::{Environment, ServerConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL; in-memory stores are used when absent
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    #[serde(default)]
    pub mail: MailConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// - `DATATRACKER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `DATATRACKER__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("DATATRACKER")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.mail.validate()?;
        self.storage.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "DATATRACKER__SERVER__PORT",
        "DATATRACKER__SERVER__ENVIRONMENT",
        "DATATRACKER__DATABASE__URL",
        "DATATRACKER__MAIL__TRANSPORT",
        "DATATRACKER__MAIL__RESEND_API_KEY",
        "DATATRACKER__STORAGE__CHARTER_PATH",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn loads_defaults_without_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.port, 8080);
        assert!(config.database.is_none());
        assert_eq!(config.mail.transport, MailTransport::Log);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn reads_nested_sections() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("DATATRACKER__SERVER__PORT", "3000");
        env::set_var("DATATRACKER__DATABASE__URL", "postgresql://dt@localhost/datatracker");
        env::set_var("DATATRACKER__MAIL__TRANSPORT", "resend");
        env::set_var("DATATRACKER__MAIL__RESEND_API_KEY", "re_test");
        env::set_var("DATATRACKER__STORAGE__CHARTER_PATH", "/srv/charters");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(
            config.database.as_ref().map(|d| d.url.expose_secret().as_str()),
            Some("postgresql://dt@localhost/datatracker")
        );
        assert_eq!(config.mail.transport, MailTransport::Resend);
        assert_eq!(
            config.storage.charter_path,
            std::path::PathBuf::from("/srv/charters")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn production_flag() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("DATATRACKER__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().is_production());
    }

    #[test]
    fn invalid_section_fails_validation() {
        let config = AppConfig {
            database: Some(DatabaseConfig::new("mysql://localhost/datatracker")),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidDatabaseUrl));
    }
}

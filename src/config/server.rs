//! HTTP listener, logging and request handling settings.

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    /// Filter directive used when `RUST_LOG` is unset.
    pub log_level: String,
    pub log_json: bool,
    pub request_timeout_secs: u64,
    /// Comma-separated; unset allows any origin.
    pub cors_origins: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::default(),
            log_level: "info,datatracker=debug,sqlx=warn".to_string(),
            log_json: false,
            request_timeout_secs: 30,
            cors_origins: None,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ValidationError::InvalidAddress(addr))
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cors_origins_list(&self) -> Vec<String> {
        self.cors_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        self.socket_addr().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert!(!config.is_production());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn bad_host_port_and_timeout_are_rejected() {
        let host = ServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(matches!(host.validate(), Err(ValidationError::InvalidAddress(_))));

        let port = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_eq!(port.validate(), Err(ValidationError::InvalidPort));

        for secs in [0, 301] {
            let timeout = ServerConfig {
                request_timeout_secs: secs,
                ..Default::default()
            };
            assert_eq!(timeout.validate(), Err(ValidationError::InvalidTimeout));
        }
    }

    #[test]
    fn cors_origins_skip_blanks() {
        let config = ServerConfig {
            cors_origins: Some("https://datatracker.ietf.org, http://localhost:8000,".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.cors_origins_list(),
            vec!["https://datatracker.ietf.org", "http://localhost:8000"]
        );
        assert!(ServerConfig::default().cors_origins_list().is_empty());
    }
}

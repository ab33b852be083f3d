//! Charter text storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `charter-*-NN-MM.txt` files
    #[serde(default = "default_charter_path")]
    pub charter_path: PathBuf,

    /// Keep charter texts in memory instead of on disk
    #[serde(default)]
    pub in_memory: bool,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.in_memory && self.charter_path.as_os_str().is_empty() {
            return Err(ValidationError::InvalidCharterPath);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            charter_path: default_charter_path(),
            in_memory: false,
        }
    }
}

fn default_charter_path() -> PathBuf {
    PathBuf::from("data/charters")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_is_valid() {
        let config = StorageConfig::default();
        assert_eq!(config.charter_path, PathBuf::from("data/charters"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_path_is_rejected_unless_in_memory() {
        let mut config = StorageConfig {
            charter_path: PathBuf::new(),
            in_memory: false,
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidCharterPath));

        config.in_memory = true;
        assert!(config.validate().is_ok());
    }
}

//! Mail configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::mail::MailSettings;

use super::error::ValidationError;

/// How outgoing notifications are delivered.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MailTransport {
    /// Write messages to the log only.
    #[default]
    Log,
    /// Deliver through the Resend HTTP API.
    Resend,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    #[serde(default)]
    pub transport: MailTransport,

    /// Required for the `resend` transport
    pub resend_api_key: Option<SecretString>,

    #[serde(default = "default_resend_base_url")]
    pub resend_base_url: String,

    /// Sender of notices
    #[serde(default = "default_from")]
    pub from: String,

    /// Sender of announcements
    #[serde(default = "default_announce_from")]
    pub announce_from: String,

    /// Base URL for links to documents
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl MailConfig {
    pub fn settings(&self) -> MailSettings {
        MailSettings {
            from: self.from.clone(),
            announce_from: self.announce_from.clone(),
            base_url: self.base_url.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.transport == MailTransport::Resend {
            let key = self
                .resend_api_key
                .as_ref()
                .ok_or(ValidationError::MissingRequired("DATATRACKER__MAIL__RESEND_API_KEY"))?;
            if !key.expose_secret().starts_with("re_") {
                return Err(ValidationError::InvalidResendKey);
            }
        }
        for sender in [&self.from, &self.announce_from] {
            if !sender.contains('@') {
                return Err(ValidationError::InvalidFromEmail(sender.clone()));
            }
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            transport: MailTransport::default(),
            resend_api_key: None,
            resend_base_url: default_resend_base_url(),
            from: default_from(),
            announce_from: default_announce_from(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_resend_base_url() -> String {
    "https://api.resend.com".to_string()
}

fn default_from() -> String {
    "IETF Secretariat <ietf-secretariat-reply@ietf.org>".to_string()
}

fn default_announce_from() -> String {
    "The IESG <iesg-secretary@ietf.org>".to_string()
}

fn default_base_url() -> String {
    "https://datatracker.ietf.org".to_string()
}

fn default_timeout() -> u64 {
    30
}

//! Mail delivery through the Resend HTTP API.
//!
//! Messages are posted as plain text to `{base_url}/emails` with a bearer
//! API key. Non-2xx responses surface as [`MailError::Rejected`].

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::time::Duration;

use crate::domain::mail::OutgoingMessage;
use crate::ports::{MailError, Mailer};

#[derive(Debug, Clone)]
pub struct ResendConfig {
    api_key: Secret<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl ResendConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://api.resend.com".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: &'a [String],
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    cc: &'a [String],
    subject: &'a str,
    text: &'a str,
}

impl<'a> From<&'a OutgoingMessage> for ResendRequest<'a> {
    fn from(message: &'a OutgoingMessage) -> Self {
        Self {
            from: &message.from,
            to: &message.to,
            cc: &message.cc,
            subject: &message.subject,
            text: &message.body,
        }
    }
}

pub struct ResendMailer {
    config: ResendConfig,
    client: Client,
}

impl ResendMailer {
    pub fn new(config: ResendConfig) -> Result<Self, MailError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MailError::Transport(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    fn emails_url(&self) -> String {
        format!("{}/emails", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), MailError> {
        message
            .validate()
            .map_err(|e| MailError::InvalidMessage(e.message))?;

        let response = self
            .client
            .post(self.emails_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&ResendRequest::from(message))
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, error = %error_text, "Mail delivery rejected");
            return Err(MailError::Rejected {
                status: status.as_u16(),
                message: error_text,
            });
        }

        tracing::info!(subject = %message.subject, recipients = message.to.len(), "Mail sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> OutgoingMessage {
        OutgoingMessage {
            from: "The IESG <iesg-secretary@ietf.org>".to_string(),
            to: vec!["ietf-announce@ietf.org".to_string()],
            cc: vec![],
            subject: "WG Action: Formed Foo (foo)".to_string(),
            body: "A new IETF WG has been formed.".to_string(),
        }
    }

    #[test]
    fn request_omits_empty_cc() {
        let msg = message();
        let json = serde_json::to_value(ResendRequest::from(&msg)).unwrap();
        assert_eq!(json["text"], "A new IETF WG has been formed.");
        assert!(json.get("cc").is_none());
    }

    #[test]
    fn emails_url_ignores_trailing_slash() {
        let mailer =
            ResendMailer::new(ResendConfig::new("re_test").with_base_url("http://localhost:9/"))
                .unwrap();
        assert_eq!(mailer.emails_url(), "http://localhost:9/emails");
    }

    #[test]
    fn config_debug_does_not_leak_key() {
        let config = ResendConfig::new("re_supersecret");
        assert!(!format!("{:?}", config).contains("re_supersecret"));
    }

    #[tokio::test]
    async fn invalid_message_is_rejected_before_sending() {
        let mailer = ResendMailer::new(ResendConfig::new("re_test")).unwrap();
        let mut msg = message();
        msg.to.clear();
        let err = mailer.send(&msg).await.unwrap_err();
        assert!(matches!(err, MailError::InvalidMessage(_)));
    }
}

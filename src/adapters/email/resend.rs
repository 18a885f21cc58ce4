//! HTTP mail notifier.
//!
//! Delivers outbound complaints through the Resend HTTP mail API.
//! Attachments are base64-encoded into the request body.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

use crate::config::EmailConfig;
use crate::ports::{Notifier, NotifyError, OutboundMessage};

const API_URL: &str = "https://api.resend.com/emails";

/// Notifier implementation backed by an HTTP mail API.
#[derive(Debug, Clone)]
pub struct HttpMailNotifier {
    client: Client,
    api_key: Secret<String>,
    from_header: String,
    api_url: String,
}

impl HttpMailNotifier {
    /// Creates a notifier from email configuration.
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: Secret::new(config.api_key.clone()),
            from_header: config.from_header(),
            api_url: API_URL.to_string(),
        }
    }

    /// Overrides the API URL (for tests against a local server).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    fn build_request<'a>(&'a self, message: &'a OutboundMessage) -> SendMailRequest<'a> {
        SendMailRequest {
            from: &self.from_header,
            to: vec![message.to.clone()],
            cc: message.cc.as_ref().map(|cc| vec![cc.clone()]),
            subject: &message.subject,
            text: &message.body,
            attachments: message
                .attachments
                .iter()
                .map(|a| WireAttachment {
                    filename: a.filename.clone(),
                    content: BASE64_STANDARD.encode(&a.content),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl Notifier for HttpMailNotifier {
    async fn send(&self, message: &OutboundMessage) -> Result<(), NotifyError> {
        let request = self.build_request(message);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|err| NotifyError::Unavailable(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status,
                message: body,
            });
        }

        tracing::info!(
            to = %message.to,
            attachments = message.attachments.len(),
            "complaint mail delivered"
        );
        Ok(())
    }
}

#[derive(Serialize)]
struct SendMailRequest<'a> {
    from: &'a str,
    to: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cc: Option<Vec<String>>,
    subject: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<WireAttachment>,
}

#[derive(Serialize)]
struct WireAttachment {
    filename: String,
    content: String,
}

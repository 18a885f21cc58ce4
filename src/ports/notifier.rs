//! Notifier port - outbound complaint delivery.
//!
//! Used once per completed submission. The message shape covers what a
//! department mailbox needs: recipient, subject, plain-text body, an
//! optional CC copy to the complainant, and file attachments.

use async_trait::async_trait;
use thiserror::Error;

/// A file forwarded along with the complaint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailAttachment {
    pub filename: String,
    pub content: Vec<u8>,
}

impl MailAttachment {
    pub fn new(filename: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content,
        }
    }
}

/// One outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub cc: Option<String>,
    pub attachments: Vec<MailAttachment>,
}

impl OutboundMessage {
    /// Creates a message with no CC and no attachments.
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
            cc: None,
            attachments: Vec::new(),
        }
    }

    /// Sets the CC recipient.
    pub fn with_cc(mut self, cc: impl Into<String>) -> Self {
        self.cc = Some(cc.into());
        self
    }

    /// Adds an attachment.
    pub fn with_attachment(mut self, attachment: MailAttachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

/// Port for outbound delivery.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers one message.
    async fn send(&self, message: &OutboundMessage) -> Result<(), NotifyError>;
}

/// Delivery errors.
#[derive(Debug, Clone, Error)]
pub enum NotifyError {
    /// The delivery service could not be reached.
    #[error("notifier unavailable: {0}")]
    Unavailable(String),

    /// The delivery service rejected the message.
    #[error("delivery rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifier_is_object_safe() {
        fn _accepts_dyn(_notifier: &dyn Notifier) {}
    }

    #[test]
    fn message_builder_works() {
        let message = OutboundMessage::new("dept@example.com", "subject", "body")
            .with_cc("user@example.com")
            .with_attachment(MailAttachment::new("photo.jpg", vec![1, 2, 3]));

        assert_eq!(message.to, "dept@example.com");
        assert_eq!(message.cc.as_deref(), Some("user@example.com"));
        assert_eq!(message.attachments.len(), 1);
        assert_eq!(message.attachments[0].filename, "photo.jpg");
    }
}

use async_trait::async_trait;

use crate::services::notify::client::{NotifyError, Notifier};

/// Notifier that records outgoing mail in the log instead of sending it.
#[derive(Clone, Debug)]
pub struct LogNotifier {
    from: String,
}

impl LogNotifier {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    fn backend_name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), NotifyError> {
        if to.trim().is_empty() {
            return Err(NotifyError::InvalidRecipient(to.to_string()));
        }

        tracing::info!(
            from = %self.from,
            to = %to,
            subject = %subject,
            body_len = html.len(),
            "email queued"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_blank_recipient() {
        let notifier = LogNotifier::new("advisor@example.com");
        let err = notifier.send(" ", "subject", "<p>hi</p>").await.unwrap_err();
        assert!(matches!(err, NotifyError::InvalidRecipient(_)));
    }

    #[tokio::test]
    async fn accepts_valid_recipient() {
        let notifier = LogNotifier::new("advisor@example.com");
        assert!(notifier.send("s@example.com", "subject", "<p>hi</p>").await.is_ok());
    }
}

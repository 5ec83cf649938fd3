//! Outbound notification interface (student e-mail).
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid recipient: {0}")]
    InvalidRecipient(String),
}

/// Delivers a single HTML message to one recipient.
///
/// Delivery itself is an external concern; callers log failures and never fail the request.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    fn backend_name(&self) -> &'static str;

    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), NotifyError>;
}

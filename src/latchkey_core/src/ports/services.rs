use async_trait::async_trait;
use thiserror::Error;

use crate::domain::notification::Notification;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Failed to render notification: {0}")]
    Template(String),
    #[error("Failed to deliver notification: {0}")]
    Delivery(String),
}

/// Port trait for delivering account notifications (registration, password reset).
#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn notify(&self, notification: Notification) -> Result<(), NotificationError>;
}

use std::sync::Arc;

use latchkey_core::{Notification, NotificationError, NotificationService};
use tokio::sync::RwLock;

/// Records notifications instead of sending them.
#[derive(Debug, Clone, Default)]
pub struct MockNotificationService {
    sent: Arc<RwLock<Vec<Notification>>>,
}

impl MockNotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<Notification> {
        self.sent.read().await.clone()
    }
}

#[async_trait::async_trait]
impl NotificationService for MockNotificationService {
    async fn notify(&self, notification: Notification) -> Result<(), NotificationError> {
        tracing::debug!(user = %notification.user, kind = ?notification.kind, "recorded notification");
        self.sent.write().await.push(notification);
        Ok(())
    }
}

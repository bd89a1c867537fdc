use crate::errors::InternalError;
use crate::stores::Storage;
use crate::types::entities::{InsertActivity, InsertNotification, NotificationKind};
use std::sync::Arc;

/// Synchronous, best-effort secondary writes performed inline after a
/// primary mutation. A failed write is logged and swallowed; it is never
/// surfaced as the primary operation's failure, and the primary write is
/// not rolled back.
pub struct Fanout {
    storage: Arc<dyn Storage>,
}

impl Fanout {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Create an unread notification for the user.
    pub async fn notify(&self, user_id: i64, title: &str, message: &str, kind: NotificationKind) {
        let result = self
            .storage
            .create_notification(InsertNotification {
                user_id,
                title: title.to_string(),
                message: message.to_string(),
                kind,
            })
            .await;
        if let Err(err) = result {
            tracing::warn!(user_id, %err, "notification write failed");
        }
    }

    /// Append an audit record for the user.
    pub async fn record(&self, user_id: i64, action: &str, details: Option<String>) {
        let result = self
            .storage
            .create_activity(InsertActivity {
                user_id,
                action: action.to_string(),
                details,
            })
            .await;
        if let Err(err) = result {
            tracing::warn!(user_id, action, %err, "activity write failed");
        }
    }

    /// Flip one notification to read. Returns false for an unknown id.
    pub async fn mark_read(&self, id: i64) -> Result<bool, InternalError> {
        self.storage.mark_notification_read(id).await
    }

    /// Mark every unread notification of the user as read, one at a time.
    /// There is no batch atomicity across the individual writes.
    pub async fn mark_all_read(&self, user_id: i64) -> Result<(), InternalError> {
        let notifications = self.storage.get_notifications_by_user(user_id).await?;
        for notification in notifications.iter().filter(|n| !n.is_read) {
            self.storage.mark_notification_read(notification.id).await?;
        }
        Ok(())
    }
}

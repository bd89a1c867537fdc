use crate::api::{require_user, SessionAuth};
use crate::auth::SessionManager;
use crate::errors::ApiError;
use crate::services::Fanout;
use crate::stores::Storage;
use crate::types::dto::common::SuccessResponse;
use crate::types::dto::notifications::NotificationResponse;
use poem_openapi::param::Path;
use poem_openapi::payload::Json;
use poem_openapi::{OpenApi, Tags};
use std::sync::Arc;

/// Notification listing and read-state endpoints
pub struct NotificationsApi {
    storage: Arc<dyn Storage>,
    fanout: Arc<Fanout>,
    sessions: Arc<SessionManager>,
}

impl NotificationsApi {
    pub fn new(
        storage: Arc<dyn Storage>,
        fanout: Arc<Fanout>,
        sessions: Arc<SessionManager>,
    ) -> Self {
        Self {
            storage,
            fanout,
            sessions,
        }
    }
}

#[derive(Tags)]
enum NotificationTags {
    /// User notifications
    Notifications,
}

#[OpenApi]
impl NotificationsApi {
    /// List the caller's notifications
    #[oai(
        path = "/notifications",
        method = "get",
        tag = "NotificationTags::Notifications"
    )]
    async fn list(&self, auth: SessionAuth) -> Result<Json<Vec<NotificationResponse>>, ApiError> {
        let user = require_user(&self.sessions, &auth).await?;
        let notifications = self.storage.get_notifications_by_user(user.id).await?;
        Ok(Json(notifications.into_iter().map(Into::into).collect()))
    }

    /// Mark every unread notification of the caller as read
    #[oai(
        path = "/notifications/read-all",
        method = "patch",
        tag = "NotificationTags::Notifications"
    )]
    async fn mark_all_read(&self, auth: SessionAuth) -> Result<Json<SuccessResponse>, ApiError> {
        let user = require_user(&self.sessions, &auth).await?;
        self.fanout.mark_all_read(user.id).await?;
        Ok(Json(SuccessResponse { success: true }))
    }

    /// Mark one owned notification as read
    #[oai(
        path = "/notifications/:id/read",
        method = "patch",
        tag = "NotificationTags::Notifications"
    )]
    async fn mark_read(
        &self,
        auth: SessionAuth,
        id: Path<i64>,
    ) -> Result<Json<SuccessResponse>, ApiError> {
        let user = require_user(&self.sessions, &auth).await?;
        let Some(notification) = self.storage.get_notification(id.0).await? else {
            return Err(ApiError::not_found("Notification not found"));
        };
        if notification.user_id != user.id {
            return Err(ApiError::forbidden(
                "Forbidden: You don't have permission to update this notification",
            ));
        }
        let marked = self.fanout.mark_read(id.0).await?;
        Ok(Json(SuccessResponse { success: marked }))
    }
}

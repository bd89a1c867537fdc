use crate::api::{require_user, SessionAuth};
use crate::auth::SessionManager;
use crate::errors::ApiError;
use crate::stores::Storage;
use crate::types::dto::activities::ActivityResponse;
use poem_openapi::payload::Json;
use poem_openapi::{OpenApi, Tags};
use std::sync::Arc;

/// Audit log endpoints
pub struct ActivitiesApi {
    storage: Arc<dyn Storage>,
    sessions: Arc<SessionManager>,
}

impl ActivitiesApi {
    pub fn new(storage: Arc<dyn Storage>, sessions: Arc<SessionManager>) -> Self {
        Self { storage, sessions }
    }
}

#[derive(Tags)]
enum ActivityTags {
    /// Per-user activity log
    Activities,
}

#[OpenApi]
impl ActivitiesApi {
    /// List the caller's activities, newest first
    #[oai(path = "/activities", method = "get", tag = "ActivityTags::Activities")]
    async fn list(&self, auth: SessionAuth) -> Result<Json<Vec<ActivityResponse>>, ApiError> {
        let user = require_user(&self.sessions, &auth).await?;
        let activities = self.storage.get_activities_by_user(user.id).await?;
        Ok(Json(activities.into_iter().map(Into::into).collect()))
    }
}

use crate::api::{require_user, SessionAuth};
use crate::auth::SessionManager;
use crate::errors::ApiError;
use crate::stores::Storage;
use crate::types::dto::residents::ResidentResponse;
use crate::types::entities::ResidentSource;
use poem_openapi::param::{Path, Query};
use poem_openapi::payload::Json;
use poem_openapi::{OpenApi, Tags};
use std::sync::Arc;

/// Read-only resident registry endpoints
pub struct ResidentsApi {
    storage: Arc<dyn Storage>,
    sessions: Arc<SessionManager>,
}

impl ResidentsApi {
    pub fn new(storage: Arc<dyn Storage>, sessions: Arc<SessionManager>) -> Self {
        Self { storage, sessions }
    }
}

#[derive(Tags)]
enum ResidentTags {
    /// Resident registry lookups
    Residents,
}

#[OpenApi]
impl ResidentsApi {
    /// List residents, optionally filtered by registry source
    #[oai(path = "/residents", method = "get", tag = "ResidentTags::Residents")]
    async fn list(
        &self,
        auth: SessionAuth,
        source: Query<Option<ResidentSource>>,
    ) -> Result<Json<Vec<ResidentResponse>>, ApiError> {
        require_user(&self.sessions, &auth).await?;
        let residents = self.storage.get_residents(source.0).await?;
        Ok(Json(residents.into_iter().map(Into::into).collect()))
    }

    /// Fetch one resident record
    #[oai(path = "/residents/:id", method = "get", tag = "ResidentTags::Residents")]
    async fn get(
        &self,
        auth: SessionAuth,
        id: Path<i64>,
    ) -> Result<Json<ResidentResponse>, ApiError> {
        require_user(&self.sessions, &auth).await?;
        match self.storage.get_resident(id.0).await? {
            Some(resident) => Ok(Json(resident.into())),
            None => Err(ApiError::not_found("Resident not found")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemorySessionStore;
    use crate::stores::{seed::seed_residents, MemStorage};
    use crate::types::entities::InsertUser;
    use poem_openapi::auth::ApiKey;

    async fn setup() -> (ResidentsApi, SessionAuth) {
        let storage: Arc<dyn Storage> = Arc::new(MemStorage::new());
        seed_residents(storage.as_ref()).await.unwrap();
        let sessions = Arc::new(SessionManager::new(
            storage.clone(),
            Arc::new(MemorySessionStore::new()),
            24,
        ));
        let user = storage
            .create_user(InsertUser {
                username: "alice".to_string(),
                password_hash: "hash.salt".to_string(),
                full_name: None,
                company: None,
                role: "user".to_string(),
            })
            .await
            .unwrap();
        let token = sessions.issue(user.id).await;
        (
            ResidentsApi::new(storage, sessions),
            SessionAuth(ApiKey { key: token }),
        )
    }

    fn auth_clone(auth: &SessionAuth) -> SessionAuth {
        SessionAuth(ApiKey {
            key: auth.0.key.clone(),
        })
    }

    #[tokio::test]
    async fn test_list_filters_by_source() {
        let (api, auth) = setup().await;

        let all = api.list(auth_clone(&auth), Query(None)).await.unwrap();
        assert_eq!(all.0.len(), 6);

        let internal = api
            .list(auth_clone(&auth), Query(Some(ResidentSource::Internal)))
            .await
            .unwrap();
        assert_eq!(internal.0.len(), 3);
        assert!(internal
            .0
            .iter()
            .all(|r| r.source == ResidentSource::Internal));
    }

    #[tokio::test]
    async fn test_get_unknown_resident_is_not_found() {
        let (api, auth) = setup().await;
        let err = api.get(auth, Path(99)).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}

use crate::api::{clear_session_cookie, require_user, session_cookie, SessionAuth};
use crate::auth::{hash_password, SessionManager};
use crate::errors::ApiError;
use crate::services::Fanout;
use crate::stores::Storage;
use crate::types::dto::auth::{LoginRequest, RegisterRequest, UserResponse};
use crate::types::dto::common::MessageResponse;
use crate::types::entities::{InsertUser, NotificationKind};
use poem_openapi::{payload::Json, ApiResponse, OpenApi, Tags};
use std::sync::Arc;

/// Registration, login, and session introspection endpoints
pub struct AuthApi {
    storage: Arc<dyn Storage>,
    sessions: Arc<SessionManager>,
    fanout: Arc<Fanout>,
}

impl AuthApi {
    pub fn new(
        storage: Arc<dyn Storage>,
        sessions: Arc<SessionManager>,
        fanout: Arc<Fanout>,
    ) -> Self {
        Self {
            storage,
            sessions,
            fanout,
        }
    }
}

#[derive(Tags)]
enum AuthTags {
    /// Account registration and session management
    Authentication,
}

/// Registration succeeded; the new account is logged in immediately
#[derive(ApiResponse, Debug)]
pub enum RegisterApiResponse {
    #[oai(status = 201)]
    Created(
        Json<UserResponse>,
        #[oai(header = "Set-Cookie")] String,
    ),
}

#[derive(ApiResponse, Debug)]
pub enum LoginApiResponse {
    #[oai(status = 200)]
    Ok(
        Json<UserResponse>,
        #[oai(header = "Set-Cookie")] String,
    ),
}

#[derive(ApiResponse)]
pub enum LogoutApiResponse {
    #[oai(status = 200)]
    Ok(
        Json<MessageResponse>,
        #[oai(header = "Set-Cookie")] String,
    ),
}

#[OpenApi]
impl AuthApi {
    /// Register a new account and log it in
    #[oai(path = "/register", method = "post", tag = "AuthTags::Authentication")]
    async fn register(
        &self,
        body: Json<RegisterRequest>,
    ) -> Result<RegisterApiResponse, ApiError> {
        let body = body.0;
        if body.username.trim().is_empty() || body.password.is_empty() {
            return Err(ApiError::bad_request(
                "missing_credentials",
                "Username and password are required",
            ));
        }

        let password_hash = hash_password(&body.password)?;
        let user = self
            .storage
            .create_user(InsertUser {
                username: body.username,
                password_hash,
                full_name: body.full_name,
                company: body.company,
                role: body.role.unwrap_or_else(|| "user".to_string()),
            })
            .await?;

        self.fanout
            .notify(
                user.id,
                "Welcome to RTA",
                "Welcome to the Report Transfer Application. Start by exploring your \
                 dashboard or uploading your first document.",
                NotificationKind::Info,
            )
            .await;
        self.fanout
            .record(
                user.id,
                "User Registration",
                Some("New user account created".to_string()),
            )
            .await;

        let token = self.sessions.issue(user.id).await;
        let cookie = session_cookie(&token, self.sessions.ttl_seconds());
        Ok(RegisterApiResponse::Created(
            Json(UserResponse::from(user)),
            cookie,
        ))
    }

    /// Log in with username and password
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<LoginApiResponse, ApiError> {
        match self.sessions.login(&body.username, &body.password).await? {
            Some((user, token)) => {
                self.fanout
                    .record(
                        user.id,
                        "User Login",
                        Some("User logged in successfully".to_string()),
                    )
                    .await;
                let cookie = session_cookie(&token, self.sessions.ttl_seconds());
                Ok(LoginApiResponse::Ok(Json(UserResponse::from(user)), cookie))
            }
            None => Err(ApiError::invalid_credentials()),
        }
    }

    /// Terminate the current session
    #[oai(path = "/logout", method = "post", tag = "AuthTags::Authentication")]
    async fn logout(&self, auth: SessionAuth) -> Result<LogoutApiResponse, ApiError> {
        if let Ok(Some(user)) = self.sessions.current_user(&auth.0.key).await {
            self.fanout
                .record(
                    user.id,
                    "User Logout",
                    Some("User logged out successfully".to_string()),
                )
                .await;
        }
        self.sessions.logout(&auth.0.key).await;
        Ok(LogoutApiResponse::Ok(
            Json(MessageResponse {
                message: "Logged out successfully".to_string(),
            }),
            clear_session_cookie(),
        ))
    }

    /// Return the user owning the current session
    #[oai(path = "/user", method = "get", tag = "AuthTags::Authentication")]
    async fn current_user(&self, auth: SessionAuth) -> Result<Json<UserResponse>, ApiError> {
        let user = require_user(&self.sessions, &auth).await?;
        Ok(Json(UserResponse::from(user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SESSION_COOKIE;
    use crate::auth::MemorySessionStore;
    use crate::stores::MemStorage;
    use poem_openapi::auth::ApiKey;

    fn api() -> AuthApi {
        let storage: Arc<dyn Storage> = Arc::new(MemStorage::new());
        let sessions = Arc::new(SessionManager::new(
            storage.clone(),
            Arc::new(MemorySessionStore::new()),
            24,
        ));
        let fanout = Arc::new(Fanout::new(storage.clone()));
        AuthApi::new(storage, sessions, fanout)
    }

    fn register_request(username: &str) -> Json<RegisterRequest> {
        Json(RegisterRequest {
            username: username.to_string(),
            password: "secret123".to_string(),
            full_name: Some("Alice Example".to_string()),
            company: None,
            role: None,
        })
    }

    fn token_from_cookie(cookie: &str) -> String {
        let prefix = format!("{SESSION_COOKIE}=");
        cookie
            .strip_prefix(&prefix)
            .and_then(|rest| rest.split(';').next())
            .expect("cookie should carry a token")
            .to_string()
    }

    #[tokio::test]
    async fn test_register_returns_user_and_session_cookie() {
        let api = api();

        let RegisterApiResponse::Created(user, cookie) =
            api.register(register_request("alice")).await.unwrap();
        assert_eq!(user.0.username, "alice");
        assert_eq!(user.0.role, "user");
        assert!(cookie.starts_with(SESSION_COOKIE));
        assert!(cookie.contains("HttpOnly"));

        // The cookie token resolves to the new user straight away
        let token = token_from_cookie(&cookie);
        let me = api
            .current_user(SessionAuth(ApiKey { key: token }))
            .await
            .unwrap();
        assert_eq!(me.0.id, user.0.id);
    }

    #[tokio::test]
    async fn test_register_duplicate_username_is_rejected() {
        let api = api();
        api.register(register_request("alice")).await.unwrap();

        let err = api.register(register_request("alice")).await.unwrap_err();
        match err {
            ApiError::BadRequest(json) => {
                assert_eq!(json.0.message, "Username already exists")
            }
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_register_requires_username_and_password() {
        let api = api();
        let err = api
            .register(Json(RegisterRequest {
                username: "  ".to_string(),
                password: "secret123".to_string(),
                full_name: None,
                company: None,
                role: None,
            }))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_login_with_valid_credentials() {
        let api = api();
        api.register(register_request("alice")).await.unwrap();

        let LoginApiResponse::Ok(user, cookie) = api
            .login(Json(LoginRequest {
                username: "alice".to_string(),
                password: "secret123".to_string(),
            }))
            .await
            .unwrap();
        assert_eq!(user.0.username, "alice");
        assert!(cookie.contains("Max-Age"));
    }

    #[tokio::test]
    async fn test_login_with_bad_password_is_unauthorized() {
        let api = api();
        api.register(register_request("alice")).await.unwrap();

        let err = api
            .login(Json(LoginRequest {
                username: "alice".to_string(),
                password: "wrong".to_string(),
            }))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_logout_invalidates_session_and_clears_cookie() {
        let api = api();
        let RegisterApiResponse::Created(_, cookie) =
            api.register(register_request("alice")).await.unwrap();
        let token = token_from_cookie(&cookie);

        let LogoutApiResponse::Ok(_, clear) = api
            .logout(SessionAuth(ApiKey { key: token.clone() }))
            .await
            .unwrap();
        assert!(clear.contains("Max-Age=0"));

        let err = api
            .current_user(SessionAuth(ApiKey { key: token }))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_current_user_with_unknown_token_is_unauthorized() {
        let api = api();
        let err = api
            .current_user(SessionAuth(ApiKey {
                key: "not-a-token".to_string(),
            }))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }
}

// API layer - HTTP endpoints
pub mod activities;
pub mod auth;
pub mod documents;
pub mod notifications;
pub mod orders;
pub mod residents;

pub use activities::ActivitiesApi;
pub use auth::AuthApi;
pub use documents::DocumentsApi;
pub use notifications::NotificationsApi;
pub use orders::OrdersApi;
pub use residents::ResidentsApi;

use crate::auth::SessionManager;
use crate::errors::ApiError;
use crate::types::entities::User;
use poem_openapi::auth::ApiKey;
use poem_openapi::SecurityScheme;

/// Name of the session cookie issued on login/registration.
pub const SESSION_COOKIE: &str = "rta_session";

/// Opaque session token carried in the session cookie
#[derive(SecurityScheme)]
#[oai(ty = "api_key", key_name = "rta_session", key_in = "cookie")]
pub struct SessionAuth(pub ApiKey);

/// Resolve the session token to its user, or fail the request with 401.
/// Every protected endpoint goes through here first.
pub(crate) async fn require_user(
    sessions: &SessionManager,
    auth: &SessionAuth,
) -> Result<User, ApiError> {
    match sessions.current_user(&auth.0.key).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(ApiError::unauthenticated()),
        Err(err) => Err(err.into()),
    }
}

pub(crate) fn session_cookie(token: &str, max_age_seconds: i64) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_seconds}")
}

pub(crate) fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

use crate::errors::internal::{InternalError, ResourceError};
use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

/// Standardized error body for all API endpoints
#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Error responses shared by every endpoint. One variant per status in the
/// error taxonomy: 400 bad request / conflict, 401 unauthenticated,
/// 403 forbidden, 404 not found, 500 everything unexpected.
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Missing or invalid fields, bad file type/size, duplicate identifiers
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// No session, expired session, or bad credentials
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Valid session but the resource belongs to another user
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Unknown resource id
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Internal server error, details logged server-side only
    #[oai(status = 500)]
    Internal(Json<ErrorResponse>),
}

impl ApiError {
    pub fn bad_request(error: &str, message: impl Into<String>) -> Self {
        ApiError::BadRequest(Json(ErrorResponse {
            error: error.to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    pub fn unauthenticated() -> Self {
        ApiError::Unauthorized(Json(ErrorResponse {
            error: "unauthenticated".to_string(),
            message: "Authentication required".to_string(),
            status_code: 401,
        }))
    }

    pub fn invalid_credentials() -> Self {
        ApiError::Unauthorized(Json(ErrorResponse {
            error: "invalid_credentials".to_string(),
            message: "Invalid credentials".to_string(),
            status_code: 401,
        }))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(Json(ErrorResponse {
            error: "forbidden".to_string(),
            message: message.into(),
            status_code: 403,
        }))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(Json(ErrorResponse {
            error: "not_found".to_string(),
            message: message.into(),
            status_code: 404,
        }))
    }

    fn internal_server_error() -> Self {
        ApiError::Internal(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message: "An internal error occurred".to_string(),
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            ApiError::BadRequest(json)
            | ApiError::Unauthorized(json)
            | ApiError::Forbidden(json)
            | ApiError::NotFound(json)
            | ApiError::Internal(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// The single conversion point from internal errors to API errors.
/// Infrastructure error details are logged but not exposed to clients.
impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        match err {
            InternalError::Resource(resource) => match resource {
                ResourceError::NotFound { kind } => {
                    ApiError::not_found(format!("{} not found", capitalize(kind)))
                }
                ResourceError::Forbidden { kind } => ApiError::forbidden(format!(
                    "Forbidden: You don't have permission to access this {kind}"
                )),
                ResourceError::DuplicateUsername(username) => {
                    tracing::warn!(%username, "duplicate username attempt");
                    ApiError::bad_request("duplicate_username", "Username already exists")
                }
                ResourceError::DuplicateOrderId(code) => {
                    tracing::warn!(%code, "duplicate order code attempt");
                    ApiError::bad_request("duplicate_order_id", "Order code already exists")
                }
                ResourceError::InvalidTransition { from, to } => ApiError::bad_request(
                    "invalid_status_transition",
                    format!("Cannot change order status from '{from}' to '{to}'"),
                ),
                ResourceError::UploadRejected { reason } => {
                    ApiError::bad_request("upload_rejected", reason)
                }
            },
            other => {
                tracing::error!("unexpected internal error: {other}");
                Self::internal_server_error()
            }
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

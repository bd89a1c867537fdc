use crate::types::entities::OrderStatus;
use thiserror::Error;

/// Internal error type for store and service operations.
///
/// Separates infrastructure errors (shared) from domain errors
/// ([`ResourceError`]). Not exposed via the API - endpoints convert to
/// [`crate::errors::ApiError`], which logs infrastructure details and
/// returns a generic message instead of leaking them to clients.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error("I/O error: {operation} failed: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto { operation: String, message: String },

    #[error(transparent)]
    Resource(#[from] ResourceError),
}

impl InternalError {
    pub fn io(operation: &str, source: std::io::Error) -> Self {
        InternalError::Io {
            operation: operation.to_string(),
            source,
        }
    }

    pub fn crypto(operation: &str, message: impl Into<String>) -> Self {
        InternalError::Crypto {
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}

/// Domain errors raised by the repository and services. Each maps to a
/// specific client-visible status in the API layer.
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("{kind} not found")]
    NotFound { kind: &'static str },

    #[error("requester does not own this {kind}")]
    Forbidden { kind: &'static str },

    #[error("username already exists: {0}")]
    DuplicateUsername(String),

    #[error("order code already exists: {0}")]
    DuplicateOrderId(String),

    #[error("invalid order status transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("upload rejected: {reason}")]
    UploadRejected { reason: String },
}

impl ResourceError {
    pub fn not_found(kind: &'static str) -> InternalError {
        InternalError::Resource(ResourceError::NotFound { kind })
    }

    pub fn forbidden(kind: &'static str) -> InternalError {
        InternalError::Resource(ResourceError::Forbidden { kind })
    }

    pub fn upload_rejected(reason: impl Into<String>) -> InternalError {
        InternalError::Resource(ResourceError::UploadRejected {
            reason: reason.into(),
        })
    }
}

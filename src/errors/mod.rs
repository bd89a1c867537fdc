// Errors layer - internal error types and their API-facing translation
pub mod api;
pub mod internal;

pub use api::{ApiError, ErrorResponse};
pub use internal::{InternalError, ResourceError};

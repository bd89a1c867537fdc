use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Response carrying a human-readable status message
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response for acknowledge-style endpoints
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

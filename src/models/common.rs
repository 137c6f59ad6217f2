//! Small response shapes shared by several endpoints

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Plain acknowledgement message
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
    pub success: bool,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }
}

//! Request/response shapes exchanged with the framing layer.

use serde::{Deserialize, Serialize};

/// Operation identifiers understood by [`crate::services::PlaybackService::handle`].
pub mod operations {
    pub const PLAY_ALERT: &str = "play_alert";
    pub const PLAY_AUDIO: &str = "play_audio";
    pub const LIST_SOUNDS: &str = "list_sounds";
    pub const LIST_VOICES: &str = "list_voices";
}

/// An inbound request: an operation name plus an untyped parameter bag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolRequest {
    pub operation: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

impl ToolRequest {
    pub fn new(operation: impl Into<String>, params: serde_json::Value) -> Self {
        Self {
            operation: operation.into(),
            params,
        }
    }
}

/// The uniform outcome of a request.
///
/// Every failure is represented here with `is_error` set; nothing is
/// propagated past the boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub message: String,
    #[serde(default)]
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }
}

//! Response bodies for HTTP endpoints.

use serde::Serialize;

/// Successful read: `{"data": ...}`
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Successful create: `{"id": 1}`
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    /// Id assigned by the store
    pub id: i64,
}

/// Successful update or delete: `{"message": "..."}`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Any failure: `{"error": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Helper to create a data response
pub fn data_response<T: Serialize>(data: T) -> DataResponse<T> {
    DataResponse { data }
}

/// Helper to create a message response
pub fn message_response(message: impl Into<String>) -> MessageResponse {
    MessageResponse {
        message: message.into(),
    }
}

/// Helper to create an error response
pub fn error_response(message: impl Into<String>) -> ErrorResponse {
    ErrorResponse {
        error: message.into(),
    }
}

//! JSON response envelope
//!
//! Every body the API returns, success or failure, has the shape
//! `{"message": "...", "data": ...}` with `data` omitted when empty.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T = ()> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl ApiResponse<()> {
    /// Envelope with a message and no data.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_omitted_when_empty() {
        let body = serde_json::to_value(ApiResponse::message("Register success")).unwrap();
        assert_eq!(body, json!({ "message": "Register success" }));
    }

    #[test]
    fn test_data_serialized() {
        let body =
            serde_json::to_value(ApiResponse::with_data("ok", json!({ "id": 1 }))).unwrap();
        assert_eq!(body, json!({ "message": "ok", "data": { "id": 1 } }));
    }
}

//! Success response envelope.
//!
//! Every successful endpoint responds with
//! `{"status":"success","message":...,"data":...}`; `data` is omitted when
//! there is nothing to return. The matching error envelope lives with the
//! service error type, which knows the failure kinds.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiSuccess<T = serde_json::Value> {
    status: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T: Serialize> ApiSuccess<T> {
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success",
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiSuccess<serde_json::Value> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
            data: None,
        }
    }
}

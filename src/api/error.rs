use crate::traits::HttpResponse;
use serde_json::Value;
use std::fmt;

/// Non-success answer from the Prism API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub code: u16,
    pub error: String,
}

impl ApiError {
    /// Build from a failed response, preferring the API's own message
    pub fn from_response(response: &HttpResponse) -> Self {
        let error = serde_json::from_str::<Value>(&response.body)
            .ok()
            .and_then(|body| {
                body.pointer("/message_list/0/message")
                    .or_else(|| body.get("message"))
                    .or_else(|| body.get("error"))
                    .and_then(|m| m.as_str())
                    .map(String::from)
            })
            .unwrap_or_else(|| response.body.trim().to_string());

        Self {
            code: response.status,
            error,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] - {}", self.code, self.error)
    }
}

impl std::error::Error for ApiError {}

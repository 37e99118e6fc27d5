//! The error shape every fetch in the dashboard reports.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ClientError;

/// Used whenever no better message is available.
pub const GENERIC_MESSAGE: &str = "An unexpected error occurred";

/// A failed request, normalized for display.
///
/// `status` is `None` when the server could not be reached. `details`
/// carries the server's error body when there was one, parsed as JSON if
/// possible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiError {
    /// Create an error with only a message. An empty message is replaced by
    /// [`GENERIC_MESSAGE`].
    pub fn new(message: impl Into<String>) -> Self {
        let message: String = message.into();
        let message = if message.trim().is_empty() {
            GENERIC_MESSAGE.to_string()
        } else {
            message
        };
        Self {
            message,
            status: None,
            details: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// The request never got an HTTP response.
    pub fn is_network(&self) -> bool {
        self.status.is_none()
    }

    /// The server answered with an error status.
    pub fn is_http(&self) -> bool {
        self.status.is_some()
    }
}

impl From<ClientError> for ApiError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::APIError(status, body) => {
                let details = parse_details(&body);
                let message = details
                    .as_ref()
                    .and_then(server_message)
                    .map(str::to_string)
                    .unwrap_or_else(|| {
                        format!(
                            "Request failed with status code {}",
                            status.as_u16()
                        )
                    });
                let error = ApiError::new(message).with_status(status.as_u16());
                match details {
                    Some(details) => error.with_details(details),
                    None => error,
                }
            }
            ClientError::Decode(status, _) => {
                ApiError::new(error.to_string()).with_status(status.as_u16())
            }
            ClientError::Network(_) => ApiError::new(error.to_string()),
        }
    }
}

/// Django REST framework puts the human-readable text under `detail`; some
/// views use `message` instead.
fn server_message(details: &Value) -> Option<&str> {
    ["detail", "message"]
        .iter()
        .filter_map(|key| details.get(key).and_then(Value::as_str))
        .find(|message| !message.trim().is_empty())
}

fn parse_details(body: &str) -> Option<Value> {
    if body.trim().is_empty() {
        return None;
    }
    Some(
        serde_json::from_str(body)
            .unwrap_or_else(|_| Value::String(body.to_string())),
    )
}

//! Mapping from crate errors to HTTP responses

use crate::api::types::ErrorResponse;
use crate::core::error::BridgeError;
use crate::core::types::RequestId;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// A failed request: the error plus the id it was handled under
#[derive(Debug)]
pub struct ApiError {
    pub request_id: RequestId,
    pub error: BridgeError,
}

impl ApiError {
    pub fn new(request_id: &RequestId, error: BridgeError) -> Self {
        Self {
            request_id: request_id.clone(),
            error,
        }
    }

    /// Body that is not JSON, or JSON of the wrong shape
    pub fn rejected(request_id: &RequestId, rejection: JsonRejection) -> Self {
        Self::new(
            request_id,
            BridgeError::validation(format!("Invalid request body: {}", rejection.body_text())),
        )
    }

    pub fn status(&self) -> StatusCode {
        match self.error {
            BridgeError::Validation(_) => StatusCode::BAD_REQUEST,
            BridgeError::CommandNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error, message) = if self.error.is_client_error() {
            tracing::warn!(request_id = %self.request_id, error = %self.error, "request rejected");
            (self.error.to_string(), None)
        } else {
            // Detail stays in the server log.
            tracing::error!(request_id = %self.request_id, error = %self.error, "request failed");
            (
                "Internal server error".to_string(),
                Some(format!(
                    "Unexpected failure, see server logs for request {}",
                    self.request_id
                )),
            )
        };

        let body = ErrorResponse {
            success: false,
            error,
            message,
            request_id: self.request_id,
            timestamp: chrono::Utc::now(),
        };
        (status, Json(body)).into_response()
    }
}

//! HTTP error mapping for the router API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use super::types::ApiErrorBody;
use crate::dispatch::DispatchError;

/// Envelope wrapping every error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub error: ApiErrorBody,
}

/// API-level error with its HTTP status.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ApiErrorBody,
}

impl ApiError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ApiErrorBody {
                message: message.into(),
                r#type: "invalid_request_error".to_string(),
                code: None,
            },
        }
    }
}

impl From<DispatchError> for ApiError {
    fn from(error: DispatchError) -> Self {
        let (status, code) = match &error {
            DispatchError::Timeout => (StatusCode::GATEWAY_TIMEOUT, "timeout"),
            DispatchError::BackendError { .. } => (StatusCode::BAD_GATEWAY, "backend_error"),
            DispatchError::AllBackendsUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "all_backends_unavailable")
            }
            DispatchError::NotConfigured(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "not_configured")
            }
        };

        Self {
            status,
            body: ApiErrorBody {
                message: error.to_string(),
                r#type: "router_error".to_string(),
                code: Some(code.to_string()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorEnvelope { error: self.body })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_maps_to_504() {
        let error: ApiError = DispatchError::Timeout.into();
        assert_eq!(error.status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(error.body.code.as_deref(), Some("timeout"));
    }

    #[test]
    fn backend_error_maps_to_502() {
        let error: ApiError = DispatchError::BackendError {
            detail: "boom".to_string(),
        }
        .into();
        assert_eq!(error.status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn all_unavailable_maps_to_503() {
        let error: ApiError = DispatchError::AllBackendsUnavailable.into();
        assert_eq!(error.status, StatusCode::SERVICE_UNAVAILABLE);
    }
}

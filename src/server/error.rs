//! Error-to-HTTP response conversion.
//!
//! Handlers return `Result<_, ApiError>`. The body is always
//! `{"message": ...}`, plus a `result` flag on the routes that report one.
//! Internal details are logged and never sent to the caller.

use angle_catalog_common::Error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Message used for every missing-record response.
pub const NOT_FOUND_MESSAGE: &str = "Angle not found";

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    result: Option<bool>,
    source: Option<Error>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            result: None,
            source: None,
        }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE).with_result(false)
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Authentication required")
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// A 500 with a fixed public message; `source` is only logged.
    pub fn internal(message: impl Into<String>, source: Error) -> Self {
        Self {
            source: Some(source),
            ..Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
        }
    }

    /// Map a catalog error: missing records become 404, anything else a 500
    /// carrying `message`.
    pub fn from_catalog(err: Error, message: &str) -> Self {
        match err {
            Error::NotFound(_) => Self::not_found(),
            other => Self::internal(message, other),
        }
    }

    pub fn with_result(mut self, result: bool) -> Self {
        self.result = Some(result);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            match self.source {
                Some(ref source) => tracing::error!(
                    status = %self.status,
                    error = %source,
                    "{}", self.message
                ),
                None => tracing::error!(status = %self.status, "{}", self.message),
            }
        }

        let body = match self.result {
            Some(result) => json!({ "message": self.message, "result": result }),
            None => json!({ "message": self.message }),
        };

        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_produces_404_with_result_flag() {
        let response = ApiError::not_found().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Angle not found");
        assert_eq!(json["result"], false);
    }

    #[tokio::test]
    async fn internal_hides_source() {
        let err = ApiError::internal("Error fetching angles", Error::database("disk I/O error"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json, json!({ "message": "Error fetching angles" }));
    }

    #[test]
    fn from_catalog_maps_not_found() {
        let err = ApiError::from_catalog(Error::not_found("angle"), "boom");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err = ApiError::from_catalog(Error::invalid_input("price"), "boom");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "boom");
    }
}

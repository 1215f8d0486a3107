use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt::Display;
use thiserror::Error;

/// Client-facing message for every 404.
pub const NOT_FOUND_MESSAGE: &str = "Can not find Resources";
/// Client-facing message for every 422.
pub const UNPROCESSABLE_MESSAGE: &str = "Can not process the request";

/// The only two errors a client ever sees.
///
/// The `String` carries the internal cause for the logs; it is never rendered
/// into the response body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unprocessable: {0}")]
    Unprocessable(String),
}

impl ApiError {
    pub fn not_found(cause: impl Display) -> Self {
        ApiError::NotFound(cause.to_string())
    }

    pub fn unprocessable(cause: impl Display) -> Self {
        ApiError::Unprocessable(cause.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

/// Converts our `ApiError` into the generic JSON error response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::NotFound(cause) => {
                tracing::debug!(%cause, "Request answered with 404.");
                NOT_FOUND_MESSAGE
            }
            ApiError::Unprocessable(cause) => {
                tracing::warn!(%cause, "Request answered with 422.");
                UNPROCESSABLE_MESSAGE
            }
        };

        let body = Json(json!({
            "success": false,
            "error": status.as_u16(),
            "message": message,
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn render(error: ApiError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_hides_the_cause() {
        let (status, body) = render(ApiError::not_found("relation \"questions\" does not exist")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({ "success": false, "error": 404, "message": "Can not find Resources" })
        );
    }

    #[tokio::test]
    async fn unprocessable_has_the_generic_body() {
        let (status, body) = render(ApiError::unprocessable("EOF while parsing")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body,
            json!({ "success": false, "error": 422, "message": "Can not process the request" })
        );
    }
}

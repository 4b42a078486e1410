/**
 * Error Conversion
 *
 * `ApiError` implements `IntoResponse` so handlers can return it directly.
 *
 * # Response Format
 *
 * Validation failures:
 * ```json
 * { "errors": [{ "msg": "Please include a valid email", "param": "email" }] }
 * ```
 *
 * Everything else:
 * ```json
 * { "msg": "Token is not valid" }
 * ```
 */

use axum::{
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::types::ApiError;
use crate::shared::{ErrorsBody, MessageBody};

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        match self {
            ApiError::Validation(errors) => (status, Json(ErrorsBody { errors })).into_response(),
            other => (status, Json(MessageBody::new(other.message()))).into_response(),
        }
    }
}

//! HTTP rendering of board API errors

use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::{ApiError, ErrorBody};

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody::from(&self));
        (status, body).into_response()
    }
}

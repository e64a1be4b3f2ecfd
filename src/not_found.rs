//! The response for requests that do not match any route.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The fallback route handler, responds with a 404 status and a JSON error.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// A 404 response with a JSON error body.
pub fn get_404_not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "the requested resource could not be found" })),
    )
        .into_response()
}

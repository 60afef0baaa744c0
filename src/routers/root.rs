use axum::{Json, http::StatusCode, response::IntoResponse};

use crate::controllers::RootController;
use crate::models::error::ErrorResponse;

pub async fn health_check_route() -> impl IntoResponse {
    RootController::health_check().await
}

pub async fn not_found_route() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new(404, "Not found")))
}

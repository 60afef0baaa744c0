use axum::{Json, response::IntoResponse};
use chrono::Utc;
use serde_json::json;

pub const SERVICE_NAME: &str = "PublicMusicService";
pub const SERVICE_VERSION: &str = "1.0.0";

pub struct RootController;

impl RootController {
    pub async fn health_check() -> impl IntoResponse {
        Json(json!({
            "status": "ok",
            "service": SERVICE_NAME,
            "version": SERVICE_VERSION,
            "timestamp": Utc::now().timestamp(),
        }))
    }
}

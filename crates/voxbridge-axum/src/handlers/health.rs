//! `GET /` liveness answer.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// `GET /`
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        message: "voxbridge TTS bridge running",
    })
}

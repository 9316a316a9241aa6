//! `POST /applio_tts`: text in, WAV out.
//!
//! Each request gets its own temp directory so the synthesizer can copy the
//! finished audio somewhere private. The directory is removed when the
//! response has been built.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::{info, warn};
use voxbridge_core::SynthesisRequest;

use crate::error::HttpError;
use crate::fallback::silence_wav;
use crate::state::AppState;

/// File name offered to the client.
const DOWNLOAD_NAME: &str = "tts_output.wav";

/// Request body. Only `text` is required; the rest override the server's
/// defaults for this call.
#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default, alias = "applioModel")]
    pub model: Option<String>,
    #[serde(default, alias = "applioVoice", alias = "voicePath")]
    pub voice_path: Option<String>,
    #[serde(default, alias = "applioPitch")]
    pub pitch: Option<i32>,
    #[serde(default)]
    pub speed: Option<i32>,
}

/// `POST /applio_tts`
pub async fn synthesize(
    State(state): State<AppState>,
    body: Result<Json<TtsRequest>, JsonRejection>,
) -> Result<Response, HttpError> {
    let Json(body) = body?;
    let text = body.text.trim();
    if text.is_empty() {
        return Err(HttpError::BadRequest("No text provided".to_string()));
    }

    if !state.synth.check_connection().await {
        return degrade(
            &state,
            HttpError::ServiceUnavailable("Applio is not reachable".to_string()),
        );
    }

    let workdir = tempfile::Builder::new().prefix("voxbridge-").tempdir()?;
    let output = workdir
        .path()
        .join(format!("{}.wav", chrono::Utc::now().timestamp_millis()));

    let voice_model = body
        .model
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(state.voice_model.as_str());
    info!(
        target: "voxbridge.axum",
        chars = text.chars().count(),
        voice_model,
        voice_path = body.voice_path.as_deref(),
        pitch = body.pitch,
        "TTS request"
    );

    let mut request = SynthesisRequest::new(text, voice_model).with_output_path(&output);
    request.voice_path.clone_from(&body.voice_path);
    request.pitch = body.pitch;
    request.speed = body.speed;
    let Some(audio) = state.synth.synthesize(&request).await else {
        return degrade(
            &state,
            HttpError::Internal("Applio produced no audio".to_string()),
        );
    };

    match tokio::fs::read(&audio.path).await {
        Ok(bytes) => Ok(wav_response(bytes)),
        Err(e) => {
            warn!(
                target: "voxbridge.axum",
                path = %audio.path.display(),
                error = %e,
                "Synthesized audio is not readable"
            );
            degrade(
                &state,
                HttpError::Internal("Synthesized audio is not readable".to_string()),
            )
        }
    }
}

/// Serve the silent clip when enabled, otherwise fail with `error`.
fn degrade(state: &AppState, error: HttpError) -> Result<Response, HttpError> {
    if !state.fallback_silence {
        warn!(target: "voxbridge.axum", error = %error, "TTS request failed");
        return Err(error);
    }

    warn!(target: "voxbridge.axum", error = %error, "Serving silent placeholder audio");
    let bytes = silence_wav().map_err(|e| HttpError::Internal(format!("placeholder audio: {e}")))?;
    Ok(wav_response(bytes))
}

fn wav_response(bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "audio/wav".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={DOWNLOAD_NAME}"),
            ),
        ],
        bytes,
    )
        .into_response()
}

//! Synthesis request and result types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Voice model used when a caller does not pick one.
pub const DEFAULT_VOICE_MODEL: &str = "fr-FR-RemyMultilingualNeural";

/// A single text-to-speech request.
///
/// Built fresh for every call and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisRequest {
    /// Text to speak.
    pub text: String,
    /// Voice model identifier understood by the remote engine.
    pub voice_model: String,
    /// Where the finished audio should be copied. `None` leaves it where the
    /// remote engine wrote it.
    pub output_path: Option<PathBuf>,
    /// RVC voice weights on the engine's machine. `None` keeps the template's.
    #[serde(default)]
    pub voice_path: Option<String>,
    /// Pitch shift in semitones.
    #[serde(default)]
    pub pitch: Option<i32>,
    /// Speech rate adjustment, in percent.
    #[serde(default)]
    pub speed: Option<i32>,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>, voice_model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice_model: voice_model.into(),
            output_path: None,
            voice_path: None,
            pitch: None,
            speed: None,
        }
    }

    #[must_use]
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_voice_path(mut self, voice_path: impl Into<String>) -> Self {
        self.voice_path = Some(voice_path.into());
        self
    }

    #[must_use]
    pub const fn with_pitch(mut self, pitch: i32) -> Self {
        self.pitch = Some(pitch);
        self
    }

    #[must_use]
    pub const fn with_speed(mut self, speed: i32) -> Self {
        self.speed = Some(speed);
        self
    }

    /// First `max_chars` characters of the text, for log lines.
    pub fn text_preview(&self, max_chars: usize) -> String {
        self.text.chars().take(max_chars).collect()
    }
}

/// Audio produced by a successful synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizedAudio {
    /// Location of the audio file.
    pub path: PathBuf,
    /// `true` when the file was copied to the requested output path. `false`
    /// means `path` is the engine's own output reference, either because no
    /// destination was requested or because copying failed.
    pub materialized: bool,
}

impl SynthesizedAudio {
    /// Audio copied into the caller's destination.
    pub fn materialized(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            materialized: true,
        }
    }

    /// Audio left at the engine's source reference.
    pub fn at_source(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            materialized: false,
        }
    }
}

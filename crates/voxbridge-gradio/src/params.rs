//! Parameter vector templates for the queue-join payload.
//!
//! A Gradio function receives its inputs as a positional array. The layout is
//! whatever the remote UI declares, so it is data here: a list of slots that
//! are either literal JSON values or placeholders filled from the request.

use std::path::Path;

use serde_json::Value;
use voxbridge_core::SynthesisRequest;

use crate::error::{GradioError, GradioResult};

/// Install root of the remote Applio checkout.
pub const DEFAULT_APPLIO_ROOT: &str = r"C:\applio2\Applio";

/// RVC voice weights, relative to the Applio root.
pub const DEFAULT_VOICE_PATH: &str = r"logs\VOCES\RemyOriginal.pth";

/// Placeholder string for the text slot in template files.
const TEXT_PLACEHOLDER: &str = "{text}";

/// Placeholder string for the voice model slot in template files.
const VOICE_MODEL_PLACEHOLDER: &str = "{voice_model}";

const VOICE_PATH_PLACEHOLDER: &str = "{voice_path}";
const PITCH_PLACEHOLDER: &str = "{pitch}";
const SPEED_PLACEHOLDER: &str = "{speed}";

/// One position in the parameter vector.
///
/// The optional per-request slots carry the value sent when the request
/// leaves them unset.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// The request text.
    Text,
    /// The request voice model.
    VoiceModel,
    /// RVC voice weights.
    VoicePath(Value),
    /// Pitch shift in semitones.
    Pitch(Value),
    /// Speech rate adjustment.
    Speed(Value),
    /// A fixed value sent as-is.
    Value(Value),
}

impl Slot {
    fn from_json(value: Value) -> Self {
        match value.as_str() {
            Some(TEXT_PLACEHOLDER) => Self::Text,
            Some(VOICE_MODEL_PLACEHOLDER) => Self::VoiceModel,
            Some(VOICE_PATH_PLACEHOLDER) => Self::VoicePath(Value::from(DEFAULT_VOICE_PATH)),
            Some(PITCH_PLACEHOLDER) => Self::Pitch(Value::from(0)),
            Some(SPEED_PLACEHOLDER) => Self::Speed(Value::from(0)),
            _ => Self::Value(value),
        }
    }

    fn render(&self, request: &SynthesisRequest) -> Value {
        match self {
            Self::Text => Value::from(request.text.as_str()),
            Self::VoiceModel => Value::from(request.voice_model.as_str()),
            Self::VoicePath(fallback) => request
                .voice_path
                .as_deref()
                .map_or_else(|| fallback.clone(), Value::from),
            Self::Pitch(fallback) => request.pitch.map_or_else(|| fallback.clone(), Value::from),
            Self::Speed(fallback) => request.speed.map_or_else(|| fallback.clone(), Value::from),
            Self::Value(value) => value.clone(),
        }
    }
}

/// Ordered parameter layout for one remote function.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterTemplate {
    slots: Vec<Slot>,
}

impl ParameterTemplate {
    /// Build a template from explicit slots.
    ///
    /// Fails unless exactly one slot carries the text.
    pub fn new(slots: Vec<Slot>) -> GradioResult<Self> {
        let text_slots = slots.iter().filter(|slot| **slot == Slot::Text).count();
        if text_slots != 1 {
            return Err(GradioError::Template {
                message: format!("expected exactly one {TEXT_PLACEHOLDER} slot, found {text_slots}"),
            });
        }
        Ok(Self { slots })
    }

    /// The 25-slot layout of Applio's TTS tab.
    ///
    /// `root` is the Applio install directory on the machine running Applio;
    /// the intermediate outputs are written below it. `voice_path` is used
    /// when a request does not name its own weights.
    pub fn applio_tts(root: &str, voice_path: &str) -> Self {
        let root = root.trim_end_matches(['\\', '/']);
        let slots = vec![
            Slot::Value(Value::Bool(true)),
            Slot::Value(Value::from("")),
            Slot::Text,
            Slot::VoiceModel,
            Slot::Speed(Value::from(0)),
            Slot::Pitch(Value::from(0)),
            Slot::Value(Value::from(0.75)),
            Slot::Value(Value::from(1)),
            Slot::Value(Value::from(0.5)),
            Slot::Value(Value::from(128)),
            Slot::Value(Value::from("rmvpe")),
            Slot::Value(Value::from(format!(r"{root}\assets\audios\tts_output.wav"))),
            Slot::Value(Value::from(format!(r"{root}\assets\audios\tts_rvc_output.wav"))),
            Slot::VoicePath(Value::from(voice_path)),
            Slot::Value(Value::from("")),
            Slot::Value(Value::Bool(false)),
            Slot::Value(Value::Bool(false)),
            Slot::Value(Value::from(1)),
            Slot::Value(Value::Bool(true)),
            Slot::Value(Value::from(0.5)),
            Slot::Value(Value::from("WAV")),
            Slot::Value(Value::Null),
            Slot::Value(Value::from("contentvec")),
            Slot::Value(Value::Null),
            Slot::Value(Value::from(0)),
        ];
        Self { slots }
    }

    /// Parse a template from a JSON array.
    ///
    /// The strings `"{text}"`, `"{voice_model}"`, `"{voice_path}"`,
    /// `"{pitch}"` and `"{speed}"` mark the placeholder slots; every other
    /// element is sent verbatim.
    pub fn from_json_str(json: &str) -> GradioResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Array(items) = value else {
            return Err(GradioError::Template {
                message: "template must be a JSON array".to_string(),
            });
        };
        Self::new(items.into_iter().map(Slot::from_json).collect())
    }

    /// Load a template from a JSON file.
    pub fn from_json_file(path: &Path) -> GradioResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Fill the placeholders from `request`.
    pub fn render(&self, request: &SynthesisRequest) -> Vec<Value> {
        self.slots.iter().map(|slot| slot.render(request)).collect()
    }

    /// Number of positions in the vector.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the template has no positions.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for ParameterTemplate {
    fn default() -> Self {
        Self::applio_tts(DEFAULT_APPLIO_ROOT, DEFAULT_VOICE_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use voxbridge_core::DEFAULT_VOICE_MODEL;

    #[test]
    fn test_default_layout() {
        let template = ParameterTemplate::default();
        assert_eq!(template.len(), 25);

        let data = template.render(&SynthesisRequest::new("Hola", DEFAULT_VOICE_MODEL));
        assert_eq!(data[0], Value::Bool(true));
        assert_eq!(data[2], "Hola");
        assert_eq!(data[3], DEFAULT_VOICE_MODEL);
        assert_eq!(data[10], "rmvpe");
        assert_eq!(data[11], r"C:\applio2\Applio\assets\audios\tts_output.wav");
        assert_eq!(data[12], r"C:\applio2\Applio\assets\audios\tts_rvc_output.wav");
        assert_eq!(data[13], DEFAULT_VOICE_PATH);
        assert_eq!(data[21], Value::Null);
        assert_eq!(data[24], 0);
    }

    #[test]
    fn test_request_voice_options_fill_their_slots() {
        let request = SynthesisRequest::new("Hola", DEFAULT_VOICE_MODEL)
            .with_voice_path(r"logs\VOCES\Other.pth")
            .with_pitch(-4)
            .with_speed(15);
        let data = ParameterTemplate::default().render(&request);

        assert_eq!(data[4], 15);
        assert_eq!(data[5], -4);
        assert_eq!(data[13], r"logs\VOCES\Other.pth");
        assert_eq!(data[6], 0.75);
    }

    #[test]
    fn test_unset_voice_options_use_template_values() {
        let data = ParameterTemplate::default().render(&SynthesisRequest::new("Hola", DEFAULT_VOICE_MODEL));
        assert_eq!(data[4], 0);
        assert_eq!(data[5], 0);
        assert_eq!(data[13], DEFAULT_VOICE_PATH);
    }

    #[test]
    fn test_from_json_voice_option_placeholders() {
        let template =
            ParameterTemplate::from_json_str(r#"["{text}", "{voice_path}", "{pitch}", "{speed}"]"#)
                .unwrap();

        let data = template.render(&SynthesisRequest::new("x", "m").with_pitch(2));
        assert_eq!(data, vec![
            Value::from("x"),
            Value::from(DEFAULT_VOICE_PATH),
            Value::from(2),
            Value::from(0),
        ]);
    }

    #[test]
    fn test_custom_root_trailing_separator() {
        let template = ParameterTemplate::applio_tts(r"D:\Applio\", "voice.pth");
        let data = template.render(&SynthesisRequest::new("x", "m"));
        assert_eq!(data[11], r"D:\Applio\assets\audios\tts_output.wav");
        assert_eq!(data[13], "voice.pth");
    }

    #[test]
    fn test_from_json_placeholders() {
        let template =
            ParameterTemplate::from_json_str(r#"["{voice_model}", 0.5, "{text}", null]"#).unwrap();
        let data = template.render(&SynthesisRequest::new("bonjour", "fr-FR-Remy"));
        assert_eq!(data, vec![
            Value::from("fr-FR-Remy"),
            Value::from(0.5),
            Value::from("bonjour"),
            Value::Null,
        ]);
    }

    #[test]
    fn test_from_json_rejects_non_array() {
        let result = ParameterTemplate::from_json_str(r#"{"data": []}"#);
        assert!(matches!(result, Err(GradioError::Template { .. })));
    }

    #[test]
    fn test_from_json_requires_text_slot() {
        let result = ParameterTemplate::from_json_str(r#"["{voice_model}", 1]"#);
        assert!(matches!(result, Err(GradioError::Template { .. })));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["{{text}}", true]"#).unwrap();

        let template = ParameterTemplate::from_json_file(file.path()).unwrap();
        assert_eq!(template.len(), 2);
    }
}

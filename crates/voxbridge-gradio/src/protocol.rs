//! Wire shapes of the Gradio queue protocol.
//!
//! Only the fields this client reads are modelled. Unknown fields are
//! ignored and unknown message kinds parse as [`QueueMessage::Unknown`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use voxbridge_core::SessionHandle;

// ============================================================================
// Queue join
// ============================================================================

/// Body of `POST /queue/join`.
#[derive(Debug, Serialize)]
pub(crate) struct JoinPayload<'a> {
    pub data: &'a [Value],
    /// Always `null` for programmatic calls.
    pub event_data: Option<Value>,
    pub fn_index: u32,
    pub session_hash: &'a SessionHandle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_id: Option<u32>,
}

/// Body returned by an accepted join.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct JoinResponse {
    /// Replacement session handle, when the server assigns one.
    #[serde(default)]
    pub session_hash: Option<SessionHandle>,
    /// Identifier of the queued task.
    #[serde(default)]
    pub event_id: Option<String>,
}

impl JoinResponse {
    /// Keep whichever fields of an accepted join's body are readable strings.
    pub fn salvage(answer: &Value) -> Self {
        let text = |key: &str| answer.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            session_hash: text("session_hash").map(SessionHandle::new),
            event_id: text("event_id"),
        }
    }
}

// ============================================================================
// Event stream
// ============================================================================

/// A message received on the `queue/data` event stream, tagged by `msg`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "msg", rename_all = "snake_case")]
pub enum QueueMessage {
    SendHash,
    Estimation {
        #[serde(default)]
        rank: Option<u64>,
        #[serde(default)]
        queue_size: Option<u64>,
        #[serde(default)]
        rank_eta: Option<f64>,
    },
    ProcessStarts {
        #[serde(default)]
        event_id: Option<String>,
    },
    Progress,
    Heartbeat,
    Log {
        #[serde(default)]
        log: Option<String>,
        #[serde(default)]
        level: Option<String>,
    },
    ProcessGenerating,
    /// Terminal message of a task; the only kind that carries outputs.
    ProcessCompleted {
        #[serde(default)]
        event_id: Option<String>,
        #[serde(default)]
        success: Option<bool>,
        #[serde(default)]
        output: Option<CompletionOutput>,
    },
    /// The server is done with this session's stream.
    CloseStream,
    UnexpectedError {
        #[serde(default)]
        message: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

/// The `output` object of a completion message.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CompletionOutput {
    /// Output references, one per output component.
    #[serde(default)]
    pub data: Vec<OutputRef>,
    /// Error payload reported by the remote function.
    #[serde(default)]
    pub error: Option<Value>,
}

/// One entry of a completion's output list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OutputRef {
    /// A bare file path.
    Path(String),
    /// A file object (`path`, `url`, `orig_name`, ...).
    File { path: String },
    /// Anything else: numbers, nulls, text without a path.
    Other(Value),
}

impl OutputRef {
    /// The referenced path, if this entry names one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Path(path) | Self::File { path } => Some(path),
            Self::Other(_) => None,
        }
    }

    /// Whether the path ends with `extension`, ignoring ASCII case.
    pub fn has_extension(&self, extension: &str) -> bool {
        self.path().is_some_and(|path| ends_with_ignore_case(path, extension))
    }
}

fn ends_with_ignore_case(value: &str, suffix: &str) -> bool {
    value
        .len()
        .checked_sub(suffix.len())
        .and_then(|start| value.get(start..))
        .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
}

/// First output in list order whose path ends with `extension`.
pub fn select_audio<'a>(outputs: &'a [OutputRef], extension: &str) -> Option<&'a str> {
    outputs
        .iter()
        .find(|output| output.has_extension(extension))
        .and_then(OutputRef::path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_join_payload_shape() {
        let data = vec![json!(true), json!("hola")];
        let session = SessionHandle::new("abc");
        let payload = JoinPayload {
            data: &data,
            event_data: None,
            fn_index: 94,
            session_hash: &session,
            trigger_id: None,
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "data": [true, "hola"],
                "event_data": null,
                "fn_index": 94,
                "session_hash": "abc"
            })
        );
    }

    #[test]
    fn test_join_response_optional_fields() {
        let response: JoinResponse = serde_json::from_value(json!({"event_id": "e1"})).unwrap();
        assert_eq!(response.event_id.as_deref(), Some("e1"));
        assert!(response.session_hash.is_none());

        let response: JoinResponse =
            serde_json::from_value(json!({"session_hash": "new", "event_id": "e2"})).unwrap();
        assert_eq!(response.session_hash, Some(SessionHandle::new("new")));
    }

    #[test]
    fn test_join_response_rejects_non_object() {
        assert!(serde_json::from_value::<JoinResponse>(json!("accepted")).is_err());
    }

    #[test]
    fn test_message_kinds() {
        let estimation: QueueMessage =
            serde_json::from_value(json!({"msg": "estimation", "rank": 0, "queue_size": 1, "rank_eta": null}))
                .unwrap();
        assert_eq!(
            estimation,
            QueueMessage::Estimation {
                rank: Some(0),
                queue_size: Some(1),
                rank_eta: None
            }
        );

        let heartbeat: QueueMessage =
            serde_json::from_value(json!({"msg": "heartbeat", "event_id": "e1"})).unwrap();
        assert_eq!(heartbeat, QueueMessage::Heartbeat);

        let unknown: QueueMessage =
            serde_json::from_value(json!({"msg": "something_new", "x": 1})).unwrap();
        assert_eq!(unknown, QueueMessage::Unknown);
    }

    #[test]
    fn test_completion_with_mixed_outputs() {
        let message: QueueMessage = serde_json::from_value(json!({
            "msg": "process_completed",
            "event_id": "e1",
            "success": true,
            "output": {
                "data": [
                    "Generated.",
                    {"path": "/tmp/gradio/out.WAV", "url": "http://x/file=/tmp/gradio/out.WAV", "orig_name": "out.WAV"},
                    3,
                    null
                ]
            }
        }))
        .unwrap();

        let QueueMessage::ProcessCompleted { output: Some(output), .. } = message else {
            panic!("expected a completion");
        };
        assert_eq!(output.data.len(), 4);
        assert_eq!(output.data[0], OutputRef::Path("Generated.".to_string()));
        assert_eq!(output.data[1].path(), Some("/tmp/gradio/out.WAV"));
        assert_eq!(output.data[2].path(), None);
        assert_eq!(select_audio(&output.data, ".wav"), Some("/tmp/gradio/out.WAV"));
    }

    #[test]
    fn test_select_first_audio_regardless_of_shape() {
        let outputs = vec![
            OutputRef::Path("first.wav".to_string()),
            OutputRef::File {
                path: "second.wav".to_string(),
            },
        ];
        assert_eq!(select_audio(&outputs, ".wav"), Some("first.wav"));

        let outputs = vec![
            OutputRef::File {
                path: "first.wav".to_string(),
            },
            OutputRef::Path("second.wav".to_string()),
        ];
        assert_eq!(select_audio(&outputs, ".wav"), Some("first.wav"));
    }

    #[test]
    fn test_select_none_without_audio() {
        let outputs = vec![
            OutputRef::Path("log.txt".to_string()),
            OutputRef::File {
                path: "image.png".to_string(),
            },
            OutputRef::Other(json!(1)),
        ];
        assert_eq!(select_audio(&outputs, ".wav"), None);
    }

    #[test]
    fn test_extension_edge_cases() {
        assert!(ends_with_ignore_case("A.WaV", ".wav"));
        assert!(!ends_with_ignore_case("wav", ".wav"));
        assert!(!ends_with_ignore_case("", ".wav"));
        // Multi-byte boundary must not panic
        assert!(!ends_with_ignore_case("ééx", ".wav"));
    }
}

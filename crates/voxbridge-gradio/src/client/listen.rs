//! Event stream consumption up to the task's completion.

use futures_util::StreamExt;
use serde_json::Value;
use tracing::{debug, trace, warn};

use super::{GradioTtsClient, QueueSession};
use crate::error::{GradioError, GradioResult};
use crate::http::HttpBackend;
use crate::protocol::{QueueMessage, select_audio};
use crate::stream::{LineSplitter, parse_event_line};

/// What a single stream message means for the listener.
enum Step {
    Continue,
    Completed(String),
    Closed,
}

impl<B: HttpBackend> GradioTtsClient<B> {
    /// Listen on the session's event stream until its task completes.
    ///
    /// Returns the remote reference of the first audio output. Nothing is
    /// retried here: a rejected or interrupted stream fails the call.
    pub async fn await_completion(&self, session: &QueueSession) -> GradioResult<String> {
        match self.listen_timeout {
            Some(after) => tokio::time::timeout(after, self.listen(session))
                .await
                .map_err(|_| GradioError::ListenTimeout { after })?,
            None => self.listen(session).await,
        }
    }

    async fn listen(&self, session: &QueueSession) -> GradioResult<String> {
        let url = self.endpoints.data_for(&session.handle);
        let mut stream = self.backend.open_event_stream(&url).await?;
        let mut splitter = LineSplitter::new();

        while let Some(chunk) = stream.next().await {
            for line in splitter.push(&chunk?) {
                match self.step(session, &line)? {
                    Step::Continue => {}
                    Step::Completed(path) => return Ok(path),
                    Step::Closed => return Err(GradioError::StreamClosed),
                }
            }
        }

        if let Some(line) = splitter.finish() {
            if let Step::Completed(path) = self.step(session, &line)? {
                return Ok(path);
            }
        }

        Err(GradioError::StreamClosed)
    }

    fn step(&self, session: &QueueSession, line: &str) -> GradioResult<Step> {
        let Some(message) = parse_event_line(line) else {
            return Ok(Step::Continue);
        };

        match message {
            QueueMessage::ProcessCompleted {
                event_id,
                success,
                output,
            } => {
                if !belongs_to(session, event_id.as_deref()) {
                    debug!(
                        target: "voxbridge.gradio",
                        event_id = ?event_id,
                        "Ignoring completion of another task"
                    );
                    return Ok(Step::Continue);
                }

                let (outputs, error) = output.map(|o| (o.data, o.error)).unwrap_or_default();
                match select_audio(&outputs, &self.audio_extension) {
                    Some(path) => Ok(Step::Completed(path.to_string())),
                    None if success == Some(false) || error.is_some() => {
                        let message = error
                            .as_ref()
                            .map_or_else(|| "no error text".to_string(), error_text);
                        warn!(target: "voxbridge.gradio", error = %message, "Task failed on the server");
                        Err(GradioError::TaskFailed { message })
                    }
                    None => Err(GradioError::NoAudioOutput {
                        extension: self.audio_extension.clone(),
                        outputs: outputs.len(),
                    }),
                }
            }
            QueueMessage::CloseStream => Ok(Step::Closed),
            QueueMessage::Estimation {
                rank, queue_size, ..
            } => {
                debug!(target: "voxbridge.gradio", ?rank, ?queue_size, "Queued");
                Ok(Step::Continue)
            }
            QueueMessage::ProcessStarts { .. } => {
                debug!(target: "voxbridge.gradio", "Task started");
                Ok(Step::Continue)
            }
            QueueMessage::UnexpectedError { message } => {
                warn!(
                    target: "voxbridge.gradio",
                    message = message.as_deref().unwrap_or_default(),
                    "Server reported an unexpected error"
                );
                Ok(Step::Continue)
            }
            other => {
                trace!(target: "voxbridge.gradio", message = ?other, "Stream message");
                Ok(Step::Continue)
            }
        }
    }
}

/// A completion belongs to the session unless both sides name different tasks.
fn belongs_to(session: &QueueSession, event_id: Option<&str>) -> bool {
    match (session.event_id.as_deref(), event_id) {
        (Some(ours), Some(theirs)) => ours == theirs,
        _ => true,
    }
}

fn error_text(error: &Value) -> String {
    match error {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

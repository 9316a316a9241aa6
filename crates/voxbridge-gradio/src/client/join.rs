//! Queue submission with function index discovery.

use serde::Deserialize;
use tracing::{debug, warn};
use voxbridge_core::{SessionHandle, SynthesisRequest};

use super::{GradioTtsClient, QueueSession};
use crate::error::{GradioError, GradioResult};
use crate::http::HttpBackend;
use crate::protocol::{JoinPayload, JoinResponse};

impl<B: HttpBackend> GradioTtsClient<B> {
    /// Join the queue, trying each candidate function index in order.
    ///
    /// The first accepted index wins. Rejections, transport failures and
    /// answers that are not a JSON object move on to the next candidate. An
    /// object with unexpected fields still counts as accepted, since the task
    /// is already queued.
    pub async fn submit(
        &self,
        request: &SynthesisRequest,
        handle: SessionHandle,
    ) -> GradioResult<QueueSession> {
        let data = self.template.render(request);

        for &fn_index in &self.fn_indices {
            match self.join_once(&data, fn_index, &handle).await {
                Ok(response) => {
                    let handle = response.session_hash.unwrap_or(handle);
                    debug!(
                        target: "voxbridge.gradio",
                        fn_index,
                        session = %handle,
                        event_id = ?response.event_id,
                        "Queue join accepted"
                    );
                    return Ok(QueueSession {
                        handle,
                        fn_index,
                        event_id: response.event_id,
                    });
                }
                Err(e) => {
                    warn!(
                        target: "voxbridge.gradio",
                        fn_index,
                        error = %e,
                        "Queue join rejected, trying next index"
                    );
                }
            }
        }

        Err(GradioError::AllCandidatesRejected {
            attempted: self.fn_indices.clone(),
        })
    }

    async fn join_once(
        &self,
        data: &[serde_json::Value],
        fn_index: u32,
        handle: &SessionHandle,
    ) -> GradioResult<JoinResponse> {
        let payload = JoinPayload {
            data,
            event_data: None,
            fn_index,
            session_hash: handle,
            trigger_id: self.trigger_id,
        };
        let body = serde_json::to_value(&payload)?;

        let answer = self.backend.post_json(&self.endpoints.join, &body).await?;
        if !answer.is_object() {
            return Err(GradioError::InvalidResponse {
                message: format!("join response is not a JSON object: {answer}"),
            });
        }
        Ok(JoinResponse::deserialize(&answer).unwrap_or_else(|e| {
            warn!(
                target: "voxbridge.gradio",
                fn_index,
                error = %e,
                "Join accepted with an unexpected body, keeping readable fields"
            );
            JoinResponse::salvage(&answer)
        }))
    }
}

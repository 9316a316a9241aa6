//! Line framing and `data:` decoding for the queue event stream.
//!
//! Gradio writes one JSON message per `data:` line. Network chunks do not
//! respect line boundaries, so bytes are buffered until a newline arrives and
//! only then decoded, which also keeps multi-byte characters intact.

use serde_json::Value;
use tracing::{debug, trace};

use crate::protocol::QueueMessage;

/// Prefix that marks a payload line.
const DATA_MARKER: &str = "data:";

/// Splits a byte stream into text lines.
#[derive(Debug, Default)]
pub(crate) struct LineSplitter {
    buffer: Vec<u8>,
}

impl LineSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return every line it completed.
    ///
    /// Line terminators (`\n` or `\r\n`) are stripped.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.buffer.drain(..=newline).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }

    /// Return the unterminated remainder once the stream has ended.
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.buffer);
        let text = String::from_utf8_lossy(&rest);
        Some(text.trim_end_matches('\r').to_string())
    }
}

/// Decode one event-stream line into a queue message.
///
/// Blank lines, lines without the `data:` marker, and payloads that are not a
/// JSON queue message yield `None`.
pub(crate) fn parse_event_line(line: &str) -> Option<QueueMessage> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let Some(payload) = line.strip_prefix(DATA_MARKER) else {
        trace!(target: "voxbridge.gradio", line, "skipping non-data line");
        return None;
    };

    let value: Value = match serde_json::from_str(payload.trim_start()) {
        Ok(value) => value,
        Err(e) => {
            debug!(target: "voxbridge.gradio", error = %e, "skipping malformed event payload");
            return None;
        }
    };

    match serde_json::from_value(value) {
        Ok(message) => Some(message),
        Err(e) => {
            debug!(target: "voxbridge.gradio", error = %e, "skipping event without a known shape");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_across_chunks() {
        let mut splitter = LineSplitter::new();
        assert!(splitter.push(b"data: {\"msg\": \"heart").is_empty());
        let lines = splitter.push(b"beat\"}\n\ndata: x\r\n");
        assert_eq!(lines, vec!["data: {\"msg\": \"heartbeat\"}", "", "data: x"]);
        assert!(splitter.finish().is_none());
    }

    #[test]
    fn test_multibyte_split_is_preserved() {
        let text = "data: \"héllo\"\n".as_bytes();
        // Split in the middle of 'é'
        let (first, second) = text.split_at(9);
        let mut splitter = LineSplitter::new();
        assert!(splitter.push(first).is_empty());
        assert_eq!(splitter.push(second), vec!["data: \"héllo\""]);
    }

    #[test]
    fn test_finish_returns_unterminated_tail() {
        let mut splitter = LineSplitter::new();
        splitter.push(b"data: {\"msg\": \"close_stream\"}");
        assert_eq!(
            splitter.finish().as_deref(),
            Some("data: {\"msg\": \"close_stream\"}")
        );
        assert!(splitter.finish().is_none());
    }

    #[test]
    fn test_parse_data_line() {
        assert_eq!(
            parse_event_line("data: {\"msg\": \"heartbeat\"}"),
            Some(QueueMessage::Heartbeat)
        );
        assert_eq!(
            parse_event_line("data:{\"msg\":\"close_stream\"}"),
            Some(QueueMessage::CloseStream)
        );
    }

    #[test]
    fn test_parse_skips_noise() {
        assert_eq!(parse_event_line(""), None);
        assert_eq!(parse_event_line("   "), None);
        assert_eq!(parse_event_line(": keep-alive"), None);
        assert_eq!(parse_event_line("event: message"), None);
        assert_eq!(parse_event_line("data: not json"), None);
        assert_eq!(parse_event_line("data: [1, 2]"), None);
        assert_eq!(parse_event_line("data: {\"no_msg\": true}"), None);
    }
}

//! Server-sent event frames carrying a story from the backend to the page.
//!
//! Each frame is a single `data:` line followed by a blank line. Text chunks
//! are JSON string literals so that newlines inside the story survive the
//! line-oriented framing.

const DATA_PREFIX: &str = "data: ";
const DONE_MARKER: &str = "[DONE]";
const ERROR_MARKER: &str = "[ERROR]";
/// Longest line the decoder buffers while waiting for its newline.
pub const MAX_LINE_BYTES: usize = 1 << 20;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreamEvent {
    Chunk(String),
    Error(String),
    Done,
}

impl StreamEvent {
    pub fn to_frame(&self) -> String {
        match self {
            StreamEvent::Chunk(text) => {
                // Serializing a &str cannot fail.
                let encoded = serde_json::to_string(text).unwrap_or_default();
                format!("{DATA_PREFIX}{encoded}\n\n")
            }
            StreamEvent::Error(message) => {
                let message = message.replace(['\r', '\n'], " ");
                format!("{DATA_PREFIX}{ERROR_MARKER} {message}\n\n")
            }
            StreamEvent::Done => format!("{DATA_PREFIX}{DONE_MARKER}\n\n"),
        }
    }

    fn from_data(data: &str) -> Self {
        if data == DONE_MARKER {
            return StreamEvent::Done;
        }
        if let Some(message) = data.strip_prefix(ERROR_MARKER) {
            return StreamEvent::Error(message.trim_start().to_string());
        }
        match serde_json::from_str::<String>(data) {
            Ok(text) => StreamEvent::Chunk(text),
            Err(_) => StreamEvent::Chunk(data.to_string()),
        }
    }
}

/// Incremental frame decoder.
///
/// Bytes are buffered until a full line is available, so frames (and UTF-8
/// sequences) split across network reads decode the same as whole ones.
#[derive(Default, Debug)]
pub struct FrameDecoder {
    buffer: Vec<u8>,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bytes: &[u8]) -> Vec<StreamEvent> {
        self.buffer.extend_from_slice(bytes);

        let mut events = Vec::new();
        let mut start = 0;
        while let Some(offset) = self.buffer[start..].iter().position(|&b| b == b'\n') {
            let end = start + offset;
            let line = String::from_utf8_lossy(&self.buffer[start..end]);
            let line = line.trim_end_matches('\r');

            if let Some(data) = line.strip_prefix(DATA_PREFIX) {
                events.push(StreamEvent::from_data(data));
            }
            start = end + 1;
        }
        self.buffer.drain(..start);

        if self.buffer.len() > MAX_LINE_BYTES {
            self.buffer.clear();
            events.push(StreamEvent::Error(format!(
                "Frame longer than {MAX_LINE_BYTES} bytes"
            )));
        }
        events
    }
}

/// The story as shown to the user while it streams in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StoryOutput {
    pub text: String,
    pub error: Option<String>,
    pub finished: bool,
}

impl StoryOutput {
    pub fn apply(&mut self, event: StreamEvent) {
        if self.finished {
            return;
        }
        match event {
            StreamEvent::Chunk(chunk) => self.text.push_str(&chunk),
            StreamEvent::Error(message) => {
                self.error = Some(message);
                self.finished = true;
            }
            StreamEvent::Done => self.finished = true,
        }
    }
}

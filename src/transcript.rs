// transcript.rs

/// Append-only plain-text record of the session, kept for export.
#[derive(Default)]
pub struct Transcript {
    buf: String,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_command(&mut self, text: &str) {
        self.buf.push_str("$ ");
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    /// Error classification affects rendering only; the transcript records
    /// every output line the same way.
    pub fn record_output(&mut self, text: &str) {
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn snapshot(&self) -> &str {
        &self.buf
    }
}

use crate::DEFAULT_WRAP_WIDTH;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;

/// Destination for reload diagnostics.
///
/// The reloader's only contract with the sink is "accept a UTF-8 string and
/// display it somewhere". Implementations decide whether that means an
/// on-screen label, the log, or a test buffer.
pub trait ReportSink {
    /// Accepts one diagnostic message.
    fn report(&mut self, message: &str);
}

/// Greedy word wrap at `width` columns.
///
/// Tokens are split on whitespace and packed left to right; a single token
/// longer than `width` is broken into `width`-sized chunks, each on its own
/// line. No line exceeds `width` characters unless the input contained an
/// oversize token that has already been chunked.
///
/// # Panics
///
/// Panics if `width` is zero.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    assert!(width > 0, "wrap width must be non-zero");

    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0usize;

    for token in text.split_whitespace() {
        let token_len = token.chars().count();

        if token_len > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            let chars: Vec<char> = token.chars().collect();
            for chunk in chars.chunks(width) {
                lines.push(chunk.iter().collect());
            }
            continue;
        }

        if line_len == 0 {
            line.push_str(token);
            line_len = token_len;
        } else if line_len + 1 + token_len <= width {
            line.push(' ');
            line.push_str(token);
            line_len += 1 + token_len;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(token);
            line_len = token_len;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// On-screen text surface model for reload status and build diagnostics.
///
/// Holds the word-wrapped lines of the latest message; the consuming
/// playground draws [`StatusLabel::text`] with whatever text facility its
/// engine provides. Share one label between the reloader and the draw loop as
/// `Arc<Mutex<StatusLabel>>`, which implements [`ReportSink`] directly.
#[derive(Debug, Clone)]
pub struct StatusLabel {
    lines: Vec<String>,
    width: usize,
}

impl StatusLabel {
    /// Creates an empty label wrapping at `width` columns.
    pub fn new(width: usize) -> Self {
        Self { lines: Vec::new(), width }
    }

    /// Creates a shared label ready to be handed to a reloader as its sink.
    pub fn shared(width: usize) -> Arc<Mutex<StatusLabel>> {
        Arc::new(Mutex::new(Self::new(width)))
    }

    /// The wrapped lines of the latest message.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The latest message with wrapping applied, one line per row.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

impl Default for StatusLabel {
    fn default() -> Self {
        Self::new(DEFAULT_WRAP_WIDTH)
    }
}

impl ReportSink for StatusLabel {
    fn report(&mut self, message: &str) {
        self.lines = wrap(message, self.width);
    }
}

impl ReportSink for Arc<Mutex<StatusLabel>> {
    fn report(&mut self, message: &str) {
        self.lock().report(message);
    }
}

/// Fallback sink that forwards messages to the `tracing` log.
///
/// Used when no sink is configured so diagnostics are never dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn report(&mut self, message: &str) {
        info!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejoin(lines: &[String]) -> String {
        lines.join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn collapse(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn wrap_round_trips_content() {
        let text = "Error X3501: 'MainPS' entry point not found in\n  Shaders/RayMarching.fx (line 42)";
        let lines = wrap(text, 20);
        assert_eq!(rejoin(&lines), collapse(text));
    }

    #[test]
    fn wrap_respects_column_width() {
        let text = "the quick brown fox jumps over the lazy dog";
        for line in wrap(text, 10) {
            assert!(line.chars().count() <= 10, "line too long: {line:?}");
        }
    }

    #[test]
    fn oversize_token_is_chunked() {
        let token = "a".repeat(25);
        let lines = wrap(&token, 10);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 10);
        assert_eq!(lines[1].len(), 10);
        assert_eq!(lines[2].len(), 5);
        assert_eq!(lines.concat(), token);
    }

    #[test]
    fn empty_input_produces_no_lines() {
        assert!(wrap("", 10).is_empty());
        assert!(wrap("   \n\t ", 10).is_empty());
    }

    #[test]
    fn label_replaces_previous_message() {
        let mut label = StatusLabel::new(80);
        label.report("building RayMarching.fx");
        label.report("Shader RayMarching reloaded");
        assert_eq!(label.text(), "Shader RayMarching reloaded");
    }

    #[test]
    fn shared_label_is_a_sink() {
        let label = StatusLabel::shared(80);
        let mut sink = label.clone();
        sink.report("hello");
        assert_eq!(label.lock().text(), "hello");
    }
}

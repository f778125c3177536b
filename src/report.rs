//! Report line sinks
//!
//! Both policies narrate their runs through a single append-line
//! abstraction. The engine assumes nothing about the consumer: lines
//! may be printed, captured, forwarded elsewhere, or dropped.

/// Receives report lines in order as a run progresses.
pub trait ReportSink {
    /// Deliver one line. Must not block indefinitely.
    fn append(&mut self, line: &str);
}

/// Discards every line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn append(&mut self, _line: &str) {}
}

/// Prints every line to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl ReportSink for StdoutSink {
    fn append(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Captures lines in memory, mainly for tests and preview diffing.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    /// Create an empty capturing sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines captured so far, in delivery order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consume the sink and return the captured lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl ReportSink for MemorySink {
    fn append(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

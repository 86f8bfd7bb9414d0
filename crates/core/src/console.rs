//! Console Sinks
//!
//! Destinations for the text produced by external tools. A sink receives
//! regular output and diagnostic (error) output separately, and may be
//! activated (brought to the user's attention) before errors are shown.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};

/// Receiver of tool output
pub trait ConsoleSink: Send + Sync {
    /// Write regular output text
    fn write_output(&self, text: &str);

    /// Write diagnostic text
    fn write_error(&self, text: &str);

    /// Make the console visible
    fn activate(&self);
}

/// Shared handle passed to every tool invocation
pub type SharedConsole = Arc<dyn ConsoleSink>;

/// Forwards tool output to `tracing`
///
/// Text arrives in fragments (a line, then its newline), so complete lines
/// are assembled before an event is emitted.
#[derive(Default)]
pub struct TracingConsole {
    output: Mutex<String>,
    error: Mutex<String>,
}

impl TracingConsole {
    /// Create a tracing console
    pub fn new() -> Self {
        Self::default()
    }

    fn emit_lines(buffer: &Mutex<String>, text: &str, emit: impl Fn(&str)) {
        let mut buffer = buffer.lock();
        buffer.push_str(text);
        while let Some(idx) = buffer.find('\n') {
            let line: String = buffer.drain(..=idx).collect();
            emit(line.trim_end_matches(['\n', '\r']));
        }
    }
}

impl ConsoleSink for TracingConsole {
    fn write_output(&self, text: &str) {
        Self::emit_lines(&self.output, text, |line| info!(target: "andmore::tool", "{}", line));
    }

    fn write_error(&self, text: &str) {
        Self::emit_lines(&self.error, text, |line| warn!(target: "andmore::tool", "{}", line));
    }

    fn activate(&self) {}
}

/// Writes tool output to this process's stdout and stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct StdConsole;

impl ConsoleSink for StdConsole {
    fn write_output(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }

    fn write_error(&self, text: &str) {
        let mut err = std::io::stderr().lock();
        let _ = err.write_all(text.as_bytes());
        let _ = err.flush();
    }

    fn activate(&self) {}
}

/// In-memory console that records everything written to it
#[derive(Debug, Default)]
pub struct BufferConsole {
    output: Mutex<String>,
    error: Mutex<String>,
    activations: Mutex<usize>,
}

impl BufferConsole {
    /// Create an empty buffer console
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written as regular output
    pub fn output(&self) -> String {
        self.output.lock().clone()
    }

    /// Everything written as diagnostic output
    pub fn error(&self) -> String {
        self.error.lock().clone()
    }

    /// Number of times the console was activated
    pub fn activations(&self) -> usize {
        *self.activations.lock()
    }
}

impl ConsoleSink for BufferConsole {
    fn write_output(&self, text: &str) {
        self.output.lock().push_str(text);
    }

    fn write_error(&self, text: &str) {
        self.error.lock().push_str(text);
    }

    fn activate(&self) {
        *self.activations.lock() += 1;
    }
}

/// Per-invocation wrapper that activates the inner console once,
/// right before the first error text is written.
pub struct LazyConsole {
    inner: SharedConsole,
    activated: AtomicBool,
}

impl LazyConsole {
    /// Wrap `inner`, which is not yet activated
    pub fn new(inner: SharedConsole) -> Self {
        Self {
            inner,
            activated: AtomicBool::new(false),
        }
    }
}

impl ConsoleSink for LazyConsole {
    fn write_output(&self, text: &str) {
        self.inner.write_output(text);
    }

    fn write_error(&self, text: &str) {
        if !self.activated.swap(true, Ordering::AcqRel) {
            self.inner.activate();
        }
        self.inner.write_error(text);
    }

    fn activate(&self) {
        if !self.activated.swap(true, Ordering::AcqRel) {
            self.inner.activate();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_console_records() {
        let console = BufferConsole::new();
        console.write_output("hello");
        console.write_output("\n");
        console.write_error("oops\n");

        assert_eq!(console.output(), "hello\n");
        assert_eq!(console.error(), "oops\n");
        assert_eq!(console.activations(), 0);
    }

    #[test]
    fn test_lazy_console_activates_once_on_error() {
        let buffer = Arc::new(BufferConsole::new());
        let lazy = LazyConsole::new(buffer.clone());

        lazy.write_output("fine\n");
        assert_eq!(buffer.activations(), 0);

        lazy.write_error("first\n");
        lazy.write_error("second\n");
        assert_eq!(buffer.activations(), 1);
        assert_eq!(buffer.error(), "first\nsecond\n");
    }

    #[test]
    fn test_lazy_console_never_activates_without_errors() {
        let buffer = Arc::new(BufferConsole::new());
        {
            let lazy = LazyConsole::new(buffer.clone());
            lazy.write_output("only output\n");
        }
        assert_eq!(buffer.activations(), 0);
        assert_eq!(buffer.output(), "only output\n");
    }

    #[test]
    fn test_tracing_console_buffers_partial_lines() {
        let console = TracingConsole::new();
        console.write_output("partial");
        assert_eq!(console.output.lock().as_str(), "partial");

        console.write_output("\n");
        assert!(console.output.lock().is_empty());
    }
}

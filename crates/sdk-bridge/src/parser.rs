//! Line Parsers
//!
//! A parser consumes a tool's output one line at a time and produces a
//! structured value once the stream ends.

use crate::error::SdkError;

/// Incremental consumer of line-oriented tool output
pub trait LineParser {
    /// Value produced once the output ends
    type Output;

    /// Consume one line, without its line terminator
    fn feed(&mut self, line: &str) -> Result<(), SdkError>;

    /// Finish parsing at end of input
    fn finish(self) -> Self::Output;

    /// Parse a complete text
    fn parse_all(mut self, text: &str) -> Result<Self::Output, SdkError>
    where
        Self: Sized,
    {
        for line in text.lines() {
            self.feed(line)?;
        }
        Ok(self.finish())
    }
}

/// Keeps only the last line seen
#[derive(Debug, Default)]
pub struct LastLineCollector {
    last: Option<String>,
}

impl LastLineCollector {
    /// Create a collector that has seen no lines
    pub fn new() -> Self {
        Self::default()
    }
}

impl LineParser for LastLineCollector {
    type Output = Option<String>;

    fn feed(&mut self, line: &str) -> Result<(), SdkError> {
        self.last = Some(line.to_string());
        Ok(())
    }

    fn finish(self) -> Self::Output {
        self.last
    }
}

//! Device Properties
//!
//! Parses `adb shell getprop` dumps of the form `[key]: [value]`.

use std::collections::BTreeMap;

use crate::error::SdkError;
use crate::grammar::property_line;
use crate::parser::LineParser;

/// Property key to value
pub type PropertyMap = BTreeMap<String, String>;

/// Parser for a full `getprop` dump.
///
/// The dump is expected to be fully structured: any line that is not a
/// `[key]: [value]` pair aborts parsing.
#[derive(Debug, Default)]
pub struct PropertyParser {
    props: PropertyMap,
}

impl PropertyParser {
    /// Create an empty parser
    pub fn new() -> Self {
        Self::default()
    }
}

impl LineParser for PropertyParser {
    type Output = PropertyMap;

    fn feed(&mut self, line: &str) -> Result<(), SdkError> {
        let (key, value) =
            property_line(line).ok_or_else(|| SdkError::UnexpectedOutput(line.to_string()))?;
        self.props.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn finish(self) -> Self::Output {
        self.props
    }
}

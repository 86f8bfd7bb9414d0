//! AVD (Android Virtual Device) Listing
//!
//! Parses the block-structured output of `android list avd`:
//!
//! ```text
//! Available Android Virtual Devices:
//!     Name: Pixel_API_28
//!   Device: pixel (Google)
//!     Path: /home/dev/.android/avd/Pixel_API_28.avd
//!   Target: Google APIs (Google Inc.)
//!  Tag/ABI: google_apis/x86
//!     Skin: pixel
//! ---------
//!     Name: Nexus_5X
//! ...
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SdkError;
use crate::grammar::AvdLine;
use crate::parser::LineParser;

/// One virtual device as reported by the SDK
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvdRecord {
    pub name: Option<String>,
    /// Device profile
    pub device: Option<String>,
    /// AVD directory
    pub path: Option<String>,
    /// Target platform
    pub target: Option<String>,
    /// `Tag/ABI` value, e.g. `google_apis/x86`
    pub abi: Option<String>,
    pub skin: Option<String>,
}

impl AvdRecord {
    /// Store a `key: value` field. Returns false for keys that are not tracked.
    fn set_field(&mut self, key: &str, value: &str) -> bool {
        let slot = match key {
            "Name" => &mut self.name,
            "Device" => &mut self.device,
            "Path" => &mut self.path,
            "Target" => &mut self.target,
            "Tag/ABI" => &mut self.abi,
            "Skin" => &mut self.skin,
            _ => return false,
        };
        *slot = Some(value.to_string());
        true
    }

    /// Name to show the user
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

/// Parser for `android list avd`
#[derive(Debug, Default)]
pub struct AvdListParser {
    avds: Vec<AvdRecord>,
    current: Option<AvdRecord>,
}

impl AvdListParser {
    /// Create a parser with no record in progress
    pub fn new() -> Self {
        Self::default()
    }
}

impl LineParser for AvdListParser {
    type Output = Vec<AvdRecord>;

    fn feed(&mut self, line: &str) -> Result<(), SdkError> {
        match AvdLine::classify(line) {
            AvdLine::Field { key, value } => {
                // Unknown keys are skipped so newer SDKs keep working
                self.current
                    .get_or_insert_with(AvdRecord::default)
                    .set_field(key, value);
            }
            AvdLine::Separator => {
                if let Some(avd) = self.current.take() {
                    self.avds.push(avd);
                }
            }
            AvdLine::Other => {}
        }
        Ok(())
    }

    fn finish(mut self) -> Self::Output {
        if let Some(avd) = self.current.take() {
            self.avds.push(avd);
        }
        self.avds
    }
}

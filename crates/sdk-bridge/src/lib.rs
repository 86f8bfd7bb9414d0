//! Android SDK Bridge
//!
//! Runs the SDK's command-line tools (`android`, `adb`) and turns their
//! line-oriented output into AVD records, device serials and property maps.

pub mod avd;
pub mod device;
pub mod error;
pub mod grammar;
pub mod location;
pub mod parser;
pub mod process;
pub mod props;
pub mod sdk;

pub use avd::{AvdListParser, AvdRecord};
pub use device::{DeviceListParser, DeviceSerial};
pub use error::SdkError;
pub use location::SdkLocation;
pub use parser::{LastLineCollector, LineParser};
pub use process::{ConsoleForwarder, ToolCommand, ToolRun};
pub use props::{PropertyMap, PropertyParser};
pub use sdk::AndroidSdk;

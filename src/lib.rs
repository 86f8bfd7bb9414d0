//! Andmore - Android SDK tooling and project templates
//!
//! Drives the Android SDK command-line tools and generates new app
//! projects from templates.
//!
//! ## Architecture
//!
//! - `andmore-core`: configuration, errors and console sinks
//! - `andmore-sdk-bridge`: runs `android` and `adb` and parses their output
//! - `andmore-project-generator`: template-driven project generation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod commands;

// Re-export main components for library usage
pub use andmore_core as core;
pub use andmore_project_generator as generator;
pub use andmore_sdk_bridge as sdk;

/// Prelude module for convenient imports
pub mod prelude {
    pub use andmore_core::{AndmoreConfig, ConsoleSink, SharedConsole};
    pub use andmore_project_generator::{GeneratedProject, ProjectGenerator, ProjectRequest};
    pub use andmore_sdk_bridge::{AndroidSdk, AvdRecord, PropertyMap, SdkError, SdkLocation};
}

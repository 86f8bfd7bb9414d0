//! Andmore Core - Configuration and shared types
//!
//! This crate provides what the SDK adapter, the project generator and the
//! command-line front-end have in common: configuration, errors, and the
//! console sinks tool output is written to.

pub mod config;
pub mod console;
pub mod error;

pub use config::{AndmoreConfig, ConsoleKind, GeneratorConfig, SdkConfig};
pub use console::{BufferConsole, ConsoleSink, LazyConsole, SharedConsole, StdConsole, TracingConsole};
pub use error::{AndmoreError, Result};

/// Andmore version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "Andmore";

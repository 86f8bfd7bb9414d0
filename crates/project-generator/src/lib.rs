//! Android Project Generator
//!
//! Creates new Android app projects from template directories.

pub mod error;
pub mod generator;
pub mod gradle;
pub mod manifest;
pub mod model;
pub mod renderer;

pub use error::GeneratorError;
pub use generator::{GeneratedProject, ProjectGenerator, GENERATED_SOURCES};
pub use gradle::GradleTask;
pub use manifest::{FileTemplate, TemplateManifest};
pub use model::{ProjectRequest, TemplateModel};
pub use renderer::{PlaceholderRenderer, RenderError, TemplateRenderer};

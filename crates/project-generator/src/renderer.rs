//! Template Rendering
//!
//! Templates reference model variables as `${name}`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::model::TemplateModel;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}").unwrap());

/// Rendering errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("undefined variable `{0}`")]
    UnknownVariable(String),
}

/// Turns template text into file content
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &str, model: &TemplateModel) -> Result<String, RenderError>;
}

/// Substitutes `${name}` placeholders with model values.
///
/// A placeholder naming a variable the model does not define is an error.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderRenderer;

impl TemplateRenderer for PlaceholderRenderer {
    fn render(&self, template: &str, model: &TemplateModel) -> Result<String, RenderError> {
        if let Some(missing) = PLACEHOLDER
            .captures_iter(template)
            .map(|caps| caps[1].to_string())
            .find(|name| model.get(name).is_none())
        {
            return Err(RenderError::UnknownVariable(missing));
        }

        let rendered = PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
            model.get(&caps[1]).unwrap_or_default().to_string()
        });
        Ok(rendered.into_owned())
    }
}

//! Template Model
//!
//! The variables templates are rendered against, and the request they are
//! derived from.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::GeneratorError;

/// Substitution variables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TemplateModel {
    vars: BTreeMap<String, String>,
}

impl TemplateModel {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or replace a variable
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Value of a variable
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// All variables, ordered by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A new-project request
#[derive(Debug, Clone)]
pub struct ProjectRequest {
    /// Directory projects are created in
    pub workspace_root: PathBuf,
    pub project_name: String,
    /// Java package, e.g. `com.example.app`
    pub package_name: String,
    pub activity_name: String,
    pub layout_name: String,
}

impl ProjectRequest {
    /// Request a project with the default activity and layout names
    pub fn new(
        workspace_root: impl Into<PathBuf>,
        project_name: impl Into<String>,
        package_name: impl Into<String>,
    ) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            project_name: project_name.into(),
            package_name: package_name.into(),
            activity_name: "MainActivity".to_string(),
            layout_name: "activity_main".to_string(),
        }
    }

    /// Set the main activity class name
    pub fn activity(mut self, activity_name: impl Into<String>) -> Self {
        self.activity_name = activity_name.into();
        self
    }

    /// Set the main layout resource name
    pub fn layout(mut self, layout_name: impl Into<String>) -> Self {
        self.layout_name = layout_name.into();
        self
    }

    /// Directory the project lands in
    pub fn project_dir(&self) -> PathBuf {
        self.workspace_root.join(&self.project_name)
    }

    /// Reject names that cannot become paths or Java identifiers
    pub fn validate(&self) -> Result<(), GeneratorError> {
        let name = self.project_name.as_str();
        if name.is_empty()
            || name != name.trim()
            || name == "."
            || name == ".."
            || name.contains(|c: char| matches!(c, '/' | '\\' | '"') || c.is_control())
        {
            return Err(GeneratorError::InvalidRequest(format!(
                "project name `{}`",
                self.project_name
            )));
        }

        if self.package_name.is_empty() || !self.package_name.split('.').all(is_java_identifier) {
            return Err(GeneratorError::InvalidRequest(format!(
                "package name `{}`",
                self.package_name
            )));
        }

        if !is_java_identifier(&self.activity_name) {
            return Err(GeneratorError::InvalidRequest(format!(
                "activity name `{}`",
                self.activity_name
            )));
        }

        if !is_resource_name(&self.layout_name) {
            return Err(GeneratorError::InvalidRequest(format!(
                "layout name `{}`",
                self.layout_name
            )));
        }

        Ok(())
    }

    /// Build the substitution model
    pub fn model(&self) -> TemplateModel {
        let mut model = TemplateModel::new();
        model.insert("projectPath", format!("/{}", self.project_name));
        model.insert("projectName", self.project_name.as_str());
        model.insert("packageName", self.package_name.as_str());
        model.insert("packagePath", self.package_name.replace('.', "/"));
        model.insert("activityName", self.activity_name.as_str());
        model.insert("layoutName", self.layout_name.as_str());
        model
    }

    /// Directory projects are created in
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }
}

fn is_java_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn is_resource_name(s: &str) -> bool {
    !s.is_empty()
        && s.starts_with(|c: char| c.is_ascii_lowercase())
        && s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

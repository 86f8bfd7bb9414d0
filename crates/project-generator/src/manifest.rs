//! Template Manifest
//!
//! `manifest.json` in a template directory lists the files a project is
//! made of:
//!
//! ```json
//! {
//!   "files": [
//!     { "src": "MainActivity.java",
//!       "dest": "/${projectName}/app/src/main/java/${packagePath}/${activityName}.java",
//!       "open": true, "show": true },
//!     { "src": "gitignore", "dest": "/${projectName}/.gitignore", "skipTemplate": true }
//!   ],
//!   "srcEntries": ["app/src/main/java"]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;

/// One file of a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileTemplate {
    /// Path relative to the template directory
    pub src: String,
    /// Workspace path; the first segment names the project
    pub dest: String,
    /// Copy the source bytes instead of rendering them
    #[serde(default)]
    pub skip_template: bool,
    /// Open the file once generation finishes
    #[serde(default)]
    pub open: bool,
    /// Bring the file to front (implies it is opened last)
    #[serde(default)]
    pub show: bool,
}

/// Parsed `manifest.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateManifest {
    #[serde(default)]
    pub files: Vec<FileTemplate>,
    /// Java source folders, relative to the project
    #[serde(default)]
    pub src_entries: Vec<String>,
}

impl TemplateManifest {
    /// File name of the manifest inside a template directory
    pub const FILE_NAME: &'static str = "manifest.json";

    /// Parse a rendered manifest
    pub fn from_json(json: &str) -> Result<Self, GeneratorError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_default_to_false() {
        let manifest = TemplateManifest::from_json(
            r#"{ "files": [ { "src": "a", "dest": "/p/a" }, { "src": "b", "dest": "/p/b", "skipTemplate": true, "open": true, "show": true } ] }"#,
        )
        .unwrap();

        assert_eq!(manifest.files.len(), 2);
        assert!(!manifest.files[0].skip_template);
        assert!(!manifest.files[0].open);
        assert!(!manifest.files[0].show);
        assert!(manifest.files[1].skip_template && manifest.files[1].open && manifest.files[1].show);
        assert!(manifest.src_entries.is_empty());
    }

    #[test]
    fn test_src_entries() {
        let manifest = TemplateManifest::from_json(r#"{ "files": [], "srcEntries": ["app/src/main/java"] }"#).unwrap();
        assert_eq!(manifest.src_entries, vec!["app/src/main/java".to_string()]);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            TemplateManifest::from_json("{ files: "),
            Err(GeneratorError::Manifest(_))
        ));
    }
}

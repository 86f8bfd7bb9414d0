//! Application Configuration
//!
//! Settings shared by the command-line front-end and embedders:
//! - Android SDK location
//! - Project generator defaults
//! - Console sink selection

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use directories::ProjectDirs;
use tracing::{info, debug};

use crate::error::{AndmoreError, Result};

/// Android SDK configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SdkConfig {
    /// Path to the Android SDK root; auto-detected when unset
    #[serde(default)]
    pub location: Option<PathBuf>,
}

/// Project generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Directory holding the project template (contains `manifest.json`)
    #[serde(default)]
    pub template_dir: Option<PathBuf>,
    /// Workspace root new projects are created under
    #[serde(default)]
    pub workspace_dir: Option<PathBuf>,
    /// Run the post-generation build step
    #[serde(default = "default_true")]
    pub run_build: bool,
    /// Gradle task run after generation
    #[serde(default = "default_build_task")]
    pub build_task: String,
}

fn default_true() -> bool { true }
fn default_build_task() -> String { "generateDebugSources".to_string() }

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            template_dir: None,
            workspace_dir: None,
            run_build: default_true(),
            build_task: default_build_task(),
        }
    }
}

/// Where tool output is sent
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleKind {
    /// Process stdout/stderr
    #[default]
    Std,
    /// `tracing` events
    Tracing,
}

/// Console configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub sink: ConsoleKind,
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AndmoreConfig {
    /// Configuration version for migrations
    #[serde(default = "default_version")]
    pub version: u32,
    /// Android SDK settings
    #[serde(default)]
    pub sdk: SdkConfig,
    /// Project generator settings
    #[serde(default)]
    pub generator: GeneratorConfig,
    /// Console settings
    #[serde(default)]
    pub console: ConsoleConfig,
}

fn default_version() -> u32 { 1 }

impl Default for AndmoreConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            sdk: SdkConfig::default(),
            generator: GeneratorConfig::default(),
            console: ConsoleConfig::default(),
        }
    }
}

impl AndmoreConfig {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("org", "eclipse", "andmore")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the configuration file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Load configuration from the default location, creating it if missing
    pub async fn load() -> Result<Self> {
        let config_file = Self::config_file()
            .ok_or_else(|| AndmoreError::Config("Cannot determine config path".into()))?;

        if config_file.exists() {
            Self::load_from(&config_file).await
        } else {
            info!("Config file not found, using defaults");
            let config = AndmoreConfig::default();
            config.save_to(&config_file).await?;
            Ok(config)
        }
    }

    /// Load configuration from a specific file
    pub async fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AndmoreError::NotFound(path.display().to_string()));
        }

        debug!("Loading config from {:?}", path);
        let contents = tokio::fs::read_to_string(path).await?;
        let config: AndmoreConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to the given file
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let contents = toml::to_string_pretty(self)?;
        tokio::fs::write(path, contents).await?;

        debug!("Config saved to {:?}", path);
        Ok(())
    }
}

//! SDK Location
//!
//! Finds the Android SDK root and the tools inside it.

use std::path::{Path, PathBuf};

use andmore_core::SdkConfig;

/// Root of an Android SDK installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkLocation {
    root: PathBuf,
}

impl SdkLocation {
    /// Use an explicit SDK root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the SDK root from configuration and the process environment
    pub fn resolve(config: &SdkConfig) -> Self {
        Self::resolve_with(config, |key| std::env::var(key).ok())
    }

    /// Resolve with a custom environment lookup.
    ///
    /// Order: configured location, `ANDROID_HOME`, `ANDROID_SDK_ROOT`,
    /// then `~/Library/Android/sdk`.
    pub fn resolve_with(config: &SdkConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(ref location) = config.location {
            return Self::new(location.clone());
        }

        ["ANDROID_HOME", "ANDROID_SDK_ROOT"]
            .iter()
            .filter_map(|key| env(key))
            .find(|value| !value.trim().is_empty())
            .map(Self::new)
            .unwrap_or_else(|| Self::new(Self::default_root()))
    }

    /// Home-relative default SDK root
    pub fn default_root() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("Library")
            .join("Android")
            .join("sdk")
    }

    /// SDK root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the legacy `android` tool
    pub fn android_path(&self) -> PathBuf {
        let tools = self.root.join("tools");
        if cfg!(windows) {
            tools.join("android.bat")
        } else {
            tools.join("android")
        }
    }

    /// Path of the `adb` executable
    pub fn adb_path(&self) -> PathBuf {
        let platform_tools = self.root.join("platform-tools");
        if cfg!(windows) {
            platform_tools.join("adb.exe")
        } else {
            platform_tools.join("adb")
        }
    }
}

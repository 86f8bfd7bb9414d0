//! Gradle Task
//!
//! Runs one Gradle task in a freshly generated project, e.g. the initial
//! `generateDebugSources` that produces `R.java`.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use andmore_core::SharedConsole;
use andmore_sdk_bridge::{ConsoleForwarder, SdkError, ToolCommand};

/// A Gradle task run through the project's wrapper
#[derive(Debug, Clone)]
pub struct GradleTask {
    task: String,
    android_home: Option<PathBuf>,
}

impl GradleTask {
    /// Create a task run by name, e.g. `assembleDebug`
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            android_home: None,
        }
    }

    /// The task run after a project is generated
    pub fn generate_debug_sources() -> Self {
        Self::new("generateDebugSources")
    }

    /// Set ANDROID_HOME for the build
    pub fn with_android_home(mut self, path: impl Into<PathBuf>) -> Self {
        self.android_home = Some(path.into());
        self
    }

    /// Name of the Gradle task
    pub fn task(&self) -> &str {
        &self.task
    }

    fn wrapper_path(project_dir: &Path) -> PathBuf {
        let wrapper_name = if cfg!(windows) {
            "gradlew.bat"
        } else {
            "gradlew"
        };
        project_dir.join(wrapper_name)
    }

    /// Command line for this task; `gradle` from PATH when there is no wrapper
    pub fn command(&self, project_dir: &Path) -> ToolCommand {
        let wrapper = Self::wrapper_path(project_dir);
        let program = if wrapper.exists() {
            wrapper
        } else {
            debug!("no Gradle wrapper in {}, using gradle from PATH", project_dir.display());
            PathBuf::from("gradle")
        };

        let mut cmd = ToolCommand::new(program)
            .arg(self.task.as_str())
            .arg("--console=plain")
            .current_dir(project_dir);

        if let Some(ref android_home) = self.android_home {
            cmd = cmd
                .env("ANDROID_HOME", android_home)
                .env("ANDROID_SDK_ROOT", android_home);
        }
        cmd
    }

    /// Run the task, streaming Gradle's output to the console
    pub async fn run(&self, project_dir: &Path, console: &SharedConsole) -> Result<(), SdkError> {
        info!("Running gradle {} in {}", self.task, project_dir.display());

        self.command(project_dir)
            .run(ConsoleForwarder::new(console.clone()), console)
            .await?
            .checked()
    }
}

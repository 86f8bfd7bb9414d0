//! CLI commands for Andmore
//!
//! Each command runs against a [`Context`] and writes its report to the
//! given writer, so the binary prints to stdout and tests read a buffer.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use tracing::info;

use andmore_core::{AndmoreConfig, ConsoleKind, SharedConsole, StdConsole, TracingConsole};
use andmore_project_generator::{GradleTask, ProjectGenerator, ProjectRequest};
use andmore_sdk_bridge::{AndroidSdk, SdkLocation};

/// Everything a command needs: configuration, the SDK and a console
pub struct Context {
    /// Effective configuration
    pub config: AndmoreConfig,
    /// SDK the tool commands run against
    pub sdk: AndroidSdk,
    /// Where tool output goes
    pub console: SharedConsole,
}

impl Context {
    /// Build a context, letting `sdk_override` win over the configured SDK
    pub fn new(mut config: AndmoreConfig, sdk_override: Option<PathBuf>) -> Self {
        if sdk_override.is_some() {
            config.sdk.location = sdk_override;
        }

        let sdk = AndroidSdk::new(SdkLocation::resolve(&config.sdk));
        let console: SharedConsole = match config.console.sink {
            ConsoleKind::Std => Arc::new(StdConsole),
            ConsoleKind::Tracing => Arc::new(TracingConsole::new()),
        };

        Self { config, sdk, console }
    }

    /// Replace the console sink
    pub fn with_console(mut self, console: SharedConsole) -> Self {
        self.console = console;
        self
    }
}

/// List the configured virtual devices
pub struct AvdsCommand;

impl AvdsCommand {
    /// Execute the command
    pub async fn execute(&self, ctx: &Context, out: &mut impl Write) -> Result<()> {
        let avds = ctx
            .sdk
            .list_avds(&ctx.console)
            .await
            .context("Failed to list AVDs")?;

        if avds.is_empty() {
            writeln!(out, "No AVDs configured")?;
            return Ok(());
        }

        writeln!(out, "Available AVDs:")?;
        for avd in avds {
            writeln!(
                out,
                "  {} - {} ({})",
                avd.display_name(),
                avd.target.as_deref().unwrap_or("unknown target"),
                avd.abi.as_deref().unwrap_or("unknown ABI"),
            )?;
        }
        Ok(())
    }
}

/// List attached devices and emulators
pub struct DevicesCommand;

impl DevicesCommand {
    /// Execute the command
    pub async fn execute(&self, ctx: &Context, out: &mut impl Write) -> Result<()> {
        let devices = ctx
            .sdk
            .list_devices()
            .await
            .context("Failed to list devices")?;

        if devices.is_empty() {
            writeln!(out, "No devices connected")?;
        } else {
            writeln!(out, "Connected devices:")?;
            for serial in devices {
                let kind = if andmore_sdk_bridge::device::is_emulator(&serial) {
                    "emulator"
                } else {
                    "device"
                };
                writeln!(out, "  {} - {}", serial, kind)?;
            }
        }
        Ok(())
    }
}

/// Install (or reinstall) an APK
pub struct InstallCommand {
    /// APK to install
    pub apk: PathBuf,
}

impl InstallCommand {
    /// Execute the command
    pub async fn execute(&self, ctx: &Context, out: &mut impl Write) -> Result<()> {
        if !self.apk.is_file() {
            anyhow::bail!("APK not found: {}", self.apk.display());
        }

        ctx.sdk
            .install_apk(&self.apk, &ctx.console)
            .await
            .with_context(|| format!("Failed to install {}", self.apk.display()))?;

        writeln!(out, "Installed {}", self.apk.display())?;
        Ok(())
    }
}

/// Launch an activity
pub struct StartCommand {
    /// Application package
    pub package: String,
    /// Activity class, absolute or starting with `.`
    pub activity: String,
}

impl StartCommand {
    /// Execute the command
    pub async fn execute(&self, ctx: &Context, out: &mut impl Write) -> Result<()> {
        ctx.sdk
            .start_app(&self.package, &self.activity, &ctx.console)
            .await
            .with_context(|| format!("Failed to start {}/{}", self.package, self.activity))?;

        writeln!(out, "Started {}/{}", self.package, self.activity)?;
        Ok(())
    }
}

/// Dump every system property of a device
pub struct PropsCommand {
    /// Device serial
    pub serial: String,
}

impl PropsCommand {
    /// Execute the command
    pub async fn execute(&self, ctx: &Context, out: &mut impl Write) -> Result<()> {
        let props = ctx
            .sdk
            .get_properties(&self.serial)
            .await
            .with_context(|| format!("Failed to read properties of {}", self.serial))?;

        for (key, value) in props {
            writeln!(out, "{} = {}", key, value)?;
        }
        Ok(())
    }
}

/// Read one system property of a device
pub struct PropCommand {
    /// Device serial
    pub serial: String,
    /// Property key, e.g. `ro.build.version.sdk`
    pub key: String,
}

impl PropCommand {
    /// Execute the command
    pub async fn execute(&self, ctx: &Context, out: &mut impl Write) -> Result<()> {
        let value = ctx
            .sdk
            .get_property(&self.serial, &self.key)
            .await
            .with_context(|| format!("Failed to read {} of {}", self.key, self.serial))?;

        writeln!(out, "{}", value.unwrap_or_default())?;
        Ok(())
    }
}

/// Generate a new app project from a template
pub struct NewCommand {
    /// Project name, also the directory name
    pub name: String,
    /// Java package
    pub package: String,
    /// Main activity class
    pub activity: Option<String>,
    /// Main layout resource
    pub layout: Option<String>,
    /// Directory the project is created in
    pub workspace: Option<PathBuf>,
    /// Template directory
    pub template: Option<PathBuf>,
    /// Skip the initial Gradle task
    pub no_build: bool,
}

impl NewCommand {
    fn workspace_dir(&self, ctx: &Context) -> Result<PathBuf> {
        match self.workspace.clone().or_else(|| ctx.config.generator.workspace_dir.clone()) {
            Some(dir) => Ok(dir),
            None => std::env::current_dir().context("Cannot determine the current directory"),
        }
    }

    fn template_dir(&self, ctx: &Context) -> PathBuf {
        self.template
            .clone()
            .or_else(|| ctx.config.generator.template_dir.clone())
            .unwrap_or_else(ProjectGenerator::bundled_template_dir)
    }

    fn build_task(&self, ctx: &Context) -> Option<GradleTask> {
        if self.no_build || !ctx.config.generator.run_build {
            return None;
        }
        Some(
            GradleTask::new(ctx.config.generator.build_task.as_str())
                .with_android_home(ctx.sdk.location().root()),
        )
    }

    /// Execute the command
    pub async fn execute(&self, ctx: &Context, out: &mut impl Write) -> Result<()> {
        let mut request = ProjectRequest::new(self.workspace_dir(ctx)?, self.name.as_str(), self.package.as_str());
        if let Some(ref activity) = self.activity {
            request = request.activity(activity.as_str());
        }
        if let Some(ref layout) = self.layout {
            request = request.layout(layout.as_str());
        }

        let generator = ProjectGenerator::new(self.template_dir(ctx)).with_build_step(self.build_task(ctx));
        info!("Generating {} from {}", self.name, generator.template_dir().display());

        let project = generator
            .generate(&request, &ctx.console)
            .await
            .with_context(|| format!("Failed to generate project {}", self.name))?;

        writeln!(out, "Created {}", project.project_dir.display())?;
        for file in &project.files_to_open {
            writeln!(out, "  open: {}", file.display())?;
        }
        for entry in &project.source_entries {
            writeln!(out, "  source: {}", entry.display())?;
        }
        Ok(())
    }
}

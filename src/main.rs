//! Andmore command-line entry point

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use andmore::commands::{
    AvdsCommand, Context, DevicesCommand, InstallCommand, NewCommand, PropCommand, PropsCommand,
    StartCommand,
};
use andmore::core::{AndmoreConfig, APP_NAME, VERSION};

#[derive(Parser)]
#[command(name = "andmore")]
#[command(about = "Android SDK tooling and project templates")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Android SDK root
    #[arg(long, global = true)]
    sdk: Option<PathBuf>,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List Android Virtual Devices
    Avds,

    /// List attached devices and emulators
    Devices,

    /// Install an APK, replacing an existing install
    Install {
        /// APK file
        apk: PathBuf,
    },

    /// Start an activity
    Start {
        /// Application package
        package: String,
        /// Activity class
        activity: String,
    },

    /// Show all system properties of a device
    Props {
        /// Device serial
        serial: String,
    },

    /// Show one system property of a device
    Prop {
        /// Device serial
        serial: String,
        /// Property key
        key: String,
    },

    /// Create a new app project
    New {
        /// Project name
        #[arg(long)]
        name: String,
        /// Java package
        #[arg(long)]
        package: String,
        /// Main activity class
        #[arg(long)]
        activity: Option<String>,
        /// Main layout resource
        #[arg(long)]
        layout: Option<String>,
        /// Directory to create the project in
        #[arg(long)]
        workspace: Option<PathBuf>,
        /// Template directory
        #[arg(long)]
        template: Option<PathBuf>,
        /// Skip the initial Gradle task
        #[arg(long)]
        no_build: bool,
    },
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn load_config(path: Option<&PathBuf>) -> Result<AndmoreConfig> {
    match path {
        Some(path) => AndmoreConfig::load_from(path)
            .await
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => AndmoreConfig::load().await.context("Failed to load config"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    info!("{} v{}", APP_NAME, VERSION);

    let config = load_config(cli.config.as_ref()).await?;
    let ctx = Context::new(config, cli.sdk);
    info!("Using Android SDK at {}", ctx.sdk.location().root().display());

    let mut out = std::io::stdout();
    match cli.command {
        Commands::Avds => AvdsCommand.execute(&ctx, &mut out).await,
        Commands::Devices => DevicesCommand.execute(&ctx, &mut out).await,
        Commands::Install { apk } => InstallCommand { apk }.execute(&ctx, &mut out).await,
        Commands::Start { package, activity } => {
            StartCommand { package, activity }.execute(&ctx, &mut out).await
        }
        Commands::Props { serial } => PropsCommand { serial }.execute(&ctx, &mut out).await,
        Commands::Prop { serial, key } => PropCommand { serial, key }.execute(&ctx, &mut out).await,
        Commands::New {
            name,
            package,
            activity,
            layout,
            workspace,
            template,
            no_build,
        } => {
            NewCommand {
                name,
                package,
                activity,
                layout,
                workspace,
                template,
                no_build,
            }
            .execute(&ctx, &mut out)
            .await
        }
    }
}

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use tfs_status::config::{ExtensionConfig, log_path};
use tfs_status::logging::{LogOptions, init_logging};
use tfs_status::status::{ClientState, StatusReadings, render_status};
use tfs_status::version::component::Component;
use tfs_status::version::manifest::DependencyManifest;
use tfs_status::version::probe::StaticProbe;

#[derive(Parser)]
#[command(name = "tfs-status")]
#[command(version, about = "Version compatibility status for Wake and Anvil")]
struct Cli {
    /// Write logs to the data directory instead of stderr
    #[arg(long, global = true)]
    log_file: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Dependency manifest to read instead of the embedded one
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the status item for the given versions
    Check {
        /// Version reported by Wake
        #[arg(long)]
        wake: Option<String>,

        /// Version reported by Anvil
        #[arg(long)]
        anvil: Option<String>,

        /// Language client state
        #[arg(long, value_enum, default_value_t = StateArg::Running)]
        state: StateArg,

        /// Extension settings (JSON) used for the installation method
        #[arg(long)]
        settings: Option<PathBuf>,
    },
    /// Print the version policy of each component
    Policy,
}

#[derive(Clone, Copy, ValueEnum)]
enum StateArg {
    Starting,
    Running,
    Stopped,
}

impl From<StateArg> for ClientState {
    fn from(state: StateArg) -> Self {
        match state {
            StateArg::Starting => ClientState::Starting,
            StateArg::Running => ClientState::Running,
            StateArg::Stopped => ClientState::Stopped,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_file = cli.log_file.then(log_path);
    let _guard = init_logging(&LogOptions {
        file: log_file.as_deref(),
        json: cli.json,
    })?;

    let manifest = match &cli.manifest {
        Some(path) => DependencyManifest::load(path)?,
        None => DependencyManifest::embedded()?,
    };
    let policies = manifest
        .policies()
        .context("Dependency manifest has invalid version policies")?;

    match cli.command {
        Command::Check {
            wake,
            anvil,
            state,
            settings,
        } => {
            let config = match settings {
                Some(path) => {
                    let content = std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read settings {:?}", path))?;
                    serde_json::from_str::<ExtensionConfig>(&content)
                        .with_context(|| format!("Invalid settings {:?}", path))?
                }
                None => ExtensionConfig::default(),
            };
            debug!("Using settings {:?}", config);

            let readings = StatusReadings::collect(&StaticProbe { wake, anvil }, &policies);
            let summary = render_status(
                state.into(),
                &readings,
                &config.wake.installation_description(),
            );

            println!("{}", summary.text);
            println!();
            println!("{}", summary.tooltip);
            if let Some(highlight) = summary.highlight {
                println!();
                println!("background: {}", highlight.theme_color());
            }
            if let Some(command) = summary.command {
                println!("command: {}", command);
            }
        }
        Command::Policy => {
            for component in Component::ALL {
                let policy = policies.get(component);
                println!(
                    "{}: minimum {}, recommended {}",
                    component,
                    policy.minimum,
                    policy.recommended_range()
                );
            }
        }
    }

    Ok(())
}

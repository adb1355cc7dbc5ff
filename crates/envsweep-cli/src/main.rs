mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use envsweep_core::config::{PipelineConfig, RunMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "envsweep",
    about = "Secret remediation and quality-gate pipeline — rewrite hard-coded secrets to env references, then lint, type-check, and analyze",
    version,
    propagate_version = true
)]
struct Cli {
    /// Repository root (default: auto-detect from .git/)
    #[arg(long, global = true, env = "ENVSWEEP_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct ModeFlags {
    /// Report what would change without touching any file
    #[arg(long, conflicts_with = "interactive")]
    dry_run: bool,

    /// Ask for confirmation before applying changes
    #[arg(long)]
    interactive: bool,
}

impl ModeFlags {
    fn mode(&self) -> Option<RunMode> {
        if self.dry_run {
            Some(RunMode::DryRun)
        } else if self.interactive {
            Some(RunMode::Interactive)
        } else {
            None
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: remediate secrets, then lint, type-check, analyze
    Run {
        #[command(flatten)]
        mode: ModeFlags,

        /// Skip the type-check stage
        #[arg(long = "skip-type-check")]
        skip_typecheck: bool,

        /// Skip the static-analysis stage
        #[arg(long)]
        skip_analyze: bool,
    },

    /// Run secret remediation only
    Remediate {
        #[command(flatten)]
        mode: ModeFlags,
    },

    /// Verify the configuration and tool availability without running anything
    Check,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = load_config(&root).and_then(|mut config| match cli.command {
        Commands::Run {
            mode,
            skip_typecheck,
            skip_analyze,
        } => {
            if let Some(m) = mode.mode() {
                config.mode = m;
            }
            config.skip_typecheck |= skip_typecheck;
            config.skip_analyze |= skip_analyze;
            cmd::run::run(&root, &config, cli.json)
        }
        Commands::Remediate { mode } => {
            if let Some(m) = mode.mode() {
                config.mode = m;
            }
            cmd::remediate::run(&root, &config, cli.json)
        }
        Commands::Check => cmd::check::run(&root, &config, cli.json),
    });

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn load_config(root: &std::path::Path) -> anyhow::Result<PipelineConfig> {
    // A broken config file is the one fatal, pre-flight error class.
    Ok(PipelineConfig::load(root)?)
}

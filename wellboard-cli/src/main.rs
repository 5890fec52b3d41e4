//! Wellboard CLI - per-user wellness reports from a CSV dataset

#![deny(warnings)]

// Global invariants enforced:
// - Report output goes to stdout (or --output), logs go to stderr
// - Identical input yields byte-for-byte identical output

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wellboard_core::config::{self, ResolvedConfig};
use wellboard_core::{render_json, render_text, Profile, ReportSession};

#[derive(Parser)]
#[command(name = "wellboard")]
#[command(about = "Render per-user wellness reports from a CSV dataset")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one user's wellness report
    Report {
        /// Path to the data file (overrides config file)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Display name of the user (default: first record)
        #[arg(long)]
        user: Option<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Composition profile (overrides config file)
        #[arg(long)]
        profile: Option<ProfileArg>,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the report to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List the users in a data file
    Users {
        /// Path to the data file (overrides config file)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Validate or show configuration
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without rendering a report
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ProfileArg {
    Full,
    Compact,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Full => Profile::Full,
            ProfileArg::Compact => Profile::Compact,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Report {
            data,
            user,
            format,
            profile,
            config: config_path,
            output,
        } => {
            let resolved = load_config(config_path.as_deref())?;

            // CLI flags override config file values
            let mut options = resolved.report_options();
            if let Some(profile) = profile {
                options.profile = profile.into();
            }
            let data_path = data.unwrap_or(resolved.data_path);

            let mut session = ReportSession::new(&data_path);
            let report = session
                .report(user.as_deref(), &options)
                .context("failed to load wellness data")?;

            let rendered = match format {
                OutputFormat::Text => render_text(&report),
                OutputFormat::Json => render_json(&report),
            };
            write_output(&rendered, output.as_deref())?;
        }
        Commands::Users {
            data,
            config: config_path,
        } => {
            let resolved = load_config(config_path.as_deref())?;
            let data_path = data.unwrap_or(resolved.data_path);

            let mut session = ReportSession::new(&data_path);
            let records = session
                .records()
                .context("failed to load wellness data")?;
            for record in records.iter() {
                println!("{}", record.full_name);
            }
        }
        Commands::Config { action } => handle_config(action)?,
    }

    Ok(())
}

/// Install the stderr fmt subscriber; RUST_LOG overrides the default level
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(config_path: Option<&Path>) -> anyhow::Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let resolved = config::load_and_resolve(&cwd, config_path)
        .context("failed to load configuration")?;
    if let Some(path) = &resolved.config_path {
        info!("Using config: {}", path.display());
    }
    Ok(resolved)
}

fn write_output(rendered: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create output directory: {}", parent.display())
                })?;
            }
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write report: {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => {
            print!("{}", rendered);
            if !rendered.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

fn handle_config(action: ConfigAction) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    match action {
        ConfigAction::Validate { path } => {
            let found = match path {
                Some(p) => {
                    config::load_config_file(&p)?;
                    Some(p)
                }
                None => config::discover_config(&cwd)?.map(|(_, p)| p),
            };
            match found {
                Some(p) => println!("Config valid: {}", p.display()),
                None => println!("No config file found, using defaults"),
            }
        }
        ConfigAction::Show { path } => {
            let resolved = config::load_and_resolve(&cwd, path.as_deref())
                .context("failed to load configuration")?;

            println!("Configuration:");
            if let Some(ref p) = resolved.config_path {
                println!("  Source: {}", p.display());
            } else {
                println!("  Source: defaults (no config file found)");
            }
            println!();
            println!("Report:");
            println!("  data: {}", resolved.data_path.display());
            println!("  profile: {}", resolved.profile.as_str());
            println!("  model_label: {}", resolved.model_label);
            println!();
            println!("Bar thresholds:");
            println!("  excellent: {}", resolved.bar_thresholds.excellent);
            println!("  good: {}", resolved.bar_thresholds.good);
            println!("  moderate: {}", resolved.bar_thresholds.moderate);
            println!();
            println!("Readiness bands:");
            println!("  peak: {}", resolved.readiness_breakpoints.peak);
            println!("  high: {}", resolved.readiness_breakpoints.high);
            println!("  moderate: {}", resolved.readiness_breakpoints.moderate);
            println!("  suboptimal: {}", resolved.readiness_breakpoints.suboptimal);
        }
    }
    Ok(())
}

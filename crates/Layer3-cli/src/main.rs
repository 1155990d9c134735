//! VisionKit CLI - Main entry point

mod commands;
mod init;
mod watch;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// VisionKit - runtime-configurable vision function registry
#[derive(Parser, Debug)]
#[command(name = "visionkit")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create .visionkit/ with a sample manifest and options file
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
    /// Print the registry key for a category
    Resolve {
        /// Category (blob, ocr, caliper, pattern-match, tool-block, custom)
        category: String,

        /// Custom name (required for the custom category)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Install components and apply runtime options once
    Refresh {
        /// Component manifest (default: .visionkit/components.json)
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Runtime options file (default: global + project runtime_options.json)
        #[arg(short, long)]
        options: Option<PathBuf>,

        /// Apply entries in parallel
        #[arg(long)]
        parallel: bool,
    },
    /// Re-apply the options file whenever it changes
    Watch {
        /// Component manifest (default: .visionkit/components.json)
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Runtime options file (default: .visionkit/runtime_options.json)
        #[arg(short, long)]
        options: Option<PathBuf>,

        /// Poll interval in milliseconds
        #[arg(short, long, default_value = "1000")]
        interval: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match args.command {
        Command::Init { force } => init::init_project(force),
        Command::Resolve { category, name } => commands::resolve(&category, name.as_deref()),
        Command::Refresh {
            manifest,
            options,
            parallel,
        } => commands::refresh(manifest, options, parallel),
        Command::Watch {
            manifest,
            options,
            interval,
        } => commands::watch(manifest, options, interval).await,
    }
}

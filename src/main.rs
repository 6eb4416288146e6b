//! redmine-bar - open Redmine issues in the menu bar
//!
//! A BitBar/xbar/SwiftBar plugin that polls one or more Redmine instances
//! for open issues assigned to the current user and prints them as a menu
//! grouped by project, tracker and status.
//!
//! Stdout carries only the plugin protocol. Logs go to stderr. The process
//! exits normally after printing either the issue menu or the failure menu.

mod analysis;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod render;
mod run;

use anyhow::{Context, Result};
use cli::Args;
use config::Settings;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config(&args);
    }

    init_logging(&args);
    debug!("Arguments: {:?}", args);

    let options = args.run_options();
    for line in run::run(&options).await {
        println!("{}", line);
    }

    Ok(())
}

/// Handle --init-config: write an example settings file.
fn handle_init_config(args: &Args) -> Result<()> {
    let path = args.settings_path();

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            path.display()
        );
        std::process::exit(1);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(&path, Settings::example_json())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("✅ Created {} with example settings.", path.display());
    println!("   Replace the urls and tokens with your Redmine instances.");
    Ok(())
}

/// Initialize logging on stderr. `RUST_LOG` wins over the verbosity flags.
fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_directive()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

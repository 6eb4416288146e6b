//! Run controller.
//!
//! Loads the settings, polls every instance one after another, and renders
//! either the full menu or the abort menu. Nothing from a partially
//! successful run is ever shown.

use crate::analysis::aggregate;
use crate::client::{IssueSource, RedmineClient};
use crate::config::Settings;
use crate::error::Result;
use crate::models::AggregatedInstance;
use crate::render::{render_abort, render_menu, DisplayMode};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Everything a run needs, resolved once from the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub settings_path: PathBuf,
    pub display: DisplayMode,
    pub timeout_seconds: u64,
    pub limit: u32,
}

/// Run against the real Redmine instances and return the lines to print.
pub async fn run(options: &RunOptions) -> Vec<String> {
    match RedmineClient::new(options.timeout_seconds, options.limit) {
        Ok(client) => run_menu(&options.settings_path, &client, options.display).await,
        Err(e) => {
            error!("{}", e);
            render_abort(&e)
        }
    }
}

/// Load settings, fetch and aggregate every instance, render the outcome.
pub async fn run_menu<S: IssueSource>(
    settings_path: &Path,
    source: &S,
    display: DisplayMode,
) -> Vec<String> {
    match collect(settings_path, source).await {
        Ok(instances) => render_menu(&instances, display),
        Err(e) => {
            error!("Run aborted: {}", e);
            render_abort(&e)
        }
    }
}

/// Poll the configured instances in order, stopping at the first failure.
async fn collect<S: IssueSource>(
    settings_path: &Path,
    source: &S,
) -> Result<Vec<AggregatedInstance>> {
    let settings = Settings::load(settings_path)?;
    info!(
        "Loaded {} instances from {}",
        settings.redmine_settings.len(),
        settings_path.display()
    );

    let mut instances = Vec::with_capacity(settings.redmine_settings.len());
    for instance in &settings.redmine_settings {
        let issues = source.fetch_issues(instance).await?;
        info!("{}: {} issues", instance.url, issues.len());
        instances.push(aggregate(&instance.url, issues));
    }

    Ok(instances)
}

//! Command handlers. The `handle_*` functions return the process exit code.

use anyhow::{Context, Result};
use tracing::{debug, error, info};

use super::commands::{CliArgs, PlanArgs};
use super::output::OutputFormatter;
use crate::config::JanitorConfig;
use crate::fs::RealFileSystem;
use crate::gc::GarbageCollector;
use crate::reporter::{ConsoleReporter, NoOpReporter};

/// Builds the configuration from the environment with command-line overrides
/// applied, then validates it once.
pub fn load_config(args: &CliArgs) -> Result<JanitorConfig> {
    let config = JanitorConfig::from_env()
        .context("Invalid configuration")?
        .with_log_level(args.log_level_override())
        .with_state_dir(args.command.state_dir());
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

pub fn handle_clean(config: &JanitorConfig) -> i32 {
    match run_clean(config) {
        Ok(()) => 0,
        Err(e) => {
            error!("Cleanup failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

pub fn handle_plan(args: &PlanArgs, config: &JanitorConfig) -> i32 {
    match run_plan(args, config) {
        Ok(output) => {
            print!("{}", output);
            0
        }
        Err(e) => {
            error!("Planning failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

fn run_clean(config: &JanitorConfig) -> Result<()> {
    info!(dir = %config.state_dir.display(), "Cleaning state directory");

    let gc = GarbageCollector::new(RealFileSystem::new(), ConsoleReporter::stderr());
    gc.remove(&config.state_dir)
        .with_context(|| format!("Failed to clean {}", config.state_dir.display()))
}

fn run_plan(args: &PlanArgs, config: &JanitorConfig) -> Result<String> {
    debug!(dir = %config.state_dir.display(), "Planning cleanup");

    let gc = GarbageCollector::new(RealFileSystem::new(), NoOpReporter);
    let plan = gc
        .plan(&config.state_dir)
        .with_context(|| format!("Failed to inspect {}", config.state_dir.display()))?;

    OutputFormatter::new(args.format.into()).format_plan(&plan)
}

use bbl_janitor::cli::commands::{CliArgs, Commands};
use bbl_janitor::cli::handlers::{handle_clean, handle_plan, load_config};
use bbl_janitor::util::logging::{init_logging, LoggingConfig};
use bbl_janitor::VERSION;

use clap::Parser;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    init_logging(LoggingConfig::from(&config));

    debug!("bbl-janitor v{} starting", VERSION);
    debug!("Arguments: {:?}", args);
    debug!("{}", config);

    let exit_code = match &args.command {
        Commands::Clean(_) => handle_clean(&config),
        Commands::Plan(plan_args) => handle_plan(plan_args, &config),
    };

    std::process::exit(exit_code);
}

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Removes bbl-generated files from a state directory after teardown
#[derive(Parser, Debug)]
#[command(
    name = "bbl-janitor",
    about = "Removes bbl-generated files from a state directory after teardown",
    version,
    long_about = "bbl-janitor deletes the files bbl generated in a state directory \
                  (state file, helper scripts, vars, cloud-config, terraform) and \
                  leaves anything a user added in place, listing it on stderr."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Delete bbl-generated files",
        long_about = "Deletes every file bbl generated in the state directory. Directories \
                      that still hold user files are kept and the user files are listed.\n\n\
                      Examples:\n  \
                      bbl-janitor clean\n  \
                      bbl-janitor clean --state-dir /path/to/env"
    )]
    Clean(CleanArgs),

    #[command(
        about = "Show what clean would delete and keep",
        long_about = "Lists what `clean` would delete and preserve without touching \
                      the state directory.\n\n\
                      Examples:\n  \
                      bbl-janitor plan\n  \
                      bbl-janitor plan --state-dir /path/to/env --format json"
    )]
    Plan(PlanArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct CleanArgs {
    #[arg(
        short = 's',
        long,
        value_name = "DIR",
        help = "State directory (defaults to $BBL_STATE_DIR, then the current directory)"
    )]
    pub state_dir: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct PlanArgs {
    #[arg(
        short = 's',
        long,
        value_name = "DIR",
        help = "State directory (defaults to $BBL_STATE_DIR, then the current directory)"
    )]
    pub state_dir: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

impl CliArgs {
    /// Log level requested on the command line: `--log-level` wins, then `-v`, then `-q`
    pub fn log_level_override(&self) -> Option<String> {
        if let Some(level) = &self.log_level {
            Some(level.clone())
        } else if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        }
    }
}

impl Commands {
    pub fn state_dir(&self) -> Option<PathBuf> {
        match self {
            Commands::Clean(args) => args.state_dir.clone(),
            Commands::Plan(args) => args.state_dir.clone(),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

//! wiretrace CLI
//!
//! Records a scenario against the live API into a trace file, or replays the
//! trace offline and fails if the issued requests drift from the recording.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use wiretrace::commands::{execute_inspect, execute_run, validate_run_args, InspectArgs, RunArgs};
use wiretrace::utils::config::{DEFAULT_BASE_URL, DEFAULT_TRACE_FILE, TOKEN_ENV_VAR};

/// wiretrace - record/replay harness for API integration tests
#[derive(Parser, Debug)]
#[command(name = "wiretrace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a scenario, recording live traffic or replaying a trace
    Run {
        /// Send real requests and record them (replays the trace otherwise)
        #[arg(long)]
        record: bool,

        /// Trace file
        #[arg(short, long, default_value = DEFAULT_TRACE_FILE)]
        trace: PathBuf,

        /// Scenario TOML file (defaults to a built-in read-only scenario)
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Add the built-in write steps (edit bio, unfollow/follow, unstar/star)
        /// when no scenario file is given
        #[arg(long, conflicts_with = "scenario")]
        writes: bool,

        /// API base URL
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// API token used in record mode
        #[arg(long, env = TOKEN_ENV_VAR, hide_env_values = true)]
        token: Option<String>,

        /// Do not ask for confirmation before recording
        #[arg(short = 'y', long)]
        yes: bool,

        /// Live request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout: u64,
    },

    /// Summarize the exchanges stored in a trace file
    Inspect {
        /// Trace file
        #[arg(short, long, default_value = DEFAULT_TRACE_FILE)]
        trace: PathBuf,

        /// Print request and response bodies
        #[arg(long)]
        bodies: bool,
    },
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Run {
            record,
            trace,
            scenario,
            writes,
            base_url,
            token,
            yes,
            timeout,
        } => {
            let args = RunArgs {
                record,
                trace_path: trace,
                scenario,
                writes,
                base_url,
                token,
                assume_yes: yes,
                timeout_secs: timeout,
            };

            // Validate args first
            validate_run_args(&args)?;

            execute_run(args)?;
        }

        Commands::Inspect { trace, bodies } => {
            execute_inspect(InspectArgs {
                trace_path: trace,
                bodies,
            })?;
        }
    }

    Ok(())
}

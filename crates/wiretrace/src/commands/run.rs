//! Run command implementation.
//!
//! The run command:
//! 1. Asks for confirmation when recording
//! 2. Opens a record or replay session
//! 3. Plays the scenario through the API client
//! 4. Finishes the session (flushes the trace)

use super::models::RunArgs;
use crate::api::ApiClient;
use crate::scenario::{load_scenario, play_scenario, Scenario};
use crate::session::{Mode, Session, SessionConfig};
use crate::utils::config::RECORD_CONFIRMATION;
use crate::utils::error::ApiError;
use anyhow::{Context, Result};
use colored::*;
use log::{info, warn};
use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

/// Execute the run command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Record mode not confirmed, or no token (record mode)
/// * Missing trace file (replay mode)
/// * Any transport failure, including replay mismatches
pub fn execute_run(args: RunArgs) -> Result<usize> {
    let start_time = Instant::now();
    let mode = Mode::from_record_flag(args.record);

    let scenario = match &args.scenario {
        Some(path) => load_scenario(path)
            .with_context(|| format!("Failed to load scenario {}", path.display()))?,
        None => Scenario::builtin(args.writes),
    };

    if mode == Mode::Record && !args.assume_yes {
        let stdin = std::io::stdin();
        let confirmed = confirm_record_mode(&mut stdin.lock(), &mut std::io::stdout())
            .context("Failed to read confirmation")?;
        if !confirmed {
            anyhow::bail!("Record mode not confirmed; no request was made");
        }
    }

    let config = SessionConfig {
        mode,
        trace_path: args.trace_path.clone(),
        base_url: args.base_url.clone(),
        token: args.token.clone(),
        timeout: Duration::from_secs(args.timeout_secs),
    };

    info!("Starting {} run against {}", mode, config.base_url);

    let (session, credentials) = Session::open(&config).context("Failed to start session")?;
    let trace_path = session.trace_path().to_path_buf();
    let mut client = ApiClient::new(session, credentials);

    let outcomes = match play_scenario(&mut client, &scenario) {
        Ok(outcomes) => outcomes,
        Err(e) => {
            if is_stale_trace(&e) {
                warn!(
                    "{} no longer matches scenario '{}'; re-record it with --record",
                    trace_path.display(),
                    scenario.name
                );
            }
            return Err(anyhow::Error::new(e)
                .context(format!("Scenario '{}' failed in {} mode", scenario.name, mode)));
        }
    };

    for outcome in &outcomes {
        println!(
            "{} {:<6} {} {}",
            outcome.status.to_string().green(),
            outcome.method,
            outcome.path,
            outcome.label.as_deref().unwrap_or("").dimmed()
        );
    }

    let exchanges = client
        .into_transport()
        .finish()
        .context("Failed to finish session")?;

    info!(
        "{} run completed: {} exchanges in {:.2}s",
        mode,
        exchanges,
        start_time.elapsed().as_secs_f64()
    );
    Ok(exchanges)
}

/// True when a run failed because the trace and the code have diverged
pub fn is_stale_trace(err: &ApiError) -> bool {
    matches!(err, ApiError::Transport(e) if e.is_replay_failure())
}

/// Ask the operator to allow live requests.
///
/// **Public** - generic over the streams so it can be tested
pub fn confirm_record_mode<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> std::io::Result<bool> {
    writeln!(
        output,
        "Record mode: real requests will be sent to the API. Type '{}' and press return to continue.",
        RECORD_CONFIRMATION
    )?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim() == RECORD_CONFIRMATION)
}

/// Validate run arguments
///
/// **Public** - can be called before execute_run for early validation
pub fn validate_run_args(args: &RunArgs) -> Result<()> {
    if args.base_url.is_empty() {
        anyhow::bail!("Base URL cannot be empty");
    }

    if !args.base_url.starts_with("http://") && !args.base_url.starts_with("https://") {
        anyhow::bail!("Base URL must start with http:// or https://");
    }

    if args.trace_path.as_os_str().is_empty() {
        anyhow::bail!("Trace path cannot be empty");
    }

    if args.trace_path.is_dir() {
        anyhow::bail!("Trace path is a directory: {}", args.trace_path.display());
    }

    if args.timeout_secs == 0 {
        anyhow::bail!("Timeout must be greater than 0");
    }

    Ok(())
}

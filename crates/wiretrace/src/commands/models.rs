use crate::utils::config::{DEFAULT_BASE_URL, DEFAULT_HTTP_TIMEOUT, DEFAULT_TRACE_FILE};
use std::path::PathBuf;

/// Arguments for the run command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct RunArgs {
    /// Record live traffic instead of replaying the trace
    pub record: bool,

    /// Trace file to write (record) or read (replay)
    pub trace_path: PathBuf,

    /// Scenario TOML file; the built-in read-only scenario when absent
    pub scenario: Option<PathBuf>,

    /// Append the built-in write steps to the built-in read scenario
    pub writes: bool,

    /// API base URL
    pub base_url: String,

    /// API token (record mode only)
    pub token: Option<String>,

    /// Skip the interactive confirmation in record mode
    pub assume_yes: bool,

    /// Live request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            record: false,
            trace_path: PathBuf::from(DEFAULT_TRACE_FILE),
            scenario: None,
            writes: false,
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            assume_yes: false,
            timeout_secs: DEFAULT_HTTP_TIMEOUT.as_secs(),
        }
    }
}

/// Arguments for the inspect command
#[derive(Debug, Clone)]
pub struct InspectArgs {
    /// Trace file to parse
    pub trace_path: PathBuf,

    /// Print response bodies as well
    pub bodies: bool,
}

impl Default for InspectArgs {
    fn default() -> Self {
        Self {
            trace_path: PathBuf::from(DEFAULT_TRACE_FILE),
            bodies: false,
        }
    }
}

//! Error types for the entire library.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in commands and main.rs.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while encoding or decoding trace lines
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Trace is corrupt at line {line}: {reason}")]
    Corrupt { line: usize, reason: String },

    #[error("Trace I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl TraceError {
    pub(crate) fn corrupt(line: usize, reason: impl Into<String>) -> Self {
        TraceError::Corrupt {
            line,
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by any [`crate::transport::Transport`]
#[derive(Error, Debug)]
pub enum TransportError {
    /// Failure of the real network layer, passed through untouched
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Replay mismatch in exchange #{exchange}:\n  recorded: {expected:?}\n  issued:   {actual:?}")]
    ReplayMismatch {
        exchange: usize,
        expected: String,
        actual: String,
    },

    #[error("Trace exhausted: exchange #{exchange} was never recorded")]
    TraceExhausted { exchange: usize },

    #[error(transparent)]
    Trace(#[from] TraceError),

    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    #[error("Transport used out of sequence: {0}")]
    OutOfSequence(&'static str),
}

impl TransportError {
    /// True for the failures that mean the trace no longer matches the code
    pub fn is_replay_failure(&self) -> bool {
        matches!(
            self,
            TransportError::ReplayMismatch { .. }
                | TransportError::TraceExhausted { .. }
                | TransportError::Trace(TraceError::Corrupt { .. })
        )
    }
}

/// Errors that can occur while setting up a session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Trace file not found: {0} (run again with --record to create it)")]
    TraceNotFound(PathBuf),

    #[error("Credentials missing: set the GITHUB_TOKEN environment variable to record")]
    CredentialsMissing,

    #[error("Failed to open trace file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Errors returned by the API client
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("HTTP {status} for {method} {path}: {body}")]
    Status {
        method: String,
        path: String,
        status: u16,
        body: String,
    },

    #[error("Failed to (de)serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur while loading a scenario
#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("Failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scenario TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid scenario step #{index}: {reason}")]
    InvalidStep { index: usize, reason: String },
}

//! Session bootstrap: binds exactly one of record or replay to a run.
//!
//! The session never picks its own mode. The caller states whether recording
//! was requested and the session wires either a [`Recorder`] around a live
//! transport or a [`Player`] over an existing trace.

pub mod credentials;

pub use credentials::Credentials;

use crate::trace::{Headers, ResponseSnapshot, TraceCursor, TraceWriter};
use crate::transport::{LiveTransport, Player, Recorder, Transport};
use crate::utils::config::{DEFAULT_BASE_URL, DEFAULT_HTTP_TIMEOUT, DEFAULT_TRACE_FILE};
use crate::utils::error::{SessionError, TransportError};
use log::{info, warn};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which side of the harness a run uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Record,
    Replay,
}

impl Mode {
    pub fn from_record_flag(record: bool) -> Self {
        if record {
            Mode::Record
        } else {
            Mode::Replay
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Record => write!(f, "record"),
            Mode::Replay => write!(f, "replay"),
        }
    }
}

/// Everything needed to open a session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub mode: Mode,
    pub trace_path: PathBuf,
    pub base_url: String,
    /// API token; required in record mode, ignored in replay mode
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Replay,
            trace_path: PathBuf::from(DEFAULT_TRACE_FILE),
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }
}

enum Binding {
    Record(Recorder<Box<dyn Transport>, BufWriter<File>>),
    Replay(Player<BufReader<File>>),
}

/// A transport bound to one trace file for the duration of one run
pub struct Session {
    binding: Binding,
    trace_path: PathBuf,
}

impl Session {
    /// Open a session as described by `config`.
    ///
    /// Returns the credentials the API client should present: the configured
    /// token when recording, a placeholder when replaying.
    ///
    /// # Errors
    /// * `SessionError::CredentialsMissing` - record mode without a token
    /// * `SessionError::TraceNotFound` - replay mode without a trace file
    pub fn open(config: &SessionConfig) -> Result<(Self, Credentials), SessionError> {
        match config.mode {
            Mode::Record => {
                let credentials = config
                    .token
                    .as_deref()
                    .and_then(Credentials::from_token)
                    .ok_or(SessionError::CredentialsMissing)?;
                let live = LiveTransport::with_timeout(config.base_url.as_str(), config.timeout)?;
                let session = Self::record(&config.trace_path, Box::new(live))?;
                Ok((session, credentials))
            }
            Mode::Replay => {
                let session = Self::replay(&config.trace_path)?;
                Ok((session, Credentials::placeholder()))
            }
        }
    }

    /// Record through `inner` into a fresh trace at `path` (truncated if present)
    pub fn record(path: impl AsRef<Path>, inner: Box<dyn Transport>) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let writer = TraceWriter::create(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Recording exchanges to: {}", path.display());

        Ok(Self {
            binding: Binding::Record(Recorder::new(inner, writer)),
            trace_path: path.to_path_buf(),
        })
    }

    /// Replay the trace at `path`
    pub fn replay(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let cursor = TraceCursor::open(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => SessionError::TraceNotFound(path.to_path_buf()),
            _ => SessionError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        info!("Replaying exchanges from: {}", path.display());

        Ok(Self {
            binding: Binding::Replay(Player::new(cursor)),
            trace_path: path.to_path_buf(),
        })
    }

    pub fn mode(&self) -> Mode {
        match self.binding {
            Binding::Record(_) => Mode::Record,
            Binding::Replay(_) => Mode::Replay,
        }
    }

    pub fn trace_path(&self) -> &Path {
        &self.trace_path
    }

    /// Completed exchanges so far
    pub fn exchanges(&self) -> usize {
        match &self.binding {
            Binding::Record(recorder) => recorder.exchanges(),
            Binding::Replay(player) => player.exchanges(),
        }
    }

    /// Tear the session down, flushing the trace. Returns the number of
    /// completed exchanges.
    ///
    /// Replaying fewer exchanges than were recorded is reported as a warning;
    /// only extra or diverging requests are errors.
    pub fn finish(self) -> Result<usize, SessionError> {
        let exchanges = self.exchanges();

        match self.binding {
            Binding::Record(mut recorder) => {
                recorder.flush().map_err(TransportError::from)?;
                info!("Recorded {} exchanges", exchanges);
            }
            Binding::Replay(mut player) => {
                if !player.is_exhausted().map_err(TransportError::from)? {
                    warn!(
                        "Trace {} has exchanges that were never replayed",
                        self.trace_path.display()
                    );
                }
                info!("Replayed {} exchanges", exchanges);
            }
        }

        Ok(exchanges)
    }

    fn transport(&mut self) -> &mut dyn Transport {
        match &mut self.binding {
            Binding::Record(recorder) => recorder,
            Binding::Replay(player) => player,
        }
    }
}

impl Transport for Session {
    fn request(
        &mut self,
        method: &str,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<(), TransportError> {
        self.transport().request(method, url, body, headers)
    }

    fn get_response(&mut self) -> Result<ResponseSnapshot, TransportError> {
        self.transport().get_response()
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.transport().close()
    }
}

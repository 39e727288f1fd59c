//! Append-only trace writer.

use super::codec::escape_body;
use super::entry::{ResponseSnapshot, TraceEntry};
use crate::utils::error::TraceError;
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes exchanges to a trace, one field per line
pub struct TraceWriter<W: Write> {
    inner: W,
    exchanges: usize,
}

impl TraceWriter<BufWriter<File>> {
    /// Create (or truncate) a trace file, creating parent directories as needed
    pub fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("Creating parent directories: {}", parent.display());
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TraceWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            exchanges: 0,
        }
    }

    /// Write a request line built by [`super::codec::encode_request_line`]
    pub fn write_request_line(&mut self, line: &str) -> Result<(), TraceError> {
        self.write_line(line)
    }

    /// Write the status, header and body lines of a response
    pub fn write_response(&mut self, response: &ResponseSnapshot) -> Result<(), TraceError> {
        self.write_line(&response.status.to_string())?;
        self.write_line(&response.headers.canonical())?;
        self.write_line(&escape_body(&response.body))
    }

    /// Terminate the current exchange with a blank line and flush
    pub fn write_sentinel(&mut self) -> Result<(), TraceError> {
        self.write_line("")?;
        self.exchanges += 1;
        self.flush()
    }

    /// Write a complete exchange
    pub fn write_entry(&mut self, entry: &TraceEntry) -> Result<(), TraceError> {
        self.write_request_line(&entry.request().to_line())?;
        self.write_response(&entry.response())?;
        self.write_sentinel()
    }

    pub fn flush(&mut self) -> Result<(), TraceError> {
        self.inner.flush()?;
        Ok(())
    }

    /// Number of exchanges terminated so far
    pub fn exchanges(&self) -> usize {
        self.exchanges
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    fn write_line(&mut self, line: &str) -> Result<(), TraceError> {
        self.inner.write_all(line.as_bytes())?;
        self.inner.write_all(b"\n")?;
        Ok(())
    }
}

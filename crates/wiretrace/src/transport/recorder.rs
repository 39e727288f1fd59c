//! Recording transport.
//!
//! Forwards every call to a real transport and appends the exchange to a
//! trace. Callers get the live response back unchanged.

use super::{redact, Transport};
use crate::trace::codec::encode_request_line;
use crate::trace::{Headers, ResponseSnapshot, TraceWriter};
use crate::utils::error::{TraceError, TransportError};
use log::debug;
use std::io::Write;

pub struct Recorder<T: Transport, W: Write> {
    inner: T,
    writer: TraceWriter<W>,
    response: Option<ResponseSnapshot>,
}

impl<T: Transport, W: Write> Recorder<T, W> {
    pub fn new(inner: T, writer: TraceWriter<W>) -> Self {
        Self {
            inner,
            writer,
            response: None,
        }
    }

    /// Exchanges recorded so far
    pub fn exchanges(&self) -> usize {
        self.writer.exchanges()
    }

    /// Flush buffered trace lines
    pub fn flush(&mut self) -> Result<(), TraceError> {
        self.writer.flush()
    }

    pub fn into_parts(self) -> (T, TraceWriter<W>) {
        (self.inner, self.writer)
    }
}

impl<T: Transport, W: Write> Transport for Recorder<T, W> {
    fn request(
        &mut self,
        method: &str,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<(), TransportError> {
        // The real request still carries its credentials.
        self.inner.request(method, url, body, headers)?;

        let line = encode_request_line(method, url, &redact(headers), body);
        debug!("record > {}", line);
        self.writer.write_request_line(&line)?;

        self.response = None;
        Ok(())
    }

    fn get_response(&mut self) -> Result<ResponseSnapshot, TransportError> {
        if let Some(snapshot) = &self.response {
            return Ok(snapshot.clone());
        }

        let snapshot = self.inner.get_response()?;
        debug!("record < {}", snapshot.status);
        self.writer.write_response(&snapshot)?;

        self.response = Some(snapshot.clone());
        Ok(snapshot)
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.writer.write_sentinel()?;
        self.response = None;
        self.inner.close()
    }
}

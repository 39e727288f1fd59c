//! Forward-only trace reading.

use super::codec::{parse_headers, parse_request_line, parse_status, unescape_body};
use super::entry::{ResponseSnapshot, TraceEntry};
use crate::utils::error::TraceError;
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Line cursor over a trace.
///
/// Only moves forward; remembers the number of the last line read so decode
/// errors can name it.
pub struct TraceCursor<R: BufRead> {
    inner: R,
    line: usize,
}

impl TraceCursor<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> TraceCursor<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, line: 0 }
    }

    /// Next line without its terminator (`\n` or `\r\n`), or `None` at end
    /// of input. A line that is not UTF-8 is corrupt.
    pub fn next_line(&mut self) -> Result<Option<String>, TraceError> {
        let mut buf = Vec::new();
        if self.inner.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;

        // Written traces never hold a raw '\r' (bodies escape it), so a
        // trailing one comes from a CRLF checkout.
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }

        String::from_utf8(buf)
            .map(Some)
            .map_err(|_| TraceError::corrupt(self.line, "line is not valid UTF-8"))
    }

    /// 1-based number of the last line returned (0 before the first read)
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// True when no bytes are left
    pub fn at_end(&mut self) -> Result<bool, TraceError> {
        Ok(self.inner.fill_buf()?.is_empty())
    }
}

/// Parse every exchange in a trace, checking the shape of each block
pub fn read_entries<R: BufRead>(
    cursor: &mut TraceCursor<R>,
) -> Result<Vec<TraceEntry>, TraceError> {
    let mut entries = Vec::new();

    while let Some(request_line) = cursor.next_line()? {
        let line = cursor.line_number();
        if request_line.is_empty() {
            return Err(TraceError::corrupt(line, "blank line where a request was expected"));
        }
        let request = parse_request_line(&request_line, line)?;

        let status = required_line(cursor, "status")?;
        let status = parse_status(&status, cursor.line_number())?;
        let headers = required_line(cursor, "response headers")?;
        let headers = parse_headers(&headers, cursor.line_number())?;
        let body = required_line(cursor, "response body")?;
        let body = unescape_body(&body, cursor.line_number())?;

        let sentinel = required_line(cursor, "blank separator")?;
        if !sentinel.is_empty() {
            return Err(TraceError::corrupt(
                cursor.line_number(),
                "expected a blank line after the response body",
            ));
        }

        entries.push(TraceEntry::new(request, ResponseSnapshot::new(status, headers, body)));
    }

    debug!("Read {} exchanges from trace", entries.len());
    Ok(entries)
}

/// Read and parse a whole trace file
pub fn read_trace(path: impl AsRef<Path>) -> Result<Vec<TraceEntry>, TraceError> {
    let path = path.as_ref();
    debug!("Reading trace from: {}", path.display());

    let mut cursor = TraceCursor::open(path)?;
    read_entries(&mut cursor)
}

fn required_line<R: BufRead>(
    cursor: &mut TraceCursor<R>,
    what: &str,
) -> Result<String, TraceError> {
    cursor.next_line()?.ok_or_else(|| {
        TraceError::corrupt(
            cursor.line_number() + 1,
            format!("trace ends where the {} was expected", what),
        )
    })
}

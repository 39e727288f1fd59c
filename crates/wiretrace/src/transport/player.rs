//! Replaying transport.
//!
//! Serves responses from a trace and fails as soon as the code under test
//! issues a request that differs from the recorded one. Never touches the
//! network.

use super::{redact, Transport};
use crate::trace::codec::{encode_request_line, parse_headers, parse_status, unescape_body};
use crate::trace::{Headers, ResponseSnapshot, TraceCursor};
use crate::utils::error::{TraceError, TransportError};
use log::debug;
use std::io::BufRead;

pub struct Player<R: BufRead> {
    cursor: TraceCursor<R>,
    consumed: usize,
    response: Option<ResponseSnapshot>,
}

impl<R: BufRead> Player<R> {
    pub fn new(cursor: TraceCursor<R>) -> Self {
        Self {
            cursor,
            consumed: 0,
            response: None,
        }
    }

    /// Exchanges fully replayed (closed) so far
    pub fn exchanges(&self) -> usize {
        self.consumed
    }

    /// True when every recorded line has been consumed
    pub fn is_exhausted(&mut self) -> Result<bool, TraceError> {
        self.cursor.at_end()
    }

    /// 1-based number of the exchange in progress
    fn current(&self) -> usize {
        self.consumed + 1
    }

    fn next_line(&mut self) -> Result<String, TransportError> {
        self.cursor
            .next_line()?
            .ok_or(TransportError::TraceExhausted {
                exchange: self.current(),
            })
    }
}

impl<R: BufRead> Transport for Player<R> {
    fn request(
        &mut self,
        method: &str,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<(), TransportError> {
        self.response = None;

        let actual = encode_request_line(method, url, &redact(headers), body);
        let expected = self.next_line()?;
        debug!("replay > {}", actual);

        if expected != actual {
            return Err(TransportError::ReplayMismatch {
                exchange: self.current(),
                expected,
                actual,
            });
        }
        Ok(())
    }

    fn get_response(&mut self) -> Result<ResponseSnapshot, TransportError> {
        if let Some(snapshot) = &self.response {
            return Ok(snapshot.clone());
        }

        let status = self.next_line()?;
        let status = parse_status(&status, self.cursor.line_number())?;
        let headers = self.next_line()?;
        let headers = parse_headers(&headers, self.cursor.line_number())?;
        let body = self.next_line()?;
        let body = unescape_body(&body, self.cursor.line_number())?;

        debug!("replay < {}", status);

        let snapshot = ResponseSnapshot::new(status, headers, body);
        self.response = Some(snapshot.clone());
        Ok(snapshot)
    }

    fn close(&mut self) -> Result<(), TransportError> {
        let sentinel = self.next_line()?;
        if !sentinel.is_empty() {
            return Err(TransportError::ReplayMismatch {
                exchange: self.current(),
                expected: sentinel,
                actual: String::new(),
            });
        }

        self.consumed += 1;
        self.response = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TRACE: &str = concat!(
        "GET /users/alice [[\"Accept\",\"application/json\"]] \n",
        "200\n",
        "[[\"Content-Type\",\"application/json\"]]\n",
        "{\"login\":\"alice\"}\n",
        "\n",
    );

    fn player(text: &str) -> Player<Cursor<Vec<u8>>> {
        Player::new(TraceCursor::new(Cursor::new(text.as_bytes().to_vec())))
    }

    fn accept_json() -> Headers {
        [("Accept", "application/json")].into_iter().collect()
    }

    #[test]
    fn test_replays_recorded_exchange() {
        let mut player = player(TRACE);
        player.request("GET", "/users/alice", "", &accept_json()).unwrap();

        let response = player.get_response().unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.body, r#"{"login":"alice"}"#);
        assert_eq!(player.get_response().unwrap(), response);

        player.close().unwrap();
        assert_eq!(player.exchanges(), 1);
        assert!(player.is_exhausted().unwrap());
    }

    #[test]
    fn test_credentials_do_not_affect_matching() {
        let mut player = player(TRACE);
        let mut headers = accept_json();
        headers.insert("Authorization", "token placeholder");
        player.request("GET", "/users/alice", "", &headers).unwrap();
    }

    #[test]
    fn test_mismatch_reports_both_lines() {
        let mut player = player(TRACE);
        let err = player
            .request("GET", "/users/bob", "", &accept_json())
            .unwrap_err();

        match err {
            TransportError::ReplayMismatch {
                exchange,
                expected,
                actual,
            } => {
                assert_eq!(exchange, 1);
                assert!(expected.contains("/users/alice"));
                assert!(actual.contains("/users/bob"));
            }
            other => panic!("expected mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_exhausted_on_extra_request() {
        let mut player = player(TRACE);
        player.request("GET", "/users/alice", "", &accept_json()).unwrap();
        player.get_response().unwrap();
        player.close().unwrap();

        let err = player
            .request("GET", "/users/alice", "", &accept_json())
            .unwrap_err();
        assert!(matches!(err, TransportError::TraceExhausted { exchange: 2 }));
    }

    #[test]
    fn test_corrupt_status() {
        let mut player = player("GET /user [] \nnot-a-status\n[]\n\n\n");
        player.request("GET", "/user", "", &Headers::new()).unwrap();

        match player.get_response() {
            Err(TransportError::Trace(TraceError::Corrupt { line, .. })) => assert_eq!(line, 2),
            other => panic!("expected corrupt trace, got {:?}", other),
        }
    }

    #[test]
    fn test_sentinel_is_validated() {
        let mut player = player("GET /user [] \n200\n[]\nbody\nunexpected\n");
        player.request("GET", "/user", "", &Headers::new()).unwrap();
        player.get_response().unwrap();

        assert!(matches!(
            player.close(),
            Err(TransportError::ReplayMismatch { .. })
        ));
    }

    #[test]
    fn test_truncated_response_is_exhausted() {
        let mut player = player("GET /user [] \n200\n");
        player.request("GET", "/user", "", &Headers::new()).unwrap();
        assert!(matches!(
            player.get_response(),
            Err(TransportError::TraceExhausted { exchange: 1 })
        ));
    }
}

//! Pluggable HTTP transports.
//!
//! API code talks to a [`Transport`] and never to a concrete network client.
//! [`LiveTransport`] hits the network, [`Recorder`] wraps another transport
//! and writes every exchange to a trace, [`Player`] answers from a trace.

pub mod live;
pub mod player;
pub mod recorder;
pub mod redact;

// Re-export main types
pub use live::LiveTransport;
pub use player::Player;
pub use recorder::Recorder;
pub use redact::redact;

use crate::trace::{Headers, ResponseSnapshot};
use crate::utils::error::TransportError;

/// One HTTP exchange at a time: `request`, then `get_response`, then `close`.
pub trait Transport {
    /// Issue a request. `url` is the path and query; the host is implied.
    fn request(
        &mut self,
        method: &str,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<(), TransportError>;

    /// Response to the last request. Repeated calls before `close` return
    /// the same snapshot.
    fn get_response(&mut self) -> Result<ResponseSnapshot, TransportError>;

    /// End the current exchange
    fn close(&mut self) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn request(
        &mut self,
        method: &str,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<(), TransportError> {
        (**self).request(method, url, body, headers)
    }

    fn get_response(&mut self) -> Result<ResponseSnapshot, TransportError> {
        (**self).get_response()
    }

    fn close(&mut self) -> Result<(), TransportError> {
        (**self).close()
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn request(
        &mut self,
        method: &str,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<(), TransportError> {
        (**self).request(method, url, body, headers)
    }

    fn get_response(&mut self) -> Result<ResponseSnapshot, TransportError> {
        (**self).get_response()
    }

    fn close(&mut self) -> Result<(), TransportError> {
        (**self).close()
    }
}

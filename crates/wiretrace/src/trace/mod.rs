//! On-disk trace format shared by the recorder and the player.
//!
//! A trace is a sequence of exchanges, each written as five lines:
//!
//! ```text
//! <METHOD> <URL> <redacted-headers> <request-body>
//! <status-code>
//! <response-headers>
//! <response-body>
//! <blank line>
//! ```
//!
//! Header maps are rendered with [`Headers::canonical`] and bodies with
//! [`codec::escape_body`], so every field stays on its own line.

pub mod codec;
pub mod entry;
pub mod headers;
pub mod reader;
pub mod writer;

// Re-export main types
pub use entry::{RecordedRequest, ResponseSnapshot, TraceEntry};
pub use headers::Headers;
pub use reader::{read_entries, read_trace, TraceCursor};
pub use writer::TraceWriter;

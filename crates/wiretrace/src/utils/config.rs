//! Configuration and constants shared by the library and the CLI.

use std::time::Duration;

/// Trace file used when no `--trace` path is given
pub const DEFAULT_TRACE_FILE: &str = "ReplayDataForIntegrationTest.txt";

/// API root; recorded URLs are relative to it
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Default timeout for live HTTP requests
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent on every request (GitHub rejects requests without one).
/// Part of every recorded request line, so it must not vary between runs.
pub const USER_AGENT: &str = "wiretrace";

/// Media type requested from the API
pub const ACCEPT_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Environment variable holding the API token for record mode
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Token used while replaying. It is redacted before comparison, so its value
/// never matters.
pub const PLACEHOLDER_TOKEN: &str = "placeholder";

/// Headers deleted before a request is written or compared.
/// Matched ASCII case-insensitively.
pub const CREDENTIAL_HEADERS: &[&str] = &["Authorization", "Proxy-Authorization"];

/// Answer the operator must type to allow live calls in record mode
pub const RECORD_CONFIRMATION: &str = "yes";

//! Thin REST client used to drive a session.

pub mod client;

// Re-export main types
pub use client::ApiClient;

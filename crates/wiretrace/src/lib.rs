//! wiretrace library
//!
//! Record/replay harness for HTTP integration tests. A [`transport::Transport`]
//! is either live (real network), a [`transport::Recorder`] that tees every
//! exchange into a trace file, or a [`transport::Player`] that serves the
//! trace back while checking that the same requests are issued again.

pub mod api;
pub mod commands;
pub mod scenario;
pub mod session;
pub mod trace;
pub mod transport;
pub mod utils;

//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the library components to perform user tasks.

pub mod inspect;
pub mod models;
pub mod run;

// Re-export main command functions
pub use inspect::execute_inspect;
pub use models::{InspectArgs, RunArgs};
pub use run::{confirm_record_mode, execute_run, is_stale_trace, validate_run_args};

//! Inspect command implementation.
//! Parses a trace file and prints one line per recorded exchange.

use super::models::InspectArgs;
use crate::trace::read_trace;
use anyhow::{Context, Result};
use colored::*;

/// Execute the inspect command
pub fn execute_inspect(args: InspectArgs) -> Result<usize> {
    let entries = read_trace(&args.trace_path)
        .with_context(|| format!("Failed to read trace {}", args.trace_path.display()))?;

    println!("Trace: {}", args.trace_path.display().to_string().cyan());
    println!("  Exchanges: {}", entries.len());
    println!();

    for (index, entry) in entries.iter().enumerate() {
        let status = if (200..300).contains(&entry.status) {
            entry.status.to_string().green()
        } else {
            entry.status.to_string().red()
        };

        println!(
            "  #{:<4} {:<6} {} -> {} ({} bytes)",
            index + 1,
            entry.method,
            entry.url,
            status,
            entry.response_body.len()
        );

        if args.bodies {
            if !entry.request_body.is_empty() {
                println!("        > {}", entry.request_body);
            }
            println!("        < {}", entry.response_body);
        }
    }

    Ok(entries.len())
}

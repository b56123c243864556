// src/output/writer.rs
//! Executes output operations by performing actual I/O.
//!
//! This module is the only place where output I/O happens.

use super::types::*;
use crate::error::AppError;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Delivers the output plan, performing all I/O operations.
///
/// Individual failures are collected in the report rather than aborting
/// the remaining operations.
pub fn deliver(plan: OutputPlan) -> OutputReport {
    log::debug!(
        "Executing output plan with {} operations",
        plan.operations.len()
    );

    plan.operations
        .into_iter()
        .fold(OutputReport::new(), |report, operation| {
            match execute_operation(&operation) {
                Ok(bytes_written) => report.with_completed(CompletedOperation {
                    operation,
                    bytes_written,
                }),
                Err(e) => {
                    log::error!("Operation failed: {}", e);
                    report.with_failed(FailedOperation {
                        operation,
                        error: e.to_string(),
                    })
                }
            }
        })
}

/// Executes a single output operation.
fn execute_operation(operation: &DeliveryTarget) -> Result<usize, AppError> {
    match operation {
        DeliveryTarget::WriteFile { path, content } => write_file(path, content),
        DeliveryTarget::PrintToStdout { content } => {
            print_to_stdout(content)?;
            Ok(content.len())
        }
    }
}

/// Writes content to a file, creating parent directories if needed.
fn write_file(path: &Path, content: &str) -> Result<usize, AppError> {
    log::debug!("Writing {} bytes to {}", content.len(), path.display());

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, content)?;

    log::info!("Wrote file: {}", path.display());
    Ok(content.len())
}

/// Prints content to stdout.
fn print_to_stdout(content: &str) -> Result<(), AppError> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

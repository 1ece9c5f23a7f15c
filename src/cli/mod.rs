//! Command line host for the release action.
//!
//! Plays the part of the pipeline runtime: loads options, drives the action's
//! lifecycle hooks, and keeps the execution context on disk between the
//! `release` and `rollback` invocations.

mod args;
pub mod commands;
mod output;

pub use args::{Args, Command, OptionArgs, RuntimeConfig};
pub use commands::execute_command;
pub use output::OutputManager;

use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute_command(args).await
}

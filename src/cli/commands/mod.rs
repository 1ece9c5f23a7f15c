//! Command execution for the release, rollback and options commands.

mod helpers;
mod options;
mod release;
mod rollback;

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::Result;

use options::execute_options;
use release::execute_release;
use rollback::execute_rollback;

/// Execute the main command based on parsed arguments
pub async fn execute_command(args: Args) -> Result<i32> {
    if let Err(validation_error) = args.validate() {
        let output = super::OutputManager::new(false);
        output.error(&format!("Invalid arguments: {}", validation_error));
        return Ok(1);
    }

    let config = RuntimeConfig::from(&args);

    let result = match &args.command {
        Command::Release(opts) => execute_release(opts, &config).await,
        Command::Rollback(opts) => execute_rollback(opts, &config).await,
        Command::Options => execute_options(&config),
    };

    match result {
        Ok(exit_code) => Ok(exit_code),
        Err(e) => {
            config.error_println(&format!(
                "Command '{}' failed: {}",
                args.command.name(),
                e
            ));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                config.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    config.indent(&format!("• {}", suggestion));
                }
            }
            if !e.is_recoverable() {
                config.println("Re-running with the same inputs will fail the same way");
            }

            Ok(1)
        }
    }
}

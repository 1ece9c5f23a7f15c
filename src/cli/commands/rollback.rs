//! Rollback command implementation.
//!
//! Loads the saved execution context and asks the action to delete the release
//! it recorded. The state file is removed only after a successful restore.

use super::helpers::{github_action, load_options};
use crate::action::{Action, RestoreOutcome};
use crate::cli::{OptionArgs, RuntimeConfig};
use crate::error::Result;

/// Execute rollback command
pub(super) async fn execute_rollback(opts: &OptionArgs, config: &RuntimeConfig) -> Result<i32> {
    let store = config.context_store();
    if !store.exists() {
        config.println(&format!(
            "No saved context at {}; nothing to roll back",
            store.path().display()
        ));
        return Ok(0);
    }

    let options = load_options(opts, config)?;
    let persisted = store.load_state().await?;
    persisted.ensure_repository(&options)?;

    let action = github_action(opts)?;
    let mut context = persisted.context;

    config.println(&format!("🔄 Rolling back GitHub release in {}...", options.slug()));
    match action.restore(&options, &mut context).await? {
        RestoreOutcome::ReleaseRemoved { release_id } => {
            config.success_println(&format!("Deleted release {}", release_id));
        }
        RestoreOutcome::NothingToRestore => {
            config.println("No release was created; nothing to roll back");
        }
    }

    store.cleanup_state().await?;
    Ok(0)
}

//! Release command implementation.
//!
//! Runs `creates_restoration_point` and `execute`, then saves the execution
//! context whenever a release exists on GitHub, whether or not the uploads
//! succeeded, so a later `rollback` can remove it.

use super::helpers::{github_action, load_options};
use crate::action::Action;
use crate::cli::{OptionArgs, RuntimeConfig};
use crate::error::Result;
use crate::state::PersistedContext;

/// Execute release command
pub(super) async fn execute_release(opts: &OptionArgs, config: &RuntimeConfig) -> Result<i32> {
    let options = load_options(opts, config)?;
    let action = github_action(opts)?;
    let store = config.context_store();

    if store.exists()
        && let Ok(previous) = store.load_state().await
        && previous.context.needs_rollback()
    {
        config.warning_println(&format!(
            "Overwriting saved context for release {} in {}/{}; it can no longer be rolled back",
            previous.context.release_id.unwrap_or_default(),
            previous.owner,
            previous.repository
        ));
    }

    let mut context = action.creates_context_from_options_map(&options);
    action.creates_restoration_point(&options, &mut context)?;

    config.println(&format!("🚀 Creating GitHub release in {}...", options.slug()));
    let result = action.execute(&options, &mut context).await;

    if let Some(release_id) = context.release_id {
        match store
            .save_state(&PersistedContext::new(&options, context.clone()))
            .await
        {
            Ok(saved) => log::debug!(
                "Execution context saved in {:?} ({} bytes)",
                saved.save_duration,
                saved.file_size_bytes
            ),
            Err(save_error) => {
                config.error_println(&format!(
                    "Release {} exists on GitHub but its context could not be saved to {}; delete it manually",
                    release_id,
                    store.path().display()
                ));
                if let Err(e) = &result {
                    config.error_println(&format!("Release run failed: {}", e));
                }
                return Err(save_error);
            }
        }
    }

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            if context.needs_rollback() {
                config.warning_println(&format!(
                    "Release {} was created and kept; context saved to {}",
                    context.release_id.unwrap_or_default(),
                    store.path().display()
                ));
            }
            return Err(e);
        }
    };

    config.success_println(&format!("Created release {}", report.release_id));
    if report.uploaded_assets.is_empty() {
        config.println("No assets to upload");
    } else {
        config.success_println(&format!(
            "Uploaded {} asset(s)",
            report.uploaded_assets.len()
        ));
        for name in &report.uploaded_assets {
            config.indent(name);
        }
    }
    config.indent(&format!("Context: {}", store.path().display()));

    Ok(0)
}

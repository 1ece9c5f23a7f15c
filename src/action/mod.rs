//! Pipeline action boundary and the GitHub release action.
//!
//! The host runtime drives an [`Action`] through its lifecycle hooks:
//! `creates_restoration_point`, then `execute`, and later (only when a downstream
//! stage failed) `restore`. The context passed to `restore` may be a freshly
//! deserialized copy; actions must not rely on object identity between calls.

mod context;
mod release_action;

pub use context::{ReleaseContext, ReleasePhase};
pub use release_action::{ExecutionReport, ReleaseAction, RestoreOutcome};

use crate::error::Result;
use crate::options::ActionOption;
use async_trait::async_trait;

/// A pipeline step the host runtime can execute and compensate
#[async_trait]
pub trait Action: Send + Sync {
    /// Options the action consumes
    type Options: Send + Sync;
    /// Run-scoped context the action records into
    type Context: Send;
    /// What a successful `execute` reports
    type Report: Send;

    /// Stable identifier
    fn identifier(&self) -> &'static str;

    /// Display name
    fn name(&self) -> &'static str;

    /// One-line description
    fn description(&self) -> &'static str;

    /// Declared options
    fn options(&self) -> Vec<ActionOption>;

    /// Prepare whatever `restore` needs before `execute` runs
    fn creates_restoration_point(
        &self,
        options: &Self::Options,
        context: &mut Self::Context,
    ) -> Result<()>;

    /// Run the action
    async fn execute(
        &self,
        options: &Self::Options,
        context: &mut Self::Context,
    ) -> Result<Self::Report>;

    /// Undo what `execute` did
    async fn restore(
        &self,
        options: &Self::Options,
        context: &mut Self::Context,
    ) -> Result<RestoreOutcome>;

    /// Fresh context for a new run
    fn creates_context_from_options_map(&self, options: &Self::Options) -> Self::Context;
}

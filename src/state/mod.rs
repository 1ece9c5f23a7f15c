//! State management for release runs.
//!
//! Persists the execution context between the `release` and `rollback`
//! invocations of the host runtime.

mod manager;

pub use manager::{ContextStore, PersistedContext, STATE_FORMAT_VERSION, SaveStateResult};

/// Default state file name
pub const DEFAULT_STATE_FILE: &str = ".github_release_context.json";

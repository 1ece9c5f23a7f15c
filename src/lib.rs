//! # kodegen_release_action
//!
//! A GitHub release step for release pipelines.
//!
//! The action creates a release from templated options, uploads local files as
//! release assets concurrently, and records what it created in an execution
//! context. When a later pipeline stage fails, the host runtime calls `restore`
//! with that context and the release is deleted again.
//!
//! ## Features
//!
//! - **Compensating rollback**: a created release is removed by `restore`
//! - **Early asset checks**: missing asset files fail the run before any request
//! - **Concurrent uploads**: every asset is uploaded at once, errors aggregated
//! - **Templated metadata**: tag, target, name and notes are handlebars templates
//! - **Persistent context**: `release` and `rollback` can run in separate processes
//!
//! ## Usage
//!
//! ```bash
//! kodegen_release_action release --owner acme --repository app \
//!     --tag 'v{{version}}' --name 'Release {{version}}' --var version=1.0 \
//!     --asset dist/app.tar.gz
//! kodegen_release_action rollback --owner acme --repository app
//! kodegen_release_action options
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod action;
pub mod cli;
pub mod error;
pub mod github;
pub mod options;
pub mod state;
pub mod template;

// Re-export main types for public API
pub use action::{Action, ExecutionReport, ReleaseAction, ReleaseContext, ReleasePhase, RestoreOutcome};
pub use cli::Args;
pub use error::{CliError, ReleaseError, Result};
pub use options::{OptionsLoader, OptionsSharer, ReleaseOptions};
pub use state::{ContextStore, PersistedContext};
pub use template::{HandlebarsTemplateService, TextTemplateService};

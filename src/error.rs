//! Error types for GitHub release action operations.
//!
//! This module defines all error types with actionable error messages and recovery suggestions.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for release action operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all release action operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Declared assets that do not exist locally
    #[error("Asset error: {0}")]
    AssetResolution(#[from] AssetResolutionError),

    /// Failed create/delete/upload call against the GitHub API
    #[error("GitHub error: {0}")]
    Remote(#[from] RemoteOperationError),

    /// Execution context persistence errors
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Template rendering errors
    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Configuration errors, detected before any network call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// API or upload host is empty
    #[error("Must provide a valid host for '{key}'")]
    MissingHost {
        /// Host option key (`api-host` or `upload-host`)
        key: String,
    },

    /// Repository owner is empty
    #[error("Must provide an api repository owner")]
    MissingOwner,

    /// Repository name is empty
    #[error("Must provide an api repository name")]
    MissingRepository,

    /// A required option has no value
    #[error("Missing required option '{key}'")]
    MissingOption {
        /// Option key
        key: String,
    },

    /// An option value could not be used
    #[error("Invalid value for option '{key}': {reason}")]
    InvalidOption {
        /// Option key
        key: String,
        /// Reason for the error
        reason: String,
    },

    /// The options sharer was read before any options were stored
    #[error("There is no action option value map to share")]
    NoSharedOptions,
}

/// One or more declared asset paths do not exist
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("The following assets can not be located: \n\n{}", format_paths(.missing))]
pub struct AssetResolutionError {
    /// Every missing path, absolutized, in declaration order
    pub missing: Vec<PathBuf>,
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Failed remote call, either a non-success response or a transport failure.
///
/// The message is the serialized response body when one was received, otherwise
/// a message naming the request URL and the transport error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RemoteOperationError {
    /// URL of the failed request
    pub url: String,
    /// Display message
    pub message: String,
}

impl RemoteOperationError {
    /// Build from a received response body
    pub fn from_body(url: impl Into<String>, status: u16, body: &str) -> Self {
        let url = url.into();
        let message = match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| body.to_string()),
            Err(_) if !body.trim().is_empty() => body.trim().to_string(),
            Err(_) => format!("Error requesting {} HTTP status {}", url, status),
        };
        Self { url, message }
    }

    /// Build from a transport-level failure
    pub fn from_transport(url: impl Into<String>, error: impl std::fmt::Display) -> Self {
        let url = url.into();
        let message = format!("Error requesting {} {}", url, error);
        Self { url, message }
    }
}

/// Execution context persistence errors
#[derive(Error, Debug)]
pub enum StateError {
    /// State file corrupted
    #[error("State file corrupted: {reason}")]
    Corrupted {
        /// Reason for the error
        reason: String,
    },

    /// State file not found
    #[error("State file not found at {path}. No release to roll back.")]
    NotFound {
        /// Expected state file path
        path: PathBuf,
    },

    /// State version mismatch
    #[error("State file version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        /// Expected version
        expected: String,
        /// Found version
        found: String,
    },

    /// Failed to save state
    #[error("Failed to save state: {reason}")]
    SaveFailed {
        /// Reason for the error
        reason: String,
    },

    /// Failed to load state
    #[error("Failed to load state: {reason}")]
    LoadFailed {
        /// Reason for the error
        reason: String,
    },

    /// Context already used by a previous run
    #[error("Execution context already belongs to release {release_id:?} ({phase}); create a fresh context")]
    ContextReused {
        /// Release id carried by the context
        release_id: Option<u64>,
        /// Phase recorded in the context
        phase: String,
    },

    /// Persisted context was saved for another repository
    #[error("Saved context belongs to {found}, but the options target {expected}")]
    RepositoryMismatch {
        /// owner/repository from the options
        expected: String,
        /// owner/repository from the state file
        found: String,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Configuration(ConfigurationError::MissingOption { key })
                if key == "token" =>
            {
                vec![
                    "Pass --token or set GH_TOKEN or GITHUB_TOKEN".to_string(),
                    "Verify the token has the 'repo' scope".to_string(),
                ]
            }
            ReleaseError::Configuration(_) => vec![
                "Check the options with: kodegen_release_action options".to_string(),
                "Provide missing values on the command line or in the --config file".to_string(),
            ],
            ReleaseError::AssetResolution(_) => vec![
                "Build the assets before running the release step".to_string(),
                "Asset paths are resolved against the current working directory".to_string(),
            ],
            ReleaseError::Remote(_) => vec![
                "If the release was created, run: kodegen_release_action rollback".to_string(),
                "Verify the token can write releases for this repository".to_string(),
            ],
            ReleaseError::State(StateError::NotFound { .. }) => {
                vec!["Nothing was recorded, so there is nothing to roll back".to_string()]
            }
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Check if re-running the stage could succeed without changing inputs
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            ReleaseError::Configuration(_)
                | ReleaseError::AssetResolution(_)
                | ReleaseError::Template(_)
                | ReleaseError::State(StateError::ContextReused { .. })
                | ReleaseError::State(StateError::RepositoryMismatch { .. })
        )
    }
}

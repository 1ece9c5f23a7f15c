//! Execution context persistence.
//!
//! The context is written atomically (temp file + rename) after `execute`, so a
//! later process can load it and run the rollback.

use crate::action::ReleaseContext;
use crate::error::{Result, StateError};
use crate::options::ReleaseOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Current version of the state format
pub const STATE_FORMAT_VERSION: u32 = 1;

/// Context as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedContext {
    /// Version of the state format
    pub format_version: u32,
    /// Timestamp of the save
    pub saved_at: chrono::DateTime<chrono::Utc>,
    /// Repository owner the context belongs to
    pub owner: String,
    /// Repository name the context belongs to
    pub repository: String,
    /// The execution context
    pub context: ReleaseContext,
}

impl PersistedContext {
    /// Wrap `context` for the repository targeted by `options`
    pub fn new(options: &ReleaseOptions, context: ReleaseContext) -> Self {
        Self {
            format_version: STATE_FORMAT_VERSION,
            saved_at: chrono::Utc::now(),
            owner: options.owner.clone(),
            repository: options.repository.clone(),
            context,
        }
    }

    /// Validate state consistency
    pub fn validate(&self) -> Result<()> {
        if self.format_version != STATE_FORMAT_VERSION {
            return Err(StateError::VersionMismatch {
                expected: STATE_FORMAT_VERSION.to_string(),
                found: self.format_version.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Fail unless the context was saved for the repository in `options`
    pub fn ensure_repository(&self, options: &ReleaseOptions) -> Result<()> {
        if self.owner != options.owner || self.repository != options.repository {
            return Err(StateError::RepositoryMismatch {
                expected: options.slug(),
                found: format!("{}/{}", self.owner, self.repository),
            }
            .into());
        }
        Ok(())
    }
}

/// Result of state saving operation
#[derive(Debug)]
pub struct SaveStateResult {
    /// Size of saved state file in bytes
    pub file_size_bytes: u64,
    /// Duration of save operation
    pub save_duration: Duration,
}

/// Reads and writes the persisted context file
#[derive(Debug, Clone)]
pub struct ContextStore {
    state_file_path: PathBuf,
}

impl ContextStore {
    /// Create a store for the given state file
    pub fn new<P: AsRef<Path>>(state_file_path: P) -> Self {
        Self {
            state_file_path: state_file_path.as_ref().to_path_buf(),
        }
    }

    /// Path of the state file
    pub fn path(&self) -> &Path {
        &self.state_file_path
    }

    /// True when a state file exists
    pub fn exists(&self) -> bool {
        self.state_file_path.exists()
    }

    /// Save the context
    pub async fn save_state(&self, state: &PersistedContext) -> Result<SaveStateResult> {
        let start = Instant::now();

        let serialized =
            serde_json::to_string_pretty(state).map_err(|e| StateError::SaveFailed {
                reason: format!("Failed to serialize state: {}", e),
            })?;

        // Write to temporary file first (atomic operation)
        let temp_file_path = self.state_file_path.with_extension("tmp");
        tokio::fs::write(&temp_file_path, serialized.as_bytes())
            .await
            .map_err(|e| StateError::SaveFailed {
                reason: format!("Failed to write {}: {}", temp_file_path.display(), e),
            })?;

        tokio::fs::rename(&temp_file_path, &self.state_file_path)
            .await
            .map_err(|e| StateError::SaveFailed {
                reason: format!("Failed to rename temp file: {}", e),
            })?;

        let file_size_bytes = tokio::fs::metadata(&self.state_file_path)
            .await
            .map(|m| m.len())
            .unwrap_or(0);

        log::debug!(
            "Saved execution context to {} ({} bytes)",
            self.state_file_path.display(),
            file_size_bytes
        );

        Ok(SaveStateResult {
            file_size_bytes,
            save_duration: start.elapsed(),
        })
    }

    /// Load the context
    pub async fn load_state(&self) -> Result<PersistedContext> {
        if !self.exists() {
            return Err(StateError::NotFound {
                path: self.state_file_path.clone(),
            }
            .into());
        }

        let content = tokio::fs::read_to_string(&self.state_file_path)
            .await
            .map_err(|e| StateError::LoadFailed {
                reason: format!("Failed to read {}: {}", self.state_file_path.display(), e),
            })?;

        let state: PersistedContext =
            serde_json::from_str(&content).map_err(|e| StateError::Corrupted {
                reason: e.to_string(),
            })?;

        state.validate()?;
        Ok(state)
    }

    /// Remove the state file (missing file is not an error)
    pub async fn cleanup_state(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.state_file_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ReleasePhase;
    use crate::error::ReleaseError;

    fn options() -> ReleaseOptions {
        ReleaseOptions {
            owner: "acme".to_string(),
            repository: "app".to_string(),
            ..ReleaseOptions::default()
        }
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = ContextStore::new(dir.path().join("ctx.json"));
        let context = ReleaseContext {
            release_id: Some(42),
            release_upload_url: Some("https://uploads/42".to_string()),
            assets_uploaded: true,
            phase: ReleasePhase::Created,
        };

        let saved = PersistedContext::new(&options(), context.clone());
        let result = store.save_state(&saved).await.unwrap();
        assert!(result.file_size_bytes > 0);
        assert!(!dir.path().join("ctx.tmp").exists());

        let loaded = store.load_state().await.unwrap();
        assert_eq!(loaded.context, context);
        loaded.ensure_repository(&options()).unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = ContextStore::new(dir.path().join("none.json"));
        assert!(matches!(
            store.load_state().await,
            Err(ReleaseError::State(StateError::NotFound { .. }))
        ));
        store.cleanup_state().await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupted_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ctx.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            ContextStore::new(&path).load_state().await,
            Err(ReleaseError::State(StateError::Corrupted { .. }))
        ));
    }

    #[tokio::test]
    async fn test_version_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let store = ContextStore::new(dir.path().join("ctx.json"));
        let mut saved = PersistedContext::new(&options(), ReleaseContext::new());
        saved.format_version = 99;
        store.save_state(&saved).await.unwrap();
        assert!(matches!(
            store.load_state().await,
            Err(ReleaseError::State(StateError::VersionMismatch { .. }))
        ));
    }

    #[test]
    fn test_other_repository_is_rejected() {
        let saved = PersistedContext::new(&options(), ReleaseContext::new());
        let other = ReleaseOptions {
            repository: "other".to_string(),
            ..options()
        };
        assert!(matches!(
            saved.ensure_repository(&other),
            Err(ReleaseError::State(StateError::RepositoryMismatch { .. }))
        ));
    }
}

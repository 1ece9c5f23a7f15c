//! Execution context of one release run.

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a release run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReleasePhase {
    /// Nothing created yet
    #[default]
    Idle,
    /// Remote release exists; assets not (fully) attached
    Created,
    /// Release created and every asset uploaded
    Completed,
    /// Release removed by the compensating operation
    RolledBack,
}

impl std::fmt::Display for ReleasePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReleasePhase::Idle => write!(f, "Idle"),
            ReleasePhase::Created => write!(f, "Created"),
            ReleasePhase::Completed => write!(f, "Completed"),
            ReleasePhase::RolledBack => write!(f, "Rolled Back"),
        }
    }
}

/// Run-scoped record of what the release action produced.
///
/// Written only by the action; the host runtime keeps it (in memory or on disk)
/// and hands it back for the rollback call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseContext {
    /// Release ID; set once creation succeeds
    #[serde(default)]
    pub release_id: Option<u64>,
    /// Upload URL template returned at creation
    #[serde(default)]
    pub release_upload_url: Option<String>,
    /// At least one asset upload was attempted
    #[serde(default)]
    pub assets_uploaded: bool,
    /// Current lifecycle phase
    #[serde(default)]
    pub phase: ReleasePhase,
}

impl ReleaseContext {
    /// Fresh, empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// True when a rollback has something to remove
    pub fn needs_rollback(&self) -> bool {
        self.release_id.is_some() && self.phase != ReleasePhase::RolledBack
    }

    /// True when the context was never used by a run
    pub fn is_fresh(&self) -> bool {
        self.release_id.is_none() && self.phase == ReleasePhase::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_context() {
        let ctx = ReleaseContext::new();
        assert!(ctx.is_fresh());
        assert!(!ctx.needs_rollback());
        assert_eq!(ctx.phase, ReleasePhase::Idle);
    }

    #[test]
    fn test_deserializes_partial_record() {
        let ctx: ReleaseContext = serde_json::from_str(r#"{"release_id": 42}"#).unwrap();
        assert_eq!(ctx.release_id, Some(42));
        assert!(ctx.needs_rollback());
        assert!(!ctx.assets_uploaded);
    }

    #[test]
    fn test_rolled_back_context_needs_nothing() {
        let ctx = ReleaseContext {
            release_id: Some(42),
            phase: ReleasePhase::RolledBack,
            ..ReleaseContext::default()
        };
        assert!(!ctx.needs_rollback());
        assert!(!ctx.is_fresh());
    }
}

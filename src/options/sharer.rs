//! Shares the options of the current invocation between collaborators.

use super::ReleaseOptions;
use crate::error::ConfigurationError;
use std::sync::{Arc, PoisonError, RwLock};

/// Holds the latest stored options; readers always see the current value.
#[derive(Debug, Default)]
pub struct OptionsSharer {
    current: RwLock<Option<Arc<ReleaseOptions>>>,
}

impl OptionsSharer {
    /// Create an empty sharer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sharer already holding `options`
    pub fn with_options(options: ReleaseOptions) -> Self {
        let sharer = Self::new();
        sharer.store(options);
        sharer
    }

    /// Store the options to provide them when requested
    pub fn store(&self, options: ReleaseOptions) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Arc::new(options));
    }

    /// Stored options
    pub fn options(&self) -> Result<Arc<ReleaseOptions>, ConfigurationError> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(ConfigurationError::NoSharedOptions)
    }
}

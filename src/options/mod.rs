//! Action options: the resolved configuration of one invocation.
//!
//! `ReleaseOptions` is produced once per run (see [`loader`]) and read by every
//! other component, either directly or through the [`OptionsSharer`].

pub mod loader;
pub mod schema;
mod sharer;

pub use loader::{OptionOverrides, OptionsLoader};
pub use schema::{ActionOption, ActionOptionType};
pub use sharer::OptionsSharer;

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default GitHub API host
pub const DEFAULT_API_HOST: &str = "api.github.com";

/// Default GitHub uploads host
pub const DEFAULT_UPLOAD_HOST: &str = "uploads.github.com";

/// Option values for a GitHub release run
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReleaseOptions {
    /// GitHub token used as bearer credential
    #[serde(default)]
    pub token: SecretToken,
    /// API host
    #[serde(default = "default_api_host", alias = "host")]
    pub api_host: String,
    /// Uploads host
    #[serde(default = "default_upload_host")]
    pub upload_host: String,
    /// `https` when true, `http` otherwise
    #[serde(default = "default_secure")]
    pub secure: bool,
    /// Repository owner
    #[serde(default)]
    pub owner: String,
    /// Repository name
    #[serde(default)]
    pub repository: String,
    /// Release tag (templated)
    #[serde(default)]
    pub tag: Option<String>,
    /// Commit or branch the tag is cut from (templated)
    #[serde(default)]
    pub target: Option<String>,
    /// Release title (templated)
    #[serde(default)]
    pub name: Option<String>,
    /// Release notes (templated)
    #[serde(default)]
    pub description: Option<String>,
    /// Create the release as a draft
    #[serde(default)]
    pub draft: bool,
    /// Mark the release as a pre-release
    #[serde(default)]
    pub pre: bool,
    /// Local files to attach
    #[serde(default)]
    pub asset: AssetPaths,
}

fn default_api_host() -> String {
    DEFAULT_API_HOST.to_string()
}

fn default_upload_host() -> String {
    DEFAULT_UPLOAD_HOST.to_string()
}

fn default_secure() -> bool {
    true
}

impl Default for ReleaseOptions {
    fn default() -> Self {
        Self {
            token: SecretToken::default(),
            api_host: default_api_host(),
            upload_host: default_upload_host(),
            secure: default_secure(),
            owner: String::new(),
            repository: String::new(),
            tag: None,
            target: None,
            name: None,
            description: None,
            draft: false,
            pre: false,
            asset: AssetPaths::default(),
        }
    }
}

impl fmt::Debug for ReleaseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReleaseOptions")
            .field("token", &self.token)
            .field("api_host", &self.api_host)
            .field("upload_host", &self.upload_host)
            .field("secure", &self.secure)
            .field("owner", &self.owner)
            .field("repository", &self.repository)
            .field("tag", &self.tag)
            .field("target", &self.target)
            .field("name", &self.name)
            .field("description", &self.description)
            .field("draft", &self.draft)
            .field("pre", &self.pre)
            .field("asset", &self.asset)
            .finish()
    }
}

impl ReleaseOptions {
    /// Check required options in declaration order.
    ///
    /// Returns the first missing option so error messages are deterministic.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.token.is_empty() {
            return Err(missing("token"));
        }
        if self.api_host.trim().is_empty() {
            return Err(missing("api-host"));
        }
        if self.upload_host.trim().is_empty() {
            return Err(missing("upload-host"));
        }
        if self.owner.trim().is_empty() {
            return Err(missing("owner"));
        }
        if self.repository.trim().is_empty() {
            return Err(missing("repository"));
        }
        if self.name.as_deref().is_none_or(|n| n.trim().is_empty()) {
            return Err(missing("name"));
        }
        Ok(())
    }

    /// `owner/repository` slug
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repository)
    }
}

fn missing(key: &str) -> ConfigurationError {
    ConfigurationError::MissingOption {
        key: key.to_string(),
    }
}

/// Token wrapper that never prints its value
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretToken(String);

impl SecretToken {
    /// Wrap a token value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Raw token, only for building the Authorization header
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// True when no token was provided
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "SecretToken(<empty>)")
        } else {
            write!(f, "SecretToken(***)")
        }
    }
}

/// Asset paths as declared: a single path or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssetPaths {
    /// One path
    One(String),
    /// Any number of paths
    Many(Vec<String>),
}

impl Default for AssetPaths {
    fn default() -> Self {
        AssetPaths::Many(Vec::new())
    }
}

impl AssetPaths {
    /// Declared paths in order
    pub fn as_slice(&self) -> &[String] {
        match self {
            AssetPaths::One(path) => std::slice::from_ref(path),
            AssetPaths::Many(paths) => paths,
        }
    }

    /// True when no path is declared
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl From<Vec<String>> for AssetPaths {
    fn from(paths: Vec<String>) -> Self {
        AssetPaths::Many(paths)
    }
}

impl From<&str> for AssetPaths {
    fn from(path: &str) -> Self {
        AssetPaths::One(path.to_string())
    }
}

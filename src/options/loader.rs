//! Option loading: config file, then command-line overrides, then environment token.

use super::{AssetPaths, ReleaseOptions, SecretToken};
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Environment variables consulted for the token, in order
pub const TOKEN_ENV_VARS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];

/// Values given on the command line; `None` keeps the file/default value
#[derive(Debug, Clone, Default)]
pub struct OptionOverrides {
    /// GitHub token
    pub token: Option<String>,
    /// API host
    pub api_host: Option<String>,
    /// Uploads host
    pub upload_host: Option<String>,
    /// Secure transport
    pub secure: Option<bool>,
    /// Repository owner
    pub owner: Option<String>,
    /// Repository name
    pub repository: Option<String>,
    /// Release tag
    pub tag: Option<String>,
    /// Tag target
    pub target: Option<String>,
    /// Release name
    pub name: Option<String>,
    /// Release description
    pub description: Option<String>,
    /// Draft flag (only ever switches it on)
    pub draft: bool,
    /// Pre-release flag (only ever switches it on)
    pub pre: bool,
    /// Assets; replaces the file list when non-empty
    pub asset: Vec<String>,
}

/// Builds the options of one invocation
#[derive(Debug, Clone, Default)]
pub struct OptionsLoader {
    config_file: Option<PathBuf>,
    overrides: OptionOverrides,
}

impl OptionsLoader {
    /// Create a loader without config file or overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Read base values from a TOML file
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Apply command-line values on top of the file
    pub fn with_overrides(mut self, overrides: OptionOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Load using the process environment for the token fallback
    pub fn load(&self) -> Result<ReleaseOptions> {
        self.load_with_env(|key| std::env::var(key).ok())
    }

    /// Load using `env` for the token fallback
    pub fn load_with_env<F>(&self, env: F) -> Result<ReleaseOptions>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = match &self.config_file {
            Some(path) => {
                log::debug!("Reading options from {}", path.display());
                let content = std::fs::read_to_string(path)?;
                toml::from_str::<ReleaseOptions>(&content)?
            }
            None => ReleaseOptions::default(),
        };

        self.apply_overrides(&mut options);

        if options.token.is_empty()
            && let Some(token) = TOKEN_ENV_VARS
                .into_iter()
                .filter_map(&env)
                .find(|value| !value.trim().is_empty())
        {
            options.token = SecretToken::new(token);
        }

        Ok(options)
    }

    fn apply_overrides(&self, options: &mut ReleaseOptions) {
        let o = &self.overrides;

        if let Some(token) = &o.token {
            options.token = SecretToken::new(token.clone());
        }
        replace(&mut options.api_host, &o.api_host);
        replace(&mut options.upload_host, &o.upload_host);
        if let Some(secure) = o.secure {
            options.secure = secure;
        }
        replace(&mut options.owner, &o.owner);
        replace(&mut options.repository, &o.repository);
        replace_opt(&mut options.tag, &o.tag);
        replace_opt(&mut options.target, &o.target);
        replace_opt(&mut options.name, &o.name);
        replace_opt(&mut options.description, &o.description);
        options.draft |= o.draft;
        options.pre |= o.pre;
        if !o.asset.is_empty() {
            options.asset = AssetPaths::Many(o.asset.clone());
        }
    }
}

fn replace(field: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        *field = value.clone();
    }
}

fn replace_opt(field: &mut Option<String>, value: &Option<String>) {
    if value.is_some() {
        *field = value.clone();
    }
}

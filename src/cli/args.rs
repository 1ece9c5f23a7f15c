//! Command line argument parsing and validation.

use crate::options::OptionOverrides;
use crate::state::{ContextStore, DEFAULT_STATE_FILE};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// GitHub release pipeline action
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_release_action",
    version,
    about = "Create a GitHub release, attach assets, and roll it back on demand",
    long_about = "Create a GitHub release, upload local files as release assets, and
delete the release again when a later pipeline stage fails.

Usage:
  kodegen_release_action release --owner acme --repository app --tag v1.0 --name v1.0 --asset dist/app.bin
  kodegen_release_action rollback --owner acme --repository app
  kodegen_release_action --config release.toml release"
)]
pub struct Args {
    /// TOML file with option values (keys as listed by the `options` command)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// File that keeps the execution context between `release` and `rollback`
    #[arg(long, global = true, value_name = "FILE")]
    pub state_file: Option<PathBuf>,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Lifecycle commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the release and upload its assets
    Release(OptionArgs),
    /// Delete the release recorded by the last `release` run
    Rollback(OptionArgs),
    /// Print the declared options of the action
    Options,
}

impl Command {
    /// Subcommand name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Command::Release(_) => "release",
            Command::Rollback(_) => "rollback",
            Command::Options => "options",
        }
    }
}

/// Option values given on the command line
#[derive(clap::Args, Debug, Clone, Default)]
pub struct OptionArgs {
    /// GitHub token (falls back to GH_TOKEN, then GITHUB_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// GitHub API host
    #[arg(long, alias = "host")]
    pub api_host: Option<String>,

    /// GitHub uploads host
    #[arg(long)]
    pub upload_host: Option<String>,

    /// Use https (true) or http (false)
    #[arg(long, value_name = "BOOL")]
    pub secure: Option<bool>,

    /// Repository owner
    #[arg(long)]
    pub owner: Option<String>,

    /// Repository name
    #[arg(long)]
    pub repository: Option<String>,

    /// Release tag (templated)
    #[arg(long)]
    pub tag: Option<String>,

    /// Commit or branch the tag is created from (templated)
    #[arg(long)]
    pub target: Option<String>,

    /// Release name (templated)
    #[arg(long)]
    pub name: Option<String>,

    /// Release notes (templated)
    #[arg(long)]
    pub description: Option<String>,

    /// Create a draft release
    #[arg(long)]
    pub draft: bool,

    /// Mark the release as a pre-release
    #[arg(long)]
    pub pre: bool,

    /// File to attach; repeat for several assets
    #[arg(long = "asset", value_name = "PATH")]
    pub assets: Vec<String>,

    /// Template variable available as {{KEY}}; repeatable
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub vars: Vec<(String, String)>,
}

impl OptionArgs {
    /// Overrides to apply on top of the config file
    pub fn overrides(&self) -> OptionOverrides {
        OptionOverrides {
            token: self.token.clone(),
            api_host: self.api_host.clone(),
            upload_host: self.upload_host.clone(),
            secure: self.secure,
            owner: self.owner.clone(),
            repository: self.repository.clone(),
            tag: self.tag.clone(),
            target: self.target.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            draft: self.draft,
            pre: self.pre,
            asset: self.assets.clone(),
        }
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if let Some(config) = &self.config
            && !config.is_file()
        {
            return Err(format!("Config file not found: {}", config.display()));
        }
        if let Some(state_file) = &self.state_file
            && state_file.is_dir()
        {
            return Err(format!(
                "State file path is a directory: {}",
                state_file.display()
            ));
        }
        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    output: super::OutputManager,
    /// Config file, if any
    pub config_file: Option<PathBuf>,
    /// Execution context file
    pub state_file_path: PathBuf,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.quiet),
            config_file: args.config.clone(),
            state_file_path: args
                .state_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE)),
        }
    }
}

impl RuntimeConfig {
    /// Store for the execution context file
    pub fn context_store(&self) -> ContextStore {
        ContextStore::new(&self.state_file_path)
    }

    /// Print message
    pub fn println(&self, message: &str) {
        self.output.println(message);
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }

    /// Print warning message
    pub fn warning_println(&self, message: &str) {
        self.output.warn(message);
    }

    /// Print success message
    pub fn success_println(&self, message: &str) {
        self.output.success(message);
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        self.output.indent(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_release_arguments() {
        let args = Args::try_parse_from([
            "kodegen_release_action",
            "release",
            "--owner",
            "acme",
            "--repository",
            "app",
            "--host",
            "ghe.example.com",
            "--secure",
            "false",
            "--asset",
            "a.bin",
            "--asset",
            "b.bin",
            "--var",
            "version=1.0",
            "--pre",
        ])
        .unwrap();

        let Command::Release(opts) = &args.command else {
            panic!("expected release command");
        };
        let overrides = opts.overrides();
        assert_eq!(overrides.owner.as_deref(), Some("acme"));
        assert_eq!(overrides.api_host.as_deref(), Some("ghe.example.com"));
        assert_eq!(overrides.secure, Some(false));
        assert_eq!(overrides.asset, ["a.bin", "b.bin"]);
        assert!(overrides.pre);
        assert!(!overrides.draft);
        assert_eq!(opts.vars, [("version".to_string(), "1.0".to_string())]);
    }

    #[test]
    fn test_global_state_file_after_subcommand() {
        let args = Args::try_parse_from([
            "kodegen_release_action",
            "rollback",
            "--state-file",
            "/tmp/ctx.json",
        ])
        .unwrap();
        let config = RuntimeConfig::from(&args);
        assert_eq!(config.state_file_path, PathBuf::from("/tmp/ctx.json"));
    }

    #[test]
    fn test_default_state_file() {
        let args = Args::try_parse_from(["kodegen_release_action", "options"]).unwrap();
        let config = RuntimeConfig::from(&args);
        assert_eq!(config.state_file_path, PathBuf::from(DEFAULT_STATE_FILE));
    }

    #[test]
    fn test_rejects_malformed_var() {
        let result = Args::try_parse_from(["kodegen_release_action", "release", "--var", "novalue"]);
        assert!(result.is_err());
    }
}

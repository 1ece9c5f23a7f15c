//! Shared setup for the lifecycle commands.

use crate::action::ReleaseAction;
use crate::cli::{OptionArgs, RuntimeConfig};
use crate::error::Result;
use crate::options::{OptionsLoader, ReleaseOptions};
use crate::template::HandlebarsTemplateService;
use std::sync::Arc;

/// Merge the config file, command line and token environment into options
pub(super) fn load_options(opts: &OptionArgs, config: &RuntimeConfig) -> Result<ReleaseOptions> {
    let mut loader = OptionsLoader::new().with_overrides(opts.overrides());
    if let Some(config_file) = &config.config_file {
        loader = loader.with_config_file(config_file);
    }
    loader.load()
}

/// Action wired to GitHub, with `--var` values available to templates
pub(super) fn github_action(opts: &OptionArgs) -> Result<ReleaseAction> {
    let templates = opts
        .vars
        .iter()
        .fold(HandlebarsTemplateService::new(), |service, (key, value)| {
            service.with_variable(key, value)
        });
    ReleaseAction::github(Arc::new(templates))
}

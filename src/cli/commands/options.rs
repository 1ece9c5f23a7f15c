//! Options command: describe the action and its declared options.

use crate::action::{Action, ReleaseAction};
use crate::cli::RuntimeConfig;
use crate::error::Result;
use crate::options::ActionOption;
use crate::template::HandlebarsTemplateService;
use std::sync::Arc;

/// Execute options command
pub(super) fn execute_options(config: &RuntimeConfig) -> Result<i32> {
    let action = ReleaseAction::github(Arc::new(HandlebarsTemplateService::new()))?;

    config.println(&format!("{} ({})", action.name(), action.identifier()));
    config.println(action.description());
    config.println("");

    for option in action.options() {
        config.println(&describe(&option));
        config.indent(option.description);
    }

    Ok(0)
}

fn describe(option: &ActionOption) -> String {
    let mut line = format!("{} <{}>", option.key, option.option_type);

    let mut flags = Vec::new();
    if option.is_required {
        flags.push("required".to_string());
    }
    if option.is_secure {
        flags.push("secure".to_string());
    }
    if option.is_templated {
        flags.push("templated".to_string());
    }
    if !option.aliases.is_empty() {
        flags.push(format!("alias: {}", option.aliases.join(", ")));
    }
    if let Some(default) = &option.default_value {
        flags.push(format!("default: {}", default));
    }

    if !flags.is_empty() {
        line.push_str(&format!(" [{}]", flags.join("; ")));
    }
    line
}

//! Declared option schema exposed to the host runtime.

use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;

/// Kind of value an option accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionOptionType {
    /// Free text
    Text,
    /// `true` / `false`
    Boolean,
    /// One value or a list of values
    List,
}

impl fmt::Display for ActionOptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionOptionType::Text => write!(f, "text"),
            ActionOptionType::Boolean => write!(f, "boolean"),
            ActionOptionType::List => write!(f, "list"),
        }
    }
}

/// One declared option
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionOption {
    /// Option key
    pub key: &'static str,
    /// Alternative keys accepted for the same option
    pub aliases: &'static [&'static str],
    /// Human readable description
    pub description: &'static str,
    /// Value kind
    pub option_type: ActionOptionType,
    /// Must be provided (after defaults are applied)
    pub is_required: bool,
    /// Value is a secret and must not be printed
    pub is_secure: bool,
    /// Value is rendered through the template service before use
    pub is_templated: bool,
    /// Default value, if any
    pub default_value: Option<Value>,
}

impl ActionOption {
    fn text(key: &'static str, description: &'static str) -> Self {
        Self {
            key,
            aliases: &[],
            description,
            option_type: ActionOptionType::Text,
            is_required: false,
            is_secure: false,
            is_templated: false,
            default_value: None,
        }
    }

    fn boolean(key: &'static str, description: &'static str, default: bool) -> Self {
        Self {
            option_type: ActionOptionType::Boolean,
            default_value: Some(json!(default)),
            ..Self::text(key, description)
        }
    }

    fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    fn templated(mut self) -> Self {
        self.is_templated = true;
        self
    }
}

/// Options declared by the GitHub release action, in declaration order
pub fn release_options() -> Vec<ActionOption> {
    vec![
        ActionOption {
            is_secure: true,
            ..ActionOption::text(
                "token",
                "Represents the GitHub token used to communicate with the API.",
            )
            .required()
        },
        ActionOption {
            aliases: &["host"],
            default_value: Some(json!(super::DEFAULT_API_HOST)),
            ..ActionOption::text("api-host", "Represents the GitHub API host to communicate with.")
                .required()
        },
        ActionOption {
            default_value: Some(json!(super::DEFAULT_UPLOAD_HOST)),
            ..ActionOption::text(
                "upload-host",
                "Represents the GitHub host that receives release asset uploads.",
            )
            .required()
        },
        ActionOption::boolean(
            "secure",
            "Represents a boolean value specifying if the communication with the hosts must be secure.",
            true,
        )
        .required(),
        ActionOption::text("owner", "Represents the owner name of the repository.").required(),
        ActionOption::text("repository", "Represents the repository that will be released.")
            .required(),
        ActionOption::text("tag", "Represents the tag where the release will be based on.")
            .templated(),
        ActionOption::text(
            "target",
            "Represents the target the tag will be based on; must not be provided if the tag already exists.",
        )
        .templated(),
        ActionOption::text("name", "Represents the release name.")
            .required()
            .templated(),
        ActionOption::text("description", "Represents the release description.").templated(),
        ActionOption::boolean(
            "draft",
            "Represents a boolean value specifying if the release is a draft.",
            false,
        ),
        ActionOption::boolean(
            "pre",
            "Represents a boolean value specifying if the release is a pre-release.",
            false,
        ),
        ActionOption {
            option_type: ActionOptionType::List,
            ..ActionOption::text(
                "asset",
                "Represents a list of paths to the assets that will be uploaded.",
            )
        },
    ]
}

//! Text templating for templated options (tag, target, name, description).
//!
//! Templates use handlebars syntax. Process environment variables are available
//! under `env` (`{{env.GITHUB_SHA}}`) and user variables at the top level
//! (`{{version}}`).

use crate::error::Result;
use handlebars::Handlebars;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Interpolates templated option values
pub trait TextTemplateService: Send + Sync {
    /// Render `template` into its final text
    fn parse(&self, template: &str) -> Result<String>;
}

/// Handlebars-backed template service
#[derive(Debug)]
pub struct HandlebarsTemplateService {
    registry: Handlebars<'static>,
    context: Value,
}

impl HandlebarsTemplateService {
    /// Create a service with the process environment as `env`
    pub fn new() -> Self {
        Self::with_environment(std::env::vars())
    }

    /// Create a service with the given environment as `env`
    pub fn with_environment<I>(environment: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env: BTreeMap<String, String> = environment.into_iter().collect();
        let mut context = Map::new();
        context.insert(
            "env".to_string(),
            Value::Object(env.into_iter().map(|(k, v)| (k, Value::String(v))).collect()),
        );

        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);

        Self {
            registry,
            context: Value::Object(context),
        }
    }

    /// Add a top-level template variable
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Value::Object(map) = &mut self.context {
            map.insert(key.into(), Value::String(value.into()));
        }
        self
    }
}

impl Default for HandlebarsTemplateService {
    fn default() -> Self {
        Self::new()
    }
}

impl TextTemplateService for HandlebarsTemplateService {
    fn parse(&self, template: &str) -> Result<String> {
        Ok(self.registry.render_template(template, &self.context)?)
    }
}

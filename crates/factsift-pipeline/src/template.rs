//! Query templates with a single `{entity}` placeholder.

use std::fmt;
use std::str::FromStr;

use factsift_core::{Error, Result};
use serde::Serialize;

pub const ENTITY_PLACEHOLDER: &str = "{entity}";
pub const DEFAULT_TEMPLATE: &str = "Find the contact details of {entity}";

/// A validated query template. Always contains the placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryTemplate(String);

impl QueryTemplate {
    /// Validate a template string.
    pub fn parse(template: &str) -> Result<Self> {
        if !template.contains(ENTITY_PLACEHOLDER) {
            return Err(Error::InvalidTemplate(format!(
                "template must include '{}' as a placeholder: \"{}\"",
                ENTITY_PLACEHOLDER, template
            )));
        }
        Ok(Self(template.to_string()))
    }

    /// Concrete query for one entity. Every placeholder is substituted.
    pub fn render(&self, entity: &str) -> String {
        self.0.replace(ENTITY_PLACEHOLDER, entity)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for QueryTemplate {
    fn default() -> Self {
        Self(DEFAULT_TEMPLATE.to_string())
    }
}

impl FromStr for QueryTemplate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for QueryTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

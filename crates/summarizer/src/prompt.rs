//! Prompt template handling.
//!
//! A template is a plain string with a single `{table_data}` placeholder;
//! rendering substitutes the serialized table text into it.

use crate::error::{Result, SummaryError};
use std::path::Path;

/// The substitution placeholder every template must contain.
pub const PLACEHOLDER: &str = "{table_data}";

/// Template shipped with the crate, tuned for financial forecast tables.
const DEFAULT_TEMPLATE: &str = "\
You are reviewing a table extracted from a financial forecast presentation.
Summarize the key figures, trends, and risk indicators in 2-4 sentences of
plain language an analyst can skim. Do not restate every row.

Table:
{table_data}
";

/// A validated prompt template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Build a template from a string, checking the placeholder is present.
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains(PLACEHOLDER) {
            return Err(SummaryError::MissingPlaceholder);
        }
        Ok(Self { template })
    }

    /// Load a template from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let template = std::fs::read_to_string(path).map_err(|e| SummaryError::TemplateRead {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::new(template)
    }

    /// Substitute the table text into the template.
    pub fn render(&self, table_text: &str) -> String {
        self.template.replace(PLACEHOLDER, table_text)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        // The built-in template carries the placeholder.
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

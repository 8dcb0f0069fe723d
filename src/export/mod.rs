//! Result rendering for display.

pub mod json;
pub mod text;

pub use json::JsonRenderer;
pub use text::TextRenderer;

use crate::query::QueryResult;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Output format for query results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    /// Render a result in this format.
    pub fn render(&self, result: &QueryResult) -> serde_json::Result<String> {
        match self {
            Self::Table => Ok(TextRenderer::render(result)),
            Self::Json => JsonRenderer::render(result).map(|mut s| {
                s.push('\n');
                s
            }),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{}' (expected table or json)", other)),
        }
    }
}

use rag_base::SearchOptions;
use serde::Deserialize;

use crate::error_handler::{AppError, AppResult};

/// Largest `matchCount` a client may ask for.
pub const MAX_MATCH_COUNT: u32 = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchFormat {
    /// Raw hits.
    #[default]
    Results,
    /// Hits joined into one prompt-ready string.
    Context,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    pub match_threshold: Option<f64>,
    pub match_count: Option<u32>,
    pub filter_module: Option<String>,
    #[serde(default)]
    pub format: SearchFormat,
}

impl SearchRequest {
    /// Range-checks the optional knobs. Query length is checked by retrieval.
    pub fn options(&self) -> AppResult<SearchOptions> {
        if let Some(t) = self.match_threshold {
            if !(0.0..=1.0).contains(&t) {
                return Err(AppError::invalid_field(
                    "matchThreshold",
                    "matchThreshold must be between 0 and 1",
                ));
            }
        }
        if let Some(c) = self.match_count {
            if !(1..=MAX_MATCH_COUNT).contains(&c) {
                return Err(AppError::invalid_field(
                    "matchCount",
                    format!("matchCount must be between 1 and {MAX_MATCH_COUNT}"),
                ));
            }
        }
        Ok(SearchOptions {
            match_threshold: self.match_threshold,
            match_count: self.match_count,
            filter_module: self
                .filter_module
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string),
        })
    }
}

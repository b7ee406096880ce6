//! Caller-facing search options and the fully-resolved request sent to the store.

use serde::{Deserialize, Serialize};

/// Similarity floor applied when the caller does not set one.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.7;
/// Number of chunks requested when the caller does not set one.
pub const DEFAULT_MATCH_COUNT: u32 = 5;
/// Shortest accepted query, counted in characters after trimming.
pub const MIN_QUERY_CHARS: usize = 3;

/// Optional knobs for [`crate::search_documents`]; absent fields take defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    pub match_threshold: Option<f64>,
    pub match_count: Option<u32>,
    /// Restrict hits to one course module (`metadata.module`).
    pub filter_module: Option<String>,
}

/// What the vector store actually receives.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRequest {
    pub query: String,
    pub match_threshold: f64,
    pub match_count: u32,
    pub filter_module: Option<String>,
}

impl SearchOptions {
    /// Fills in defaults for every absent field.
    pub fn resolve(self, query: impl Into<String>) -> MatchRequest {
        MatchRequest {
            query: query.into(),
            match_threshold: self.match_threshold.unwrap_or(DEFAULT_MATCH_THRESHOLD),
            match_count: self.match_count.unwrap_or(DEFAULT_MATCH_COUNT),
            filter_module: self.filter_module,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_options_take_defaults() {
        let req = SearchOptions::default().resolve("odds");
        assert_eq!(req.match_threshold, 0.7);
        assert_eq!(req.match_count, 5);
        assert_eq!(req.filter_module, None);
    }

    #[test]
    fn explicit_options_win() {
        let req = SearchOptions {
            match_threshold: Some(0.5),
            match_count: Some(12),
            filter_module: Some("house-edge".into()),
        }
        .resolve("odds");
        assert_eq!(req.match_threshold, 0.5);
        assert_eq!(req.match_count, 12);
        assert_eq!(req.filter_module.as_deref(), Some("house-edge"));
    }
}

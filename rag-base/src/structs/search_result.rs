use serde::{Deserialize, Serialize};

/// One row returned by the similarity-search RPC.
///
/// Rows arrive ranked by the database (similarity, descending). `similarity`
/// and `metadata` are passed through to callers untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub id: Option<serde_json::Value>,

    /// Text chunk used for prompt context.
    pub content: String,

    #[serde(default)]
    pub similarity: Option<f64>,

    /// Opaque per-document metadata (module, lesson, source, ...).
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl SearchHit {
    /// A hit carrying only text, as used by prompt assembly and tests.
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            id: None,
            content: content.into(),
            similarity: None,
            metadata: serde_json::Value::Null,
        }
    }
}

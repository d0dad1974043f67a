//! Interchange types for the query surface

use serde::{Deserialize, Serialize};

use crate::query::ast::QuerySpec;
use crate::query::iter::DocId;

fn default_size() -> usize {
    10
}

/// Search request
///
/// `from` and `to` bound the shard range as inclusive `YYYY-MM-DD`
/// days. `size` caps how many hits are returned; matches beyond it are
/// still counted in the response total, and a size of zero makes the
/// request count-only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: QuerySpec,
    #[serde(default = "default_size")]
    pub size: usize,
    pub from: String,
    pub to: String,
}

/// One matching document with the root iterator's score
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub id: DocId,
    pub score: f32,
}

/// Search response with timing information
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub total: u64,
    pub hits: Vec<Hit>,
    pub took_us: u64,
}

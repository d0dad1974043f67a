pub mod config;
pub mod error;
pub mod index;
pub mod models;
pub mod query;

pub use config::IndexConfig;
pub use error::{MurexError, Result};
pub use index::shard::Shard;
pub use index::EventIndex;
pub use models::{Hit, SearchRequest, SearchResponse};
pub use query::ast::{QueryKind, QuerySpec};
pub use query::iter::{DocId, DocIter, NO_MORE, NOT_READY};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

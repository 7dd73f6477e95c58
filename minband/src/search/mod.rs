//! Incremental search: find documents of a corpus similar to a query.

mod config;
mod search_index;
mod shared;

pub use self::config::SearchConfig;
pub use self::search_index::SearchIndex;
pub use self::shared::SharedSearchIndex;

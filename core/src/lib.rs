pub mod builder;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod index;
pub mod merge;
pub mod persist;
pub mod query;
pub mod tokenizer;
pub mod worker;

pub use error::{EngineError, Result};
pub use index::{DocId, IndexHandle, IndexMeta, Posting, SearchIndex, TermId};

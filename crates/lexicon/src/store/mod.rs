//! store module
//!
//! Document store client for words: the `WordStore` interface and its tantivy implementation.

pub mod schema_builder;
pub mod tantivy_store;
pub mod word_store;

/// Re-export major types
pub use schema_builder::{WordFields, build_schema};
pub use tantivy_store::TantivyWordStore;
pub use word_store::WordStore;

//! lexicon dictionary library
//!
//! Word definitions persisted in a tantivy index, plus issuance and
//! verification of HS256 tokens.

/// Configuration module - LexiconConfig, StoreConfig, TokenConfig and their validation
pub mod config;

/// Error module - ConfigError, StoreError, TokenError, LexiconError
pub mod errors;

/// Data model module - Word, NewWord, Credentials, Claims
pub mod models;

/// Store module - WordStore trait and the tantivy-backed implementation
pub mod store;

/// Token module - signing and verification of credential tokens
pub mod token;

/// Re-exports
pub use config::{LexiconConfig, StoreConfig, TokenConfig, VerificationKey};
pub use errors::{LexiconError, LexiconResult, StoreError, TokenError};
pub use models::{Claims, Credentials, IssuedToken, NewWord, Word};
pub use store::{TantivyWordStore, WordStore};
pub use token::TokenService;

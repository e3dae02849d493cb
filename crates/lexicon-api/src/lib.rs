//! lexicon-api crate
//!
//! Web server exposing the lexicon word store and token issuance over HTTP.
//!
//! ## Endpoints
//! - `GET /definition` - List all words
//! - `GET /definition/?word=X` - Look up one word
//! - `POST /definition` - Create a word
//! - `PUT /definition`, `DELETE /definition` - Not implemented
//! - `POST /token` - Issue a token
//! - `GET /verify?token=T&word=X` - Token-checked lookup
//! - `GET /`, `GET /welcome` - Static pages
//! - `GET /health` - Health Check
//!
//! ## Usage Example
//! ```bash
//! curl -X POST http://127.0.0.1:8080/definition \
//!   -d '{"word": "lexicon", "definition": "the vocabulary of a language"}'
//! ```

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod service;

pub use api::AppState;
pub use config::Config;
pub use errors::{ApiError, ApiErrorKind};
pub use models::{ErrorEnvelope, LookupQuery, PrettyJson, VerifyQuery};
pub use service::DictionaryService;

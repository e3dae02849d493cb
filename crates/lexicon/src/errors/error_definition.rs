//! Error definitions

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Errors raised while validating configuration
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum ConfigError {
  /// store.writer_memory_bytes is out of range
  #[error("store.writer_memory_bytes must be between {min} and {max} bytes: actual={actual}")]
  InvalidWriterMemoryBytes {
    /// Minimum allowed value (bytes)
    min: usize,
    /// Maximum allowed value (bytes)
    max: usize,
    /// Configured value (bytes)
    actual: usize,
  },

  /// store.index_dir exists but is not a directory
  #[error("store.index_dir is not a directory: path={path:?}")]
  InvalidIndexDir {
    /// Offending path
    path: PathBuf,
  },

  /// token.secret is empty
  #[error("token.secret must not be empty")]
  EmptySecret,

  /// A key id is empty
  #[error("token key id must not be empty")]
  EmptyKeyId,

  /// The same key id appears twice among the active and previous keys
  #[error("token key id is used more than once: {kid}")]
  DuplicateKeyId {
    /// Repeated key id
    kid: String,
  },

  /// token.ttl_secs is zero
  #[error("token.ttl_secs must be at least 1 when set")]
  InvalidTokenTtl,

  /// A configuration value could not be parsed
  #[error("invalid value for {name}: {reason}")]
  InvalidValue {
    /// Setting name
    name: String,
    /// Why the value was rejected
    reason: String,
  },
}

/// Document store errors
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum StoreError {
  /// A uniqueness constraint would be violated by the insert
  #[error("duplicate key: {field} \"{value}\" already exists")]
  Duplicate {
    /// Field carrying the constraint
    field: &'static str,
    /// Value that already exists
    value: String,
  },

  /// Tantivy index operation failed
  #[error("tantivy index error: {0}")]
  Tantivy(#[from] tantivy::TantivyError),

  /// The index directory could not be created
  #[error("invalid index path: {path}: {source}")]
  InvalidIndexPath {
    /// Path that failed
    path: PathBuf,
    /// Underlying I/O error
    #[source]
    source: Arc<io::Error>,
  },

  /// A stored document is missing a field or the schema does not match
  #[error("invalid index: field={field}, reason={reason}")]
  InvalidIndex {
    /// Field involved
    field: String,
    /// What is wrong with it
    reason: String,
  },

  /// The writer lock was poisoned by a panicking insert
  #[error("index writer lock poisoned")]
  WriterPoisoned,
}

impl StoreError {
  /// Creates a duplicate-key error
  #[must_use]
  pub fn duplicate(field: &'static str, value: impl Into<String>) -> Self {
    Self::Duplicate {
      field,
      value: value.into(),
    }
  }

  /// Whether this error reports a uniqueness violation
  #[must_use]
  pub fn is_duplicate(&self) -> bool {
    matches!(self, Self::Duplicate { .. })
  }
}

/// Token signing and verification errors
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TokenError {
  /// The token could not be signed
  #[error("failed to sign token: {0}")]
  Signing(#[source] jsonwebtoken::errors::Error),

  /// The token is not a well-formed JWT
  #[error("malformed token: {0}")]
  Malformed(#[source] jsonwebtoken::errors::Error),

  /// The header names no key, or a key this service does not know
  #[error("unknown signing key: {}", .kid.as_deref().unwrap_or("<none>"))]
  UnknownKey {
    /// `kid` from the token header
    kid: Option<String>,
  },

  /// Signature, algorithm or expiry check failed
  #[error("invalid token: {0}")]
  Invalid(#[source] jsonwebtoken::errors::Error),
}

/// Top-level error of the lexicon crate
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LexiconError {
  /// Configuration error
  #[error(transparent)]
  Config(#[from] ConfigError),

  /// Store error
  #[error(transparent)]
  Store(#[from] StoreError),

  /// Token error
  #[error(transparent)]
  Token(#[from] TokenError),
}

/// Standard Result alias of the lexicon crate
pub type LexiconResult<T> = Result<T, LexiconError>;

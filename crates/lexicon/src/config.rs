// crates/lexicon/src/config.rs

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::ConfigError;

/// Smallest writer budget tantivy accepts for a single indexing thread.
pub const MIN_WRITER_MEMORY_BYTES: usize = 15_000_000;

/// Upper bound for the writer budget.
pub const MAX_WRITER_MEMORY_BYTES: usize = 1_000_000_000;

/// Default writer budget (50MB).
pub const DEFAULT_WRITER_MEMORY_BYTES: usize = 50_000_000;

/// Default key id placed in the `kid` header of issued tokens.
pub const DEFAULT_KEY_ID: &str = "v1";

/// Top-level configuration for lexicon.
#[derive(Debug, Clone, Deserialize)]
pub struct LexiconConfig {
  /// [store] section
  pub store: StoreConfig,
  /// [token] section
  pub token: TokenConfig,
}

/// [store] section configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
  /// Index directory. `None` keeps the index in memory.
  #[serde(default)]
  pub index_dir: Option<PathBuf>,
  /// Memory buffer size for the IndexWriter (bytes)
  #[serde(default = "default_writer_memory_bytes")]
  pub writer_memory_bytes: usize,
}

fn default_writer_memory_bytes() -> usize {
  DEFAULT_WRITER_MEMORY_BYTES
}

fn default_key_id() -> String {
  DEFAULT_KEY_ID.to_string()
}

impl Default for StoreConfig {
  fn default() -> Self {
    Self {
      index_dir: None,
      writer_memory_bytes: DEFAULT_WRITER_MEMORY_BYTES,
    }
  }
}

/// [token] section configuration.
#[derive(Clone, Deserialize)]
pub struct TokenConfig {
  /// HMAC secret used to sign new tokens
  pub secret: String,
  /// Version of `secret`, written to the `kid` header
  #[serde(default = "default_key_id")]
  pub key_id: String,
  /// Retired keys still accepted when verifying
  #[serde(default)]
  pub previous_keys: Vec<VerificationKey>,
  /// Token lifetime in seconds. `None` issues tokens without `exp`.
  #[serde(default)]
  pub ttl_secs: Option<u64>,
}

/// A key that is only used to verify tokens
#[derive(Clone, Deserialize)]
pub struct VerificationKey {
  /// Key id matched against the token's `kid`
  pub kid: String,
  /// HMAC secret
  pub secret: String,
}

impl TokenConfig {
  /// Token configuration with a single active key
  pub fn new(secret: impl Into<String>, key_id: impl Into<String>) -> Self {
    Self {
      secret: secret.into(),
      key_id: key_id.into(),
      previous_keys: Vec::new(),
      ttl_secs: None,
    }
  }
}

impl std::fmt::Debug for TokenConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TokenConfig")
      .field("secret", &"<redacted>")
      .field("key_id", &self.key_id)
      .field("previous_keys", &self.previous_keys)
      .field("ttl_secs", &self.ttl_secs)
      .finish()
  }
}

impl std::fmt::Debug for VerificationKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("VerificationKey")
      .field("kid", &self.kid)
      .field("secret", &"<redacted>")
      .finish()
  }
}

// ===== Accessor Methods =====

impl LexiconConfig {
  /// Returns the index directory, `None` for an in-memory index.
  pub fn index_dir(&self) -> Option<&Path> {
    self.store.index_dir.as_deref()
  }

  /// Returns the memory buffer size (bytes) for the IndexWriter.
  pub fn writer_memory_bytes(&self) -> usize {
    self.store.writer_memory_bytes
  }

  /// Validates the configuration.
  ///
  /// # Validation Items
  /// - `store.writer_memory_bytes` is within 15MB - 1GB
  /// - `store.index_dir`, when it exists, is a directory
  /// - `token.secret` and every previous secret are non-empty
  /// - key ids are non-empty and unique
  /// - `token.ttl_secs` >= 1 when set
  ///
  /// # Errors
  /// Returns the corresponding `ConfigError` if validation fails.
  pub fn validate(&self) -> Result<(), ConfigError> {
    self.store.validate()?;
    self.token.validate()
  }
}

impl StoreConfig {
  /// Validates the [store] section.
  ///
  /// # Errors
  /// Returns the corresponding `ConfigError` if validation fails.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if !(MIN_WRITER_MEMORY_BYTES..=MAX_WRITER_MEMORY_BYTES).contains(&self.writer_memory_bytes) {
      return Err(ConfigError::InvalidWriterMemoryBytes {
        min: MIN_WRITER_MEMORY_BYTES,
        max: MAX_WRITER_MEMORY_BYTES,
        actual: self.writer_memory_bytes,
      });
    }

    // A missing directory is created when the store opens
    if let Some(dir) = &self.index_dir
      && dir.exists()
      && !dir.is_dir()
    {
      return Err(ConfigError::InvalidIndexDir { path: dir.clone() });
    }

    Ok(())
  }
}

impl TokenConfig {
  /// Validates the [token] section.
  ///
  /// # Errors
  /// Returns the corresponding `ConfigError` if validation fails.
  pub fn validate(&self) -> Result<(), ConfigError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(self.previous_keys.len() + 1);

    let keys = std::iter::once((self.key_id.as_str(), self.secret.as_str()))
      .chain(self.previous_keys.iter().map(|k| (k.kid.as_str(), k.secret.as_str())));

    for (kid, secret) in keys {
      if secret.is_empty() {
        return Err(ConfigError::EmptySecret);
      }
      if kid.is_empty() {
        return Err(ConfigError::EmptyKeyId);
      }
      if !seen.insert(kid) {
        return Err(ConfigError::DuplicateKeyId {
          kid: kid.to_string(),
        });
      }
    }

    if self.ttl_secs == Some(0) {
      return Err(ConfigError::InvalidTokenTtl);
    }

    Ok(())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────

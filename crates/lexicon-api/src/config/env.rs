//! Config loading from environment variables

use std::path::PathBuf;
use std::str::FromStr;

use lexicon::config::{DEFAULT_KEY_ID, DEFAULT_WRITER_MEMORY_BYTES};
use lexicon::{LexiconConfig, StoreConfig, TokenConfig, VerificationKey};
use tracing::warn;

use super::constants::{
  DEFAULT_BIND_ADDR, ENV_BIND_ADDR, ENV_INDEX_DIR, ENV_TOKEN_KEY_ID, ENV_TOKEN_PREVIOUS_KEYS,
  ENV_TOKEN_SECRET, ENV_TOKEN_TTL_SECS, ENV_WRITER_MEMORY_BYTES,
};
use crate::errors::ApiError;

/// API Server Configuration
#[derive(Debug, Clone)]
pub struct Config {
  /// Bind address (e.g. "127.0.0.1:8080")
  pub bind_addr: String,
  /// Store and token settings
  pub lexicon: LexiconConfig,
}

impl Config {
  /// Loads configuration from environment variables
  ///
  /// # Errors
  /// Returns an error if environment variable values are invalid
  pub fn from_env() -> crate::errors::Result<Self> {
    Self::from_lookup(|name| std::env::var(name).ok())
  }

  /// Loads configuration through `lookup`, which maps a variable name to its value
  ///
  /// # Errors
  /// Returns an error if a value cannot be parsed or the result fails validation
  pub fn from_lookup<F>(lookup: F) -> crate::errors::Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let bind_addr = lookup(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

    let writer_memory_bytes =
      parse_or(&lookup, ENV_WRITER_MEMORY_BYTES, DEFAULT_WRITER_MEMORY_BYTES)?;
    let store = StoreConfig {
      index_dir: lookup(ENV_INDEX_DIR).filter(|s| !s.is_empty()).map(PathBuf::from),
      writer_memory_bytes,
    };

    let secret = match lookup(ENV_TOKEN_SECRET).filter(|s| !s.is_empty()) {
      Some(secret) => secret,
      None => {
        warn!(
          "{ENV_TOKEN_SECRET} is not set; using a random per-process secret, \
           tokens will not survive a restart"
        );
        random_secret()
      }
    };

    let token = TokenConfig {
      secret,
      key_id: lookup(ENV_TOKEN_KEY_ID).unwrap_or_else(|| DEFAULT_KEY_ID.to_string()),
      previous_keys: match lookup(ENV_TOKEN_PREVIOUS_KEYS) {
        Some(raw) => parse_previous_keys(&raw)?,
        None => Vec::new(),
      },
      ttl_secs: lookup(ENV_TOKEN_TTL_SECS)
        .map(|raw| parse_value(ENV_TOKEN_TTL_SECS, &raw))
        .transpose()?,
    };

    let lexicon = LexiconConfig { store, token };
    lexicon.validate().map_err(|e| ApiError::config(e.to_string()))?;

    Ok(Self { bind_addr, lexicon })
  }
}

fn parse_value<T>(name: &str, raw: &str) -> crate::errors::Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  raw
    .trim()
    .parse()
    .map_err(|e| ApiError::config(format!("invalid value for {name}: {e}")))
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> crate::errors::Result<T>
where
  F: Fn(&str) -> Option<String>,
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match lookup(name) {
    Some(raw) => parse_value(name, &raw),
    None => Ok(default),
  }
}

/// Parses `kid:secret,kid:secret`
fn parse_previous_keys(raw: &str) -> crate::errors::Result<Vec<VerificationKey>> {
  raw
    .split(',')
    .map(str::trim)
    .filter(|entry| !entry.is_empty())
    .map(|entry| {
      let (kid, secret) = entry.split_once(':').ok_or_else(|| {
        ApiError::config(format!(
          "invalid value for {ENV_TOKEN_PREVIOUS_KEYS}: entries must be kid:secret"
        ))
      })?;
      Ok(VerificationKey {
        kid: kid.to_string(),
        secret: secret.to_string(),
      })
    })
    .collect()
}

/// 256 bits from two v4 UUIDs
fn random_secret() -> String {
  format!("{}{}", uuid::Uuid::new_v4().simple(), uuid::Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;

  fn config_from(vars: &[(&str, &str)]) -> crate::errors::Result<Config> {
    let vars: HashMap<String, String> =
      vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    Config::from_lookup(|name| vars.get(name).cloned())
  }

  #[test]
  fn defaults_when_nothing_is_set() {
    let config = config_from(&[]).unwrap();

    assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    assert!(config.lexicon.index_dir().is_none());
    assert_eq!(config.lexicon.writer_memory_bytes(), DEFAULT_WRITER_MEMORY_BYTES);
    assert_eq!(config.lexicon.token.key_id, DEFAULT_KEY_ID);
    assert_eq!(config.lexicon.token.secret.len(), 64);
    assert!(config.lexicon.token.ttl_secs.is_none());
  }

  #[test]
  fn random_secrets_differ() {
    let a = config_from(&[]).unwrap();
    let b = config_from(&[]).unwrap();
    assert_ne!(a.lexicon.token.secret, b.lexicon.token.secret);
  }

  #[test]
  fn explicit_values_are_used() {
    let config = config_from(&[
      (ENV_BIND_ADDR, "0.0.0.0:9000"),
      (ENV_INDEX_DIR, "/var/lib/lexicon"),
      (ENV_WRITER_MEMORY_BYTES, "20000000"),
      (ENV_TOKEN_SECRET, "s3cret"),
      (ENV_TOKEN_KEY_ID, "v2"),
      (ENV_TOKEN_PREVIOUS_KEYS, "v1:old, v0:older"),
      (ENV_TOKEN_TTL_SECS, "3600"),
    ])
    .unwrap();

    assert_eq!(config.bind_addr, "0.0.0.0:9000");
    assert_eq!(
      config.lexicon.index_dir(),
      Some(std::path::Path::new("/var/lib/lexicon"))
    );
    assert_eq!(config.lexicon.writer_memory_bytes(), 20_000_000);
    assert_eq!(config.lexicon.token.secret, "s3cret");
    assert_eq!(config.lexicon.token.key_id, "v2");
    let kids: Vec<&str> =
      config.lexicon.token.previous_keys.iter().map(|k| k.kid.as_str()).collect();
    assert_eq!(kids, vec!["v1", "v0"]);
    assert_eq!(config.lexicon.token.ttl_secs, Some(3600));
  }

  #[test]
  fn unparsable_number_is_config_error() {
    let err = config_from(&[(ENV_WRITER_MEMORY_BYTES, "lots")]).unwrap_err();
    assert_eq!(err.code(), "config_error");
    assert!(err.to_string().contains(ENV_WRITER_MEMORY_BYTES));
  }

  #[test]
  fn malformed_previous_key_is_config_error() {
    let err = config_from(&[(ENV_TOKEN_PREVIOUS_KEYS, "no-separator")]).unwrap_err();
    assert_eq!(err.code(), "config_error");
  }

  #[test]
  fn validation_failure_is_config_error() {
    let err = config_from(&[(ENV_WRITER_MEMORY_BYTES, "1000")]).unwrap_err();
    assert_eq!(err.code(), "config_error");
  }
}

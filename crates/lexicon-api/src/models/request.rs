//! Request model definitions
//!
//! Query strings are taken as raw `(name, value)` pairs so a repeated
//! parameter resolves to its first occurrence instead of failing to decode.

/// First value of `name` in `pairs`
fn first_value(pairs: &[(String, String)], name: &str) -> Option<String> {
  pairs.iter().find(|(key, _)| key == name).map(|(_, value)| value.clone())
}

/// Query of `GET /definition/`
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LookupQuery {
  /// Term to look up; absent is the same as empty
  pub word: String,
}

impl LookupQuery {
  /// Builds the query from decoded query-string pairs
  #[must_use]
  pub fn from_pairs(pairs: &[(String, String)]) -> Self {
    Self {
      word: first_value(pairs, "word").unwrap_or_default(),
    }
  }
}

/// Query of `GET /verify`
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VerifyQuery {
  /// Token issued by `POST /token`
  pub token: Option<String>,
  /// Term to look up once the token checks out
  pub word: String,
}

impl VerifyQuery {
  /// Builds the query from decoded query-string pairs
  #[must_use]
  pub fn from_pairs(pairs: &[(String, String)]) -> Self {
    Self {
      token: first_value(pairs, "token"),
      word: first_value(pairs, "word").unwrap_or_default(),
    }
  }
}

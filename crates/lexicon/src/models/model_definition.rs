//! Data Model Definition
use serde::{Deserialize, Serialize};

/// Dictionary entry stored in the document store
///
/// `id` is assigned when the word is created and never changes afterwards.
/// `word` carries the store's uniqueness constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
  /// Store-wide unique identifier
  pub id: String,

  /// The term itself
  pub word: String,

  /// Definition of the term
  #[serde(default)]
  pub definition: String,
}

/// Body of a create request
///
/// Any `id` sent by the client is not part of this type and is dropped while
/// decoding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewWord {
  /// The term itself
  pub word: String,

  /// Definition of the term
  #[serde(default)]
  pub definition: String,
}

impl Word {
  /// Constructor for Word
  pub fn new(id: impl Into<String>, word: impl Into<String>, definition: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      word: word.into(),
      definition: definition.into(),
    }
  }

  /// Builds a Word from a create request with a freshly generated identifier
  #[must_use]
  pub fn from_new(new_word: NewWord) -> Self {
    Self {
      id: uuid::Uuid::new_v4().to_string(),
      word: new_word.word,
      definition: new_word.definition,
    }
  }
}

/// Username and password sent to the token endpoint
///
/// Transient: never persisted or checked against stored credentials.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
  /// User name
  pub username: String,
  /// Password, copied into the token claims as-is
  pub password: String,
}

/// Claims carried by an issued token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
  /// User name
  pub username: String,
  /// Password
  pub password: String,
  /// Expiry (seconds since the Unix epoch), only present when a lifetime is configured
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub exp: Option<u64>,
}

impl From<&Credentials> for Claims {
  fn from(credentials: &Credentials) -> Self {
    Self {
      username: credentials.username.clone(),
      password: credentials.password.clone(),
      exp: None,
    }
  }
}

/// Token issuance response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
  /// Signed token string
  #[serde(rename = "Token")]
  pub token: String,
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn new_word_ignores_client_id() {
    let body = r#"{"id": "client-chosen", "word": "apple", "definition": "a fruit"}"#;
    let new_word: NewWord = serde_json::from_str(body).unwrap();
    let word = Word::from_new(new_word);

    assert_ne!(word.id, "client-chosen");
    assert!(!word.id.is_empty());
    assert_eq!(word.word, "apple");
    assert_eq!(word.definition, "a fruit");
  }

  #[test]
  fn new_word_definition_defaults_to_empty() {
    let new_word: NewWord = serde_json::from_str(r#"{"word": "apple"}"#).unwrap();
    assert_eq!(new_word.definition, "");
  }

  #[test]
  fn new_word_requires_word() {
    assert!(serde_json::from_str::<NewWord>(r#"{"definition": "x"}"#).is_err());
  }

  #[test]
  fn generated_ids_are_unique() {
    let a = Word::from_new(NewWord {
      word: "a".to_string(),
      definition: String::new(),
    });
    let b = Word::from_new(NewWord {
      word: "a".to_string(),
      definition: String::new(),
    });
    assert_ne!(a.id, b.id);
  }

  #[test]
  fn claims_without_expiry_serialize_to_two_fields() {
    let credentials = Credentials {
      username: "a".to_string(),
      password: "b".to_string(),
    };
    let value = serde_json::to_value(Claims::from(&credentials)).unwrap();
    assert_eq!(value, json!({"username": "a", "password": "b"}));
  }

  #[test]
  fn issued_token_uses_capitalized_key() {
    let value = serde_json::to_value(IssuedToken {
      token: "x.y.z".to_string(),
    })
    .unwrap();
    assert_eq!(value, json!({"Token": "x.y.z"}));
  }
}

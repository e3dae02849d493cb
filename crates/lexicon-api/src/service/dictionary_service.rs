//! Dictionary Service

use std::sync::Arc;

use lexicon::models::{Claims, Credentials, NewWord, Word};
use lexicon::store::{TantivyWordStore, WordStore};
use lexicon::token::TokenService;
use tracing::{debug, info};

use crate::config::Config;
use crate::errors::{ApiError, Result};

/// Word store access and token handling behind the HTTP handlers
///
/// The store is injected as a trait object:
/// - Production: `TantivyWordStore` via [`DictionaryService::init`]
/// - Test: any stub implementing `WordStore`
///
/// Store calls block; callers on the async runtime run them with `spawn_blocking`.
pub struct DictionaryService {
  store: Arc<dyn WordStore>,
  tokens: TokenService,
}

impl DictionaryService {
  /// Creates a service over an existing store and token service
  #[must_use]
  pub fn new(store: Arc<dyn WordStore>, tokens: TokenService) -> Self {
    Self { store, tokens }
  }

  /// Opens the store and prepares the signing keys described by `config`
  ///
  /// # Errors
  /// Returns a configuration error if the index cannot be opened or the
  /// token settings are invalid
  pub fn init(config: &Config) -> Result<Self> {
    let store = TantivyWordStore::from_config(&config.lexicon.store)
      .map_err(|e| ApiError::config(format!("Failed to open word index: {e}")))?;
    let tokens = TokenService::new(&config.lexicon.token)?;

    Ok(Self::new(Arc::new(store), tokens))
  }

  /// All words, sorted by `word`
  ///
  /// # Errors
  /// Store failure
  pub fn list_words(&self) -> Result<Vec<Word>> {
    let words = self.store.find_all()?;
    debug!(count = words.len(), "Listed words");
    Ok(words)
  }

  /// The word whose `word` field equals `value`
  ///
  /// # Errors
  /// - `NotFound` if nothing matches
  /// - Store failure
  pub fn lookup_word(&self, value: &str) -> Result<Word> {
    self
      .store
      .find_by_value(value)?
      .ok_or_else(|| ApiError::not_found(format!("no definition found for word \"{value}\"")))
  }

  /// Stores a new word under a freshly generated id
  ///
  /// # Errors
  /// - `Conflict` if the word already exists
  /// - Store failure
  pub fn create_word(&self, new_word: NewWord) -> Result<Word> {
    let word = Word::from_new(new_word);
    self.store.insert(&word)?;
    info!(id = %word.id, word = %word.word, "Word created");
    Ok(word)
  }

  /// Signs a token for the given credentials
  ///
  /// # Errors
  /// Signing failure
  pub fn issue_token(&self, credentials: &Credentials) -> Result<String> {
    Ok(self.tokens.issue(credentials)?)
  }

  /// Checks a token presented by a client
  ///
  /// # Errors
  /// - `InvalidInput` if no token was given
  /// - `Unauthorized` if the token does not verify
  pub fn verify_token(&self, token: Option<&str>) -> Result<Claims> {
    let token = token.ok_or_else(|| ApiError::invalid_input("missing token parameter"))?;
    Ok(self.tokens.verify(token)?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::errors::ApiErrorKind;
  use lexicon::config::TokenConfig;
  use lexicon::errors::StoreError;

  /// Store that fails every call
  struct BrokenStore;

  impl WordStore for BrokenStore {
    fn find_all(&self) -> std::result::Result<Vec<Word>, StoreError> {
      Err(StoreError::WriterPoisoned)
    }

    fn find_by_value(&self, _value: &str) -> std::result::Result<Option<Word>, StoreError> {
      Err(StoreError::WriterPoisoned)
    }

    fn insert(&self, _word: &Word) -> std::result::Result<(), StoreError> {
      Err(StoreError::WriterPoisoned)
    }
  }

  fn tokens() -> TokenService {
    TokenService::new(&TokenConfig::new("test-secret", "v1")).unwrap()
  }

  fn memory_service() -> DictionaryService {
    let store = TantivyWordStore::in_memory(15_000_000).unwrap();
    DictionaryService::new(Arc::new(store), tokens())
  }

  fn new_word(word: &str, definition: &str) -> NewWord {
    NewWord {
      word: word.to_string(),
      definition: definition.to_string(),
    }
  }

  #[test]
  fn create_assigns_id_and_lookup_finds_it() {
    let service = memory_service();
    let created = service.create_word(new_word("apple", "a fruit")).unwrap();
    assert!(!created.id.is_empty());

    let found = service.lookup_word("apple").unwrap();
    assert_eq!(found, created);
  }

  #[test]
  fn duplicate_create_is_conflict() {
    let service = memory_service();
    service.create_word(new_word("apple", "a fruit")).unwrap();

    let err = service.create_word(new_word("apple", "a company")).unwrap_err();
    assert_eq!(err.kind(), ApiErrorKind::Conflict);
    assert_eq!(service.lookup_word("apple").unwrap().definition, "a fruit");
  }

  #[test]
  fn unknown_word_is_not_found() {
    let err = memory_service().lookup_word("pear").unwrap_err();
    assert_eq!(err.kind(), ApiErrorKind::NotFound);
    assert_eq!(err.client_message(), "no definition found for word \"pear\"");
  }

  #[test]
  fn store_failure_is_internal() {
    let service = DictionaryService::new(Arc::new(BrokenStore), tokens());
    assert_eq!(service.list_words().unwrap_err().kind(), ApiErrorKind::Internal);
    assert_eq!(service.lookup_word("x").unwrap_err().kind(), ApiErrorKind::Internal);
    assert_eq!(
      service.create_word(new_word("x", "")).unwrap_err().kind(),
      ApiErrorKind::Internal
    );
  }

  #[test]
  fn missing_token_is_invalid_input() {
    let err = memory_service().verify_token(None).unwrap_err();
    assert_eq!(err.kind(), ApiErrorKind::InvalidInput);
  }

  #[test]
  fn issued_token_verifies() {
    let service = memory_service();
    let credentials = Credentials {
      username: "a".to_string(),
      password: "b".to_string(),
    };
    let token = service.issue_token(&credentials).unwrap();

    let claims = service.verify_token(Some(&token)).unwrap();
    assert_eq!(claims.username, "a");
    assert_eq!(claims.password, "b");
  }

  #[test]
  fn garbage_token_is_unauthorized() {
    let err = memory_service().verify_token(Some("not.a.token")).unwrap_err();
    assert_eq!(err.kind(), ApiErrorKind::Unauthorized);
  }
}

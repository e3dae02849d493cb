//! Document store client interface

use crate::errors::StoreError;
use crate::models::Word;

/// Operations the HTTP layer needs from the document store.
///
/// Implementations are shared across request tasks, hence `Send + Sync`.
/// Calls may block on I/O and should be run off the async executor.
pub trait WordStore: Send + Sync {
  /// Returns every stored word, ordered by `word`.
  ///
  /// # Errors
  /// Store failure
  fn find_all(&self) -> Result<Vec<Word>, StoreError>;

  /// Returns the word whose `word` field equals `value` exactly.
  ///
  /// `Ok(None)` when nothing matches. The uniqueness constraint on `word`
  /// rules out more than one match.
  ///
  /// # Errors
  /// Store failure
  fn find_by_value(&self, value: &str) -> Result<Option<Word>, StoreError>;

  /// Inserts a word.
  ///
  /// # Errors
  /// - `StoreError::Duplicate` when `id` or `word` already exists
  /// - any other variant for store failures
  fn insert(&self, word: &Word) -> Result<(), StoreError>;
}

//! crates/lexicon/tests/integration_test.rs
//!
//! End-to-end store test on disk.
//! Verifies: Create index -> Insert words -> Reopen -> Lookup -> Duplicate check.

use tempfile::TempDir;

use lexicon::LexiconError;
use lexicon::config::{DEFAULT_WRITER_MEMORY_BYTES, StoreConfig};
use lexicon::models::{NewWord, Word};
use lexicon::store::{TantivyWordStore, WordStore};

/// Generate sample words.
fn sample_words() -> Vec<Word> {
  vec![
    Word::new("w-1", "ephemeral", "lasting for a very short time"),
    Word::new("w-2", "lexicon", "the vocabulary of a language"),
    Word::new("w-3", "apricot", "a juicy, soft fruit"),
  ]
}

#[test]
fn words_survive_reopen() {
  let temp_dir = TempDir::new().expect("Failed to create temporary directory");

  {
    let store = TantivyWordStore::open_or_create(temp_dir.path(), DEFAULT_WRITER_MEMORY_BYTES)
      .expect("Failed to create store");
    for word in sample_words() {
      store.insert(&word).expect("Failed to insert");
    }
  }

  // Reopen the same directory
  let store = TantivyWordStore::open_or_create(temp_dir.path(), DEFAULT_WRITER_MEMORY_BYTES)
    .expect("Failed to reopen store");

  let all = store.find_all().expect("Failed to list");
  let terms: Vec<&str> = all.iter().map(|w| w.word.as_str()).collect();
  assert_eq!(terms, vec!["apricot", "ephemeral", "lexicon"]);

  let found = store.find_by_value("lexicon").expect("Failed to look up");
  assert_eq!(found, Some(Word::new("w-2", "lexicon", "the vocabulary of a language")));
}

#[test]
fn duplicate_is_rejected_after_reopen() {
  let temp_dir = TempDir::new().expect("Failed to create temporary directory");

  {
    let store = TantivyWordStore::open_or_create(temp_dir.path(), DEFAULT_WRITER_MEMORY_BYTES)
      .expect("Failed to create store");
    store.insert(&Word::new("w-1", "lexicon", "first")).expect("Failed to insert");
  }

  let store = TantivyWordStore::open_or_create(temp_dir.path(), DEFAULT_WRITER_MEMORY_BYTES)
    .expect("Failed to reopen store");

  let err = store.insert(&Word::new("w-2", "lexicon", "second")).unwrap_err();
  assert!(err.is_duplicate());
  assert_eq!(
    store.find_by_value("lexicon").unwrap().map(|w| w.definition),
    Some("first".to_string())
  );
}

#[test]
fn from_config_creates_missing_directory() {
  let temp_dir = TempDir::new().expect("Failed to create temporary directory");
  let index_dir = temp_dir.path().join("nested").join("index");

  let config = StoreConfig {
    index_dir: Some(index_dir.clone()),
    writer_memory_bytes: DEFAULT_WRITER_MEMORY_BYTES,
  };
  let store = TantivyWordStore::from_config(&config).expect("Failed to open store");

  assert!(index_dir.join("meta.json").exists());
  assert!(store.is_empty());
}

#[test]
fn generated_ids_flow_through_store() {
  let store = TantivyWordStore::from_config(&StoreConfig::default()).expect("Failed to open store");

  let word = Word::from_new(NewWord {
    word: "serendipity".to_string(),
    definition: "a happy accident".to_string(),
  });
  store.insert(&word).expect("Failed to insert");

  let found = store.find_by_value("serendipity").unwrap().expect("word should exist");
  assert!(!found.id.is_empty());
  assert_eq!(found.id, word.id);
}

#[test]
fn from_config_rejects_invalid_writer_memory() {
  let config = StoreConfig {
    index_dir: None,
    writer_memory_bytes: 1_000,
  };

  let err = TantivyWordStore::from_config(&config).unwrap_err();
  assert!(matches!(err, LexiconError::Config(_)));
}

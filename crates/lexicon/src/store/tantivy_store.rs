//! Tantivy-backed word store
//!
//! Words are tantivy documents. Inserts go through a single `IndexWriter`
//! guarded by a mutex; every insert commits and reloads the reader so the new
//! word is visible to the next request.

use std::path::Path;
use std::sync::{Arc, Mutex};

use tantivy::collector::{DocSetCollector, TopDocs};
use tantivy::query::{AllQuery, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, Value};
use tantivy::{DocAddress, Index, IndexReader, IndexWriter, ReloadPolicy, Term};
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::errors::{LexiconResult, StoreError};
use crate::models::Word;
use crate::store::schema_builder::{WordFields, build_schema};
use crate::store::word_store::WordStore;

/// Meta file name used to determine index existence
const META_JSON: &str = "meta.json";

/// Word store on top of a tantivy index.
///
/// # Responsibilities
///
/// - Index directory creation (or an in-memory index)
/// - Uniqueness of `id` and `word`
/// - Conversion between `Word` and `TantivyDocument`
pub struct TantivyWordStore {
  /// Reader, reloaded manually after each commit
  reader: IndexReader,

  /// Single writer; the lock also serialises the uniqueness check
  writer: Mutex<IndexWriter>,

  /// Schema fields reference
  fields: WordFields,
}

impl std::fmt::Debug for TantivyWordStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TantivyWordStore")
      .field("fields", &self.fields)
      .finish_non_exhaustive()
  }
}

impl TantivyWordStore {
  /// Validates `config` and opens the store it describes.
  ///
  /// On-disk when `index_dir` is set, in memory otherwise.
  ///
  /// # Errors
  /// - `LexiconError::Config` if `config` fails validation
  /// - `LexiconError::Store`, see [`open_or_create`](Self::open_or_create) and
  ///   [`in_memory`](Self::in_memory)
  pub fn from_config(config: &StoreConfig) -> LexiconResult<Self> {
    config.validate()?;

    let store = match &config.index_dir {
      Some(dir) => Self::open_or_create(dir, config.writer_memory_bytes)?,
      None => {
        warn!("No index directory configured; words are kept in memory only");
        Self::in_memory(config.writer_memory_bytes)?
      }
    };
    Ok(store)
  }

  /// Opens an index. Creates a new one if it does not exist.
  ///
  /// # Errors
  /// - Directory creation failure
  /// - Tantivy index creation/open error
  /// - Existing index lacks one of the word fields
  pub fn open_or_create<P: AsRef<Path>>(
    index_path: P,
    writer_memory_bytes: usize,
  ) -> Result<Self, StoreError> {
    let index_path = index_path.as_ref();

    let (index, fields) = if index_path.join(META_JSON).exists() {
      let index = Index::open_in_dir(index_path)?;
      let fields = WordFields::from_schema(&index.schema())?;
      info!(path = %index_path.display(), "Opened existing word index");
      (index, fields)
    } else {
      if !index_path.exists() {
        std::fs::create_dir_all(index_path).map_err(|e| StoreError::InvalidIndexPath {
          path: index_path.to_path_buf(),
          source: Arc::new(e),
        })?;
      }
      let (schema, fields) = build_schema();
      let index = Index::create_in_dir(index_path, schema)?;
      info!(path = %index_path.display(), "Created word index");
      (index, fields)
    };

    Self::with_index(index, fields, writer_memory_bytes)
  }

  /// Creates a store whose index lives only in RAM.
  ///
  /// # Errors
  /// Tantivy writer/reader creation error
  pub fn in_memory(writer_memory_bytes: usize) -> Result<Self, StoreError> {
    let (schema, fields) = build_schema();
    let index = Index::create_in_ram(schema);
    Self::with_index(index, fields, writer_memory_bytes)
  }

  fn with_index(
    index: Index,
    fields: WordFields,
    writer_memory_bytes: usize,
  ) -> Result<Self, StoreError> {
    let reader = index.reader_builder().reload_policy(ReloadPolicy::Manual).try_into()?;

    // One indexing thread: inserts arrive one document at a time
    let writer: IndexWriter = index.writer_with_num_threads(1, writer_memory_bytes)?;

    Ok(Self {
      reader,
      writer: Mutex::new(writer),
      fields,
    })
  }

  /// Number of stored words
  pub fn len(&self) -> u64 {
    self.reader.searcher().num_docs()
  }

  /// Whether the store holds no words
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  fn contains(
    &self,
    searcher: &tantivy::Searcher,
    field: Field,
    value: &str,
  ) -> Result<bool, StoreError> {
    let term = Term::from_field_text(field, value);
    Ok(searcher.doc_freq(&term)? > 0)
  }

  /// Word -> TantivyDocument conversion
  fn to_tantivy_document(&self, word: &Word) -> tantivy::TantivyDocument {
    let mut doc = tantivy::TantivyDocument::default();
    doc.add_text(self.fields.id, &word.id);
    doc.add_text(self.fields.word, &word.word);
    doc.add_text(self.fields.definition, &word.definition);
    doc
  }

  /// TantivyDocument -> Word conversion
  fn load_word(
    &self,
    searcher: &tantivy::Searcher,
    address: DocAddress,
  ) -> Result<Word, StoreError> {
    let doc: tantivy::TantivyDocument = searcher.doc(address)?;

    let text = |field: Field| doc.get_first(field).and_then(|v| v.as_str().map(String::from));

    let id = text(self.fields.id).ok_or_else(|| StoreError::InvalidIndex {
      field: "id".to_string(),
      reason: "Required field not found".to_string(),
    })?;
    let word = text(self.fields.word).ok_or_else(|| StoreError::InvalidIndex {
      field: "word".to_string(),
      reason: "Required field not found".to_string(),
    })?;
    let definition = text(self.fields.definition).unwrap_or_default();

    Ok(Word { id, word, definition })
  }
}

impl WordStore for TantivyWordStore {
  fn find_all(&self) -> Result<Vec<Word>, StoreError> {
    let searcher = self.reader.searcher();
    let addresses = searcher.search(&AllQuery, &DocSetCollector)?;

    let mut words = addresses
      .into_iter()
      .map(|address| self.load_word(&searcher, address))
      .collect::<Result<Vec<_>, _>>()?;
    words.sort_by(|a, b| a.word.cmp(&b.word));

    debug!(count = words.len(), "Loaded all words");
    Ok(words)
  }

  fn find_by_value(&self, value: &str) -> Result<Option<Word>, StoreError> {
    let searcher = self.reader.searcher();
    let query = TermQuery::new(
      Term::from_field_text(self.fields.word, value),
      IndexRecordOption::Basic,
    );

    let top_docs = searcher.search(&query, &TopDocs::with_limit(1))?;
    debug!(value, hits = top_docs.len(), "Looked up word");

    top_docs
      .into_iter()
      .next()
      .map(|(_score, address)| self.load_word(&searcher, address))
      .transpose()
  }

  fn insert(&self, word: &Word) -> Result<(), StoreError> {
    let mut writer = self.writer.lock().map_err(|_| StoreError::WriterPoisoned)?;

    // Checked under the writer lock, so two concurrent inserts cannot both pass.
    // Reload first: a commit whose reload failed must still count.
    self.reader.reload()?;
    let searcher = self.reader.searcher();
    if self.contains(&searcher, self.fields.id, &word.id)? {
      return Err(StoreError::duplicate("id", &word.id));
    }
    if self.contains(&searcher, self.fields.word, &word.word)? {
      return Err(StoreError::duplicate("word", &word.word));
    }

    writer.add_document(self.to_tantivy_document(word))?;
    if let Err(e) = writer.commit() {
      // Drop the uncommitted document so the next commit does not pick it up
      if let Err(rollback_err) = writer.rollback() {
        warn!(error = %rollback_err, "Rollback after failed commit also failed");
      }
      return Err(e.into());
    }

    // The word is durable at this point; a stale reader is caught up by the next reload
    if let Err(e) = self.reader.reload() {
      warn!(error = %e, id = %word.id, "Reader reload after commit failed");
    }

    debug!(id = %word.id, word = %word.word, "Inserted word");
    Ok(())
  }
}

//! Tantivy schema for word documents

use tantivy::schema::{Field, STORED, STRING, Schema, TEXT};

/// Typed handles to the schema fields.
///
/// `Schema::get_field()` looks fields up by name; holding the handles here
/// keeps the name lookups in one place.
#[derive(Clone, Copy, Debug)]
pub struct WordFields {
  /// Identifier (STRING + STORED) - exact match
  pub id: Field,
  /// Term (STRING + STORED) - exact match, unique
  pub word: Field,
  /// Definition (TEXT + STORED)
  pub definition: Field,
}

impl WordFields {
  /// Rebuilds the field handles from the schema of an existing index.
  ///
  /// # Errors
  /// - `id`, `word` or `definition` is missing
  pub fn from_schema(schema: &Schema) -> Result<Self, tantivy::TantivyError> {
    let lookup = |name: &str| {
      schema.get_field(name).map_err(|e| {
        tantivy::TantivyError::InvalidArgument(format!("field '{name}' not found: {e}"))
      })
    };

    Ok(Self {
      id: lookup("id")?,
      word: lookup("word")?,
      definition: lookup("definition")?,
    })
  }
}

/// Builds the word schema.
///
/// # Field Layout
///
/// - `id`: STRING + STORED. Raw-tokenized so the uniqueness check can use `doc_freq`.
/// - `word`: STRING + STORED. Raw-tokenized; lookups are exact, case-sensitive matches.
/// - `definition`: TEXT + STORED, default tokenizer.
pub fn build_schema() -> (Schema, WordFields) {
  let mut builder = Schema::builder();

  let id = builder.add_text_field("id", STRING | STORED);
  let word = builder.add_text_field("word", STRING | STORED);
  let definition = builder.add_text_field("definition", TEXT | STORED);

  let schema = builder.build();

  (schema, WordFields { id, word, definition })
}

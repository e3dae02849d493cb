//! HTTP handler definitions

use axum::{
  extract::{Query, State, rejection::QueryRejection},
  http::StatusCode,
  response::Html,
};
use lexicon::models::{Credentials, IssuedToken, NewWord, Word};
use tracing::{debug, error, info};

use crate::errors::{ApiError, Result};
use crate::models::{LookupQuery, PrettyJson, VerifyQuery};

use super::payload::JsonPayload;
use super::state::AppState;

/// Body of the update/delete placeholders
pub const NOT_IMPLEMENTED_BODY: &str = "Not implemented yet putdef\n";

const SIGN_IN_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>lexicon - sign in</title></head>
<body>
<h1>Sign in</h1>
<p>Request a token by sending your credentials:</p>
<pre>POST /token
{"username": "...", "password": "..."}</pre>
<p>The response carries the token as <code>{"Token": "..."}</code>.
Present it as <code>GET /verify?token=...&amp;word=...</code>.</p>
</body>
</html>
"#;

const WELCOME_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>lexicon - welcome</title></head>
<body>
<h1>Welcome</h1>
<p>Browse the dictionary at <a href="/definition">/definition</a>.</p>
</body>
</html>
"#;

/// Decoded query string, in order of appearance
type QueryPairs = Vec<(String, String)>;

/// Query-string pairs; an undecodable query counts as empty
fn query_pairs(query: std::result::Result<Query<QueryPairs>, QueryRejection>) -> QueryPairs {
  match query {
    Ok(Query(pairs)) => pairs,
    Err(e) => {
      debug!(error = %e, "Ignoring undecodable query string");
      Vec::new()
    }
  }
}

/// Runs a blocking store call on tokio's blocking pool
async fn run_blocking<T, F>(task: F) -> Result<T>
where
  F: FnOnce() -> Result<T> + Send + 'static,
  T: Send + 'static,
{
  tokio::task::spawn_blocking(task).await.map_err(|e| {
    error!(error = %e, "spawn_blocking error");
    ApiError::internal(format!("blocking task failed: {e}"))
  })?
}

/// GET /definition
///
/// # Response
/// - 200 OK: every word, sorted by `word` (`[]` when empty)
/// - 500 Internal Server Error: store failure
pub async fn list_words(State(state): State<AppState>) -> Result<PrettyJson<Vec<Word>>> {
  let service = state.service.clone();
  let words = run_blocking(move || service.list_words()).await?;
  Ok(PrettyJson::ok(words))
}

/// GET /definition/?word=X
///
/// A missing `word` is looked up as the empty string; a repeated one uses its
/// first value.
///
/// # Response
/// - 200 OK: the matching word
/// - 404 Not Found: no match
/// - 500 Internal Server Error: store failure
pub async fn lookup_word(
  State(state): State<AppState>,
  query: std::result::Result<Query<QueryPairs>, QueryRejection>,
) -> Result<PrettyJson<Word>> {
  let query = LookupQuery::from_pairs(&query_pairs(query));
  debug!(word = %query.word, "Lookup request");

  let word = lookup(&state, query.word).await?;
  Ok(PrettyJson::ok(word))
}

async fn lookup(state: &AppState, value: String) -> Result<Word> {
  let service = state.service.clone();
  run_blocking(move || service.lookup_word(&value)).await
}

/// POST /definition
///
/// # Request Body
/// ```json
/// { "word": "apple", "definition": "a fruit" }
/// ```
///
/// # Response
/// - 201 Created: the stored word, with its new `id`
/// - 400 Bad Request: body is not a word
/// - 409 Conflict: the word already exists
/// - 500 Internal Server Error: store failure
pub async fn create_word(
  State(state): State<AppState>,
  JsonPayload(new_word): JsonPayload<NewWord>,
) -> Result<PrettyJson<Word>> {
  debug!(word = %new_word.word, "Create request");

  let service = state.service.clone();
  let word = run_blocking(move || service.create_word(new_word)).await?;
  Ok(PrettyJson::created(word))
}

/// PUT /definition
pub async fn update_word() -> (StatusCode, &'static str) {
  (StatusCode::OK, NOT_IMPLEMENTED_BODY)
}

/// DELETE /definition
pub async fn delete_word() -> (StatusCode, &'static str) {
  (StatusCode::OK, NOT_IMPLEMENTED_BODY)
}

/// GET /
pub async fn sign_in() -> Html<&'static str> {
  Html(SIGN_IN_PAGE)
}

/// GET /welcome
pub async fn welcome() -> Html<&'static str> {
  Html(WELCOME_PAGE)
}

/// POST /token
///
/// Any username/password pair gets a token; nothing is checked.
///
/// # Response
/// - 201 Created: `{"Token": "<jwt>"}`
/// - 400 Bad Request: body is not a credentials object
/// - 500 Internal Server Error: signing failure
pub async fn issue_token(
  State(state): State<AppState>,
  JsonPayload(credentials): JsonPayload<Credentials>,
) -> Result<PrettyJson<IssuedToken>> {
  let token = state.service.issue_token(&credentials)?;
  info!(username = %credentials.username, "Token issued");
  Ok(PrettyJson::created(IssuedToken { token }))
}

/// GET /verify?token=T&word=X
///
/// # Response
/// - 200 OK: the matching word
/// - 400 Bad Request: `token` missing
/// - 401 Unauthorized: token rejected
/// - 404 Not Found: no match
/// - 500 Internal Server Error: store failure
pub async fn verify_and_lookup(
  State(state): State<AppState>,
  query: std::result::Result<Query<QueryPairs>, QueryRejection>,
) -> Result<PrettyJson<Word>> {
  let query = VerifyQuery::from_pairs(&query_pairs(query));

  let claims = state.service.verify_token(query.token.as_deref())?;
  debug!(username = %claims.username, word = %query.word, "Token verified");

  let word = lookup(&state, query.word).await?;
  Ok(PrettyJson::ok(word))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
  "OK"
}

//! Router definition

use axum::{
  Router,
  routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::handlers::{
  create_word, delete_word, health_check, issue_token, list_words, lookup_word, sign_in,
  update_word, verify_and_lookup, welcome,
};
use super::state::AppState;
use crate::errors::ApiError;

/// Creates the API router
///
/// `/definition/` (lookup) and `/definition` (list and the rest) are distinct
/// routes; no trailing-slash normalisation happens.
pub fn create_router(state: AppState) -> Router {
  Router::new()
    .route("/definition/", get(lookup_word))
    .route(
      "/definition",
      get(list_words).post(create_word).put(update_word).delete(delete_word),
    )
    .route("/", get(sign_in))
    .route("/welcome", get(welcome))
    .route("/token", post(issue_token))
    .route("/verify", get(verify_and_lookup))
    .route("/health", get(health_check))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// Starts the server
///
/// # Errors
/// Returns an error if binding fails or the server stops with an error
pub async fn run_server(state: AppState) -> crate::errors::Result<()> {
  let addr = state.config.bind_addr.clone();
  let listener = tokio::net::TcpListener::bind(&addr)
    .await
    .map_err(|e| ApiError::config(format!("Failed to bind {addr}: {e}")))?;

  tracing::info!("Listening on http://{addr}");

  let router = create_router(state);

  axum::serve(listener, router)
    .await
    .map_err(|e| ApiError::internal(format!("Server error: {e}")))?;

  Ok(())
}

//! JSON body extractor

use axum::{
  body::Bytes,
  extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::ApiError;

/// JSON request body
///
/// Unlike `axum::Json`, no `Content-Type` is required and every failure
/// (unreadable body, malformed JSON, wrong shape) is rejected with the same
/// `Invalid request payload` error.
#[derive(Debug)]
pub struct JsonPayload<T>(pub T);

impl<S, T> FromRequest<S> for JsonPayload<T>
where
  S: Send + Sync,
  T: DeserializeOwned,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let body = Bytes::from_request(req, state).await.map_err(|e| {
      debug!(error = %e, "Failed to read request body");
      ApiError::invalid_payload()
    })?;

    serde_json::from_slice(&body).map(JsonPayload).map_err(|e| {
      debug!(error = %e, body_len = body.len(), "Failed to decode request body");
      ApiError::invalid_payload()
    })
  }
}

//! Response Model Definition
//!
//! Every JSON body, success or error, is pretty-printed with a one-space
//! indent and sent as `application/json; charset=utf-8`.

use axum::{
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Content type of every JSON response
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Body sent when a response cannot be serialized
const SERIALIZATION_FAILURE_BODY: &str = "{\n \"error\": \"Internal Server Error\"\n}";

/// Error body: `{"error": "<message>"}`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
  /// Client-facing message
  pub error: String,
}

/// JSON response with a status code
#[derive(Debug, Clone)]
pub struct PrettyJson<T> {
  /// HTTP status
  pub status: StatusCode,
  /// Body value
  pub value: T,
}

impl<T> PrettyJson<T> {
  /// 200 OK
  pub fn ok(value: T) -> Self {
    Self::with_status(StatusCode::OK, value)
  }

  /// 201 Created
  pub fn created(value: T) -> Self {
    Self::with_status(StatusCode::CREATED, value)
  }

  /// Arbitrary status
  pub fn with_status(status: StatusCode, value: T) -> Self {
    Self { status, value }
  }
}

/// Serializes `value` with a one-space indent
///
/// # Errors
/// Returns the serializer error of `value`
pub fn to_pretty_vec<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
  let mut buf = Vec::with_capacity(128);
  let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
  let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
  value.serialize(&mut serializer)?;
  Ok(buf)
}

fn json_response(status: StatusCode, body: impl Into<axum::body::Body>) -> Response {
  (
    status,
    [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
    body.into(),
  )
    .into_response()
}

impl<T: Serialize> IntoResponse for PrettyJson<T> {
  fn into_response(self) -> Response {
    match to_pretty_vec(&self.value) {
      Ok(body) => json_response(self.status, body),
      Err(e) => {
        error!(error = %e, status = %self.status, "Failed to serialize response body");
        json_response(StatusCode::INTERNAL_SERVER_ERROR, SERIALIZATION_FAILURE_BODY)
      }
    }
  }
}

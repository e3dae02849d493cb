//! API error definitions

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use lexicon::errors::{ConfigError, LexiconError, StoreError, TokenError};

use crate::models::{ErrorEnvelope, PrettyJson};

/// Message returned for undecodable request bodies
pub const INVALID_PAYLOAD_MESSAGE: &str = "Invalid request payload";

/// Message returned in place of internal error details
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Error kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
  /// Request body is not JSON of the expected shape
  InvalidPayload,
  /// Query parameter missing or invalid
  InvalidInput,
  /// Token rejected
  Unauthorized,
  /// Nothing matched the lookup
  NotFound,
  /// Uniqueness constraint violated
  Conflict,
  /// Internal error
  Internal,
  /// Configuration error
  Config,
}

impl ApiErrorKind {
  /// Get error code
  #[must_use]
  pub fn code(&self) -> &'static str {
    match self {
      Self::InvalidPayload => "invalid_payload",
      Self::InvalidInput => "invalid_input",
      Self::Unauthorized => "unauthorized",
      Self::NotFound => "not_found",
      Self::Conflict => "conflict",
      Self::Internal => "internal_error",
      Self::Config => "config_error",
    }
  }

  /// Get HTTP status code
  #[must_use]
  pub fn status(&self) -> StatusCode {
    match self {
      Self::InvalidPayload | Self::InvalidInput => StatusCode::BAD_REQUEST,
      Self::Unauthorized => StatusCode::UNAUTHORIZED,
      Self::NotFound => StatusCode::NOT_FOUND,
      Self::Conflict => StatusCode::CONFLICT,
      Self::Internal | Self::Config => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

/// API error
#[derive(Debug, Error)]
pub enum ApiError {
  /// Request body could not be decoded
  #[error("{}", INVALID_PAYLOAD_MESSAGE)]
  InvalidPayload,

  /// Query parameter missing or invalid
  #[error("invalid input: {0}")]
  InvalidInput(String),

  /// Token rejected
  #[error("unauthorized: {0}")]
  Unauthorized(String),

  /// Nothing matched
  #[error("{0}")]
  NotFound(String),

  /// Uniqueness constraint violated
  #[error("{0}")]
  Conflict(String),

  /// Internal error
  #[error("internal error: {0}")]
  Internal(String),

  /// Configuration error
  #[error("configuration error: {0}")]
  Config(String),
}

impl ApiError {
  /// Get error kind
  #[must_use]
  pub fn kind(&self) -> ApiErrorKind {
    match self {
      Self::InvalidPayload => ApiErrorKind::InvalidPayload,
      Self::InvalidInput(_) => ApiErrorKind::InvalidInput,
      Self::Unauthorized(_) => ApiErrorKind::Unauthorized,
      Self::NotFound(_) => ApiErrorKind::NotFound,
      Self::Conflict(_) => ApiErrorKind::Conflict,
      Self::Internal(_) => ApiErrorKind::Internal,
      Self::Config(_) => ApiErrorKind::Config,
    }
  }

  /// Get error code
  #[must_use]
  pub fn code(&self) -> &'static str {
    self.kind().code()
  }

  /// Get HTTP status code
  #[must_use]
  pub fn status(&self) -> StatusCode {
    self.kind().status()
  }

  /// Message shown to the client.
  ///
  /// Server-side failures are reduced to a generic message; their detail
  /// only goes to the log.
  #[must_use]
  pub fn client_message(&self) -> String {
    match self {
      Self::Internal(_) | Self::Config(_) => INTERNAL_ERROR_MESSAGE.to_string(),
      _ => self.to_string(),
    }
  }

  /// Create undecodable payload error
  #[must_use]
  pub fn invalid_payload() -> Self {
    Self::InvalidPayload
  }

  /// Create invalid input error
  #[must_use]
  pub fn invalid_input(message: impl Into<String>) -> Self {
    Self::InvalidInput(message.into())
  }

  /// Create unauthorized error
  #[must_use]
  pub fn unauthorized(message: impl Into<String>) -> Self {
    Self::Unauthorized(message.into())
  }

  /// Create not found error
  #[must_use]
  pub fn not_found(message: impl Into<String>) -> Self {
    Self::NotFound(message.into())
  }

  /// Create conflict error
  #[must_use]
  pub fn conflict(message: impl Into<String>) -> Self {
    Self::Conflict(message.into())
  }

  /// Create internal error
  #[must_use]
  pub fn internal(message: impl Into<String>) -> Self {
    Self::Internal(message.into())
  }

  /// Create configuration error
  #[must_use]
  pub fn config(message: impl Into<String>) -> Self {
    Self::Config(message.into())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();

    if status.is_server_error() {
      error!(code = self.code(), error = %self, "Request failed");
    } else {
      warn!(code = self.code(), error = %self, "Request rejected");
    }

    let body = ErrorEnvelope {
      error: self.client_message(),
    };

    PrettyJson::with_status(status, body).into_response()
  }
}

/// StoreError -> ApiError
///
/// Only the duplicate-key signal is a client error; everything else is internal.
impl From<StoreError> for ApiError {
  fn from(err: StoreError) -> Self {
    if err.is_duplicate() {
      ApiError::conflict(err.to_string())
    } else {
      ApiError::internal(format!("store error: {err}"))
    }
  }
}

/// TokenError -> ApiError
impl From<TokenError> for ApiError {
  fn from(err: TokenError) -> Self {
    match err {
      TokenError::Signing(_) => ApiError::internal(err.to_string()),
      TokenError::Malformed(_) | TokenError::UnknownKey { .. } | TokenError::Invalid(_) => {
        ApiError::unauthorized(err.to_string())
      }
      // #[non_exhaustive]: fail closed on variants added later
      _ => ApiError::unauthorized(err.to_string()),
    }
  }
}

impl From<ConfigError> for ApiError {
  fn from(err: ConfigError) -> Self {
    ApiError::config(err.to_string())
  }
}

impl From<LexiconError> for ApiError {
  fn from(err: LexiconError) -> Self {
    match err {
      LexiconError::Config(e) => e.into(),
      LexiconError::Store(e) => e.into(),
      LexiconError::Token(e) => e.into(),
      _ => ApiError::internal(format!("unknown error: {err}")),
    }
  }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ApiError>;

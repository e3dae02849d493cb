//! Errors module

mod error_definition;

pub use error_definition::{
  ApiError, ApiErrorKind, INTERNAL_ERROR_MESSAGE, INVALID_PAYLOAD_MESSAGE, Result,
};

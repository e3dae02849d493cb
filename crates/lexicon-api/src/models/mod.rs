//! Model module

mod request;
mod response;

pub use request::{LookupQuery, VerifyQuery};
pub use response::{ErrorEnvelope, JSON_CONTENT_TYPE, PrettyJson, to_pretty_vec};

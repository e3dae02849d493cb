//! models module
pub mod model_definition;

pub use model_definition::{Claims, Credentials, IssuedToken, NewWord, Word};

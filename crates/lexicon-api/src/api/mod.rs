//! API module

mod handlers;
mod payload;
mod routes;
mod state;

pub use handlers::{
  NOT_IMPLEMENTED_BODY, create_word, delete_word, health_check, issue_token, list_words,
  lookup_word, sign_in, update_word, verify_and_lookup, welcome,
};
pub use payload::JsonPayload;
pub use routes::{create_router, run_server};
pub use state::AppState;

//! lexicon-api server entry point

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use lexicon_api::ApiError;
use lexicon_api::api::AppState;
use lexicon_api::api::run_server;
use lexicon_api::config::{Config, DEFAULT_LOG_FILTER};
use lexicon_api::service::DictionaryService;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
  // Logging; RUST_LOG overrides the default filter
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
  tracing_subscriber::registry().with(filter).with(tracing_subscriber::fmt::layer()).init();

  let config = Config::from_env()?;
  tracing::info!(
    bind_addr = %config.bind_addr,
    index_dir = ?config.lexicon.index_dir(),
    key_id = %config.lexicon.token.key_id,
    "Configuration loaded"
  );

  let service = Arc::new(DictionaryService::init(&config)?);
  tracing::info!("Dictionary service initialised");

  let state = AppState::new(config, service);

  run_server(state).await
}

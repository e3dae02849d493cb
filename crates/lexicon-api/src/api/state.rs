//! API State Definition

use std::sync::Arc;

use crate::config::Config;
use crate::service::DictionaryService;

/// Application State
///
/// Cloned into every handler. Holds no globals: the word store lives inside
/// the service and is injected at construction.
#[derive(Clone)]
pub struct AppState {
  /// Configuration
  pub config: Config,
  /// Dictionary service
  ///
  /// - Production: `Arc::new(DictionaryService::init(&config)?)`
  /// - Test: `Arc::new(DictionaryService::new(stub_store, tokens))`
  pub service: Arc<DictionaryService>,
}

impl AppState {
  /// Creates a new AppState
  #[must_use]
  pub fn new(config: Config, service: Arc<DictionaryService>) -> Self {
    Self { config, service }
  }
}

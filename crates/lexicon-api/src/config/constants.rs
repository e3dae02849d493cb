//! API configuration constants

/// Default bind address
///
/// localhost only; set `LEXICON_API_BIND_ADDR` to expose the server.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Default `tracing` filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Bind address, e.g. "0.0.0.0:8080"
pub const ENV_BIND_ADDR: &str = "LEXICON_API_BIND_ADDR";
/// Index directory; unset keeps the index in memory
pub const ENV_INDEX_DIR: &str = "LEXICON_INDEX_DIR";
/// IndexWriter memory budget in bytes
pub const ENV_WRITER_MEMORY_BYTES: &str = "LEXICON_WRITER_MEMORY_BYTES";
/// Token signing secret
pub const ENV_TOKEN_SECRET: &str = "LEXICON_TOKEN_SECRET";
/// Key id of the signing secret
pub const ENV_TOKEN_KEY_ID: &str = "LEXICON_TOKEN_KEY_ID";
/// Retired keys, `kid:secret` pairs separated by commas
pub const ENV_TOKEN_PREVIOUS_KEYS: &str = "LEXICON_TOKEN_PREVIOUS_KEYS";
/// Token lifetime in seconds
pub const ENV_TOKEN_TTL_SECS: &str = "LEXICON_TOKEN_TTL_SECS";

//! Folder-config retrieval: branch-fallback fetching behind a TTL cache.

pub mod cache;
pub mod fetcher;

pub use cache::{CacheStore, ConfigCache, CONFIG_TTL_MS};
pub use fetcher::{ConfigFetchError, ConfigFetcher, ConfigOrigin, FetchedConfig, CONFIG_BRANCHES};

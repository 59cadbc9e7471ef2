//! tmdb_router - a blocking TMDB client with a response cache
//!
//! This library routes requests to the TMDB v3 API, keeps successful
//! responses in a key-value cache and maps payloads into typed movies,
//! TV shows, seasons, genres and search results.
//!
//! # Examples
//!
//! ```no_run
//! use tmdb_router::{MemoryCache, Router, RouterConfig, SearchOptions};
//!
//! let config = RouterConfig::builder()
//!     .api_key("your-api-key")
//!     .language("en-US")
//!     .build()?;
//! let router = Router::new(config, MemoryCache::new())?;
//!
//! let show = router.tv_show_by_id(1399)?;
//! println!("{} ({} seasons)", show.name, show.number_of_seasons);
//!
//! let search = router.search("movie", "Fight Club", &SearchOptions::default())?;
//! for hit in search.hits().take(3) {
//!     println!("{}", hit.item().title);
//! }
//! # Ok::<(), tmdb_router::RouterError>(())
//! ```

mod cache;
mod config;
mod models;
mod router;
mod transport;
mod url_builder;

pub use cache::{CacheError, CacheStore, FileCache, MemoryCache};
pub use config::{DEFAULT_BASE_URL, DEFAULT_LANGUAGE, RouterConfig, RouterConfigBuilder};
pub use models::{
    Configuration, EMPTY_QUERY_CODE, Episode, Genre, GenreList, Genres, INVALID_KIND_CODE,
    ImagesConfiguration, Media, Movie, Search, SearchHit, SearchItem, SearchKind, SearchOptions,
    Season, SeasonSummary, TvShow,
};
pub use router::{CONFIGURATION_CACHE_KEY, GENRE_MOVIE_CACHE_KEY, GENRE_TV_CACHE_KEY, Router};
pub use transport::{HttpTransport, ReqwestTransport};
pub use url_builder::{QueryParams, QueryValue, Segment};

use thiserror::Error;

/// Top-level error type for router operations
#[derive(Debug, Error)]
pub enum RouterError {
    /// A caller-supplied argument violates a precondition
    #[error("{message} (code {code})")]
    InvalidArgument { message: String, code: u32 },

    /// The network call failed or returned an empty or unreadable body
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote API reported a failure in its payload
    #[error("API error: {message}{}", code.map(|c| format!(" (status code {c})")).unwrap_or_default())]
    Domain { message: String, code: Option<i64> },

    /// A payload could not be mapped into the requested type
    #[error("Failed to map API response: {0}")]
    Mapping(#[source] serde_json::Error),

    /// The router could not be configured
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error while opening a cache store
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

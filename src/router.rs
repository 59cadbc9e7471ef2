//! Request router
//!
//! The single point of contact with the catalog API. The router renders
//! request URLs, consults the cache, performs the network call, classifies
//! the response and hands the payload to the typed models.
//!
//! Cache policy:
//!
//! - Every successful fetch is stored under its full rendered URL, which
//!   includes credential and language.
//! - Configuration and genre lookups are additionally stored under fixed
//!   keys ([`CONFIGURATION_CACHE_KEY`], [`GENRE_MOVIE_CACHE_KEY`],
//!   [`GENRE_TV_CACHE_KEY`]) that ignore the language.
//! - Search is always live.
//! - Nothing is written on a failure path, and a failed live call never
//!   falls back to a cached entry.

use crate::RouterError;
use crate::cache::CacheStore;
use crate::config::RouterConfig;
use crate::models::{
    Configuration, EMPTY_QUERY_CODE, GenreList, Genres, Media, Movie, Resolver, Search,
    SearchKind, SearchOptions, Season, TvShow, from_payload,
};
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::url_builder::{QueryParams, Segment, redact_api_key, render_url};
use serde_json::Value;
use tracing::instrument;

/// Fixed cache key for the raw configuration payload.
pub const CONFIGURATION_CACHE_KEY: &str = "configuration";

/// Fixed cache key for the typed movie genre list.
pub const GENRE_MOVIE_CACHE_KEY: &str = "genre_movie";

/// Fixed cache key for the typed TV genre list.
pub const GENRE_TV_CACHE_KEY: &str = "genre_tvshow";

/// Catalog API client with response caching.
#[derive(Debug)]
pub struct Router<C, T = ReqwestTransport> {
    config: RouterConfig,
    cache: C,
    transport: T,
}

impl<C: CacheStore> Router<C, ReqwestTransport> {
    /// Creates a router talking to the network over HTTPS.
    ///
    /// # Errors
    ///
    /// Returns `RouterError::Config` if the HTTP client cannot be built.
    pub fn new(config: RouterConfig, cache: C) -> Result<Self, RouterError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, cache, transport))
    }
}

impl<C: CacheStore, T: HttpTransport> Router<C, T> {
    /// Creates a router with an explicit transport.
    pub fn with_transport(config: RouterConfig, cache: C, transport: T) -> Self {
        Self {
            config,
            cache,
            transport,
        }
    }

    /// Changes the language used by every subsequent request.
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.config.language = language.into();
    }

    /// The language currently sent with each request.
    pub fn language(&self) -> &str {
        &self.config.language
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Renders the full request URL for an endpoint.
    ///
    /// The result has the shape
    /// `{base}/{segments}?api_key={key}&language={lang}&{params}` and is also
    /// the cache key of the request.
    pub fn build_url(&self, segments: &[Segment], params: &QueryParams) -> String {
        render_url(
            &self.config.base_url,
            segments,
            params,
            &self.config.api_key,
            &self.config.language,
        )
    }

    /// Fetches and classifies a payload, consulting the cache first when
    /// `use_cache` is set.
    ///
    /// # Errors
    ///
    /// - `RouterError::Transport` if the call fails, the body is empty or
    ///   it is not JSON.
    /// - `RouterError::Domain` if the payload reports a failure.
    #[instrument(skip_all, fields(url = %redact_api_key(url), use_cache = use_cache))]
    pub fn fetch(&self, url: &str, use_cache: bool) -> Result<Value, RouterError> {
        if use_cache {
            match self.cache.get(url) {
                Ok(Some(payload)) => {
                    tracing::debug!("cache hit");
                    return Ok(payload);
                }
                Ok(None) => tracing::debug!("cache miss"),
                // A broken cache must not prevent the lookup
                Err(e) => tracing::warn!(error = %e, "cache read failed, fetching live"),
            }
        }

        tracing::debug!("TMDB API request");
        let body = self.transport.get(url)?;
        if body.trim().is_empty() {
            return Err(RouterError::Transport("empty response".to_string()));
        }

        let payload: Value = serde_json::from_str(&body)
            .map_err(|e| RouterError::Transport(format!("failed to decode JSON response: {e}")))?;

        check_payload(&payload)?;

        if let Err(e) = self.cache.set(url, &payload) {
            tracing::warn!(error = %e, "cache write failed");
        }

        Ok(payload)
    }

    /// Fetches movie details.
    ///
    /// # Errors
    ///
    /// Fails like [`Router::fetch`], or with `RouterError::Mapping`.
    #[instrument(skip(self))]
    pub fn movie_by_id(&self, id: u64) -> Result<Movie, RouterError> {
        let url = self.build_url(&["movie".into(), id.into()], &QueryParams::new());
        from_payload(self.fetch(&url, true)?)
    }

    /// Fetches TV show details.
    ///
    /// # Errors
    ///
    /// Fails like [`Router::fetch`], or with `RouterError::Mapping`.
    #[instrument(skip(self))]
    pub fn tv_show_by_id(&self, id: u64) -> Result<TvShow, RouterError> {
        let url = self.build_url(&["tv".into(), id.into()], &QueryParams::new());
        from_payload(self.fetch(&url, true)?)
    }

    /// Fetches one season of a TV show, including its episodes.
    ///
    /// # Errors
    ///
    /// Fails like [`Router::fetch`], or with `RouterError::Mapping`.
    #[instrument(skip(self))]
    pub fn season_details(&self, tv_id: u64, season_number: u32) -> Result<Season, RouterError> {
        let url = self.build_url(
            &["tv".into(), tv_id.into(), "season".into(), season_number.into()],
            &QueryParams::new(),
        );
        from_payload(self.fetch(&url, true)?)
    }

    /// Fetches the API configuration.
    ///
    /// Besides the URL-keyed entry written by [`Router::fetch`], the raw
    /// payload is also stored under [`CONFIGURATION_CACHE_KEY`].
    ///
    /// # Errors
    ///
    /// Fails like [`Router::fetch`], or with `RouterError::Mapping`.
    #[instrument(skip(self))]
    pub fn configuration(&self) -> Result<Configuration, RouterError> {
        let url = self.build_url(&["configuration".into()], &QueryParams::new());
        let payload = self.fetch(&url, true)?;

        if let Err(e) = self.cache.set(CONFIGURATION_CACHE_KEY, &payload) {
            tracing::warn!(error = %e, key = CONFIGURATION_CACHE_KEY, "cache write failed");
        }

        from_payload(payload)
    }

    /// Fetches the movie genre list.
    ///
    /// The typed list stored under [`GENRE_MOVIE_CACHE_KEY`] is returned
    /// only when `use_cache` is set; otherwise it is rebuilt from the
    /// payload and stored again.
    ///
    /// # Errors
    ///
    /// Fails like [`Router::fetch`], or with `RouterError::Mapping`.
    #[instrument(skip(self))]
    pub fn genres_movie(&self, use_cache: bool) -> Result<Genres, RouterError> {
        self.genres("genre/movie/list", GENRE_MOVIE_CACHE_KEY, use_cache)
    }

    /// Fetches the TV genre list.
    ///
    /// Unlike [`Router::genres_movie`] there is no flag: a typed list stored
    /// under [`GENRE_TV_CACHE_KEY`] is always preferred.
    ///
    /// # Errors
    ///
    /// Fails like [`Router::fetch`], or with `RouterError::Mapping`.
    #[instrument(skip(self))]
    pub fn genres_tv_show(&self) -> Result<Genres, RouterError> {
        self.genres("genre/tv/list", GENRE_TV_CACHE_KEY, true)
    }

    fn genres(&self, path: &str, key: &str, prefer_cached: bool) -> Result<Genres, RouterError> {
        let url = self.build_url(&[path.into()], &QueryParams::new());
        let payload = self.fetch(&url, true)?;

        if prefer_cached {
            match self.cache.load::<Genres>(key) {
                Ok(Some(genres)) => {
                    tracing::debug!(key, "typed cache hit");
                    return Ok(genres);
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, key, "cache read failed"),
            }
        }

        let genres = from_payload::<GenreList>(payload)?.genres;
        if let Err(e) = self.cache.store(key, &genres) {
            tracing::warn!(error = %e, key, "cache write failed");
        }

        Ok(genres)
    }

    /// Searches movies or TV shows. Always a live call.
    ///
    /// `kind` must be `movie` or `tv`. The returned [`Search`] borrows the
    /// router so each hit can be resolved to its full entity later.
    ///
    /// # Errors
    ///
    /// - `RouterError::InvalidArgument` for an empty query (code 321) or an
    ///   unknown kind (code 320).
    /// - Anything [`Router::fetch`] fails with, or `RouterError::Mapping`.
    #[instrument(skip(self, options))]
    pub fn search(
        &self,
        kind: &str,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Search<'_>, RouterError> {
        if query.is_empty() {
            return Err(RouterError::InvalidArgument {
                message: "Query must not be empty".to_string(),
                code: EMPTY_QUERY_CODE,
            });
        }
        let kind: SearchKind = kind.parse()?;

        let params = QueryParams::new()
            .with("query", query)
            .with("page", options.page)
            .with("include_adult", options.include_adult)
            .with("first_air_date_year", options.first_air_date_year);
        let url = self.build_url(&["search".into(), kind.as_str().into()], &params);
        let payload = self.fetch(&url, false)?;

        let resolver: Box<Resolver<'_>> = match kind {
            SearchKind::Movie => Box::new(move |id: u64| self.movie_by_id(id).map(Media::Movie)),
            SearchKind::Tv => Box::new(move |id: u64| self.tv_show_by_id(id).map(Media::TvShow)),
        };

        Search::new(kind, payload, resolver)
    }
}

/// Classifies a decoded payload as success or remote failure.
///
/// `{"success": <falsy>, ...}` wins over an `errors` list; of the listed
/// errors only the first one is reported.
fn check_payload(payload: &Value) -> Result<(), RouterError> {
    let Value::Object(map) = payload else {
        return match payload {
            Value::Array(_) => Ok(()),
            _ => Err(RouterError::Transport(
                "unexpected response payload".to_string(),
            )),
        };
    };

    if let Some(success) = map.get("success") {
        if is_falsy(success) {
            let message = map
                .get("status_message")
                .map(value_to_message)
                .unwrap_or_else(|| "Unknown API error".to_string());
            return Err(RouterError::Domain {
                message,
                code: map.get("status_code").and_then(Value::as_i64),
            });
        }
    }

    let first_error = match map.get("errors") {
        Some(Value::Array(errors)) => errors.first(),
        Some(Value::Object(errors)) => errors.values().next(),
        _ => None,
    };
    if let Some(error) = first_error {
        return Err(RouterError::Domain {
            message: value_to_message(error),
            code: None,
        });
    }

    Ok(())
}

/// Whether a present `success` value counts as false. `null` does not.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn value_to_message(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

//! Search results with lazily resolved hits.
//!
//! A search payload only carries summaries. Each hit can be hydrated into the
//! full movie or TV show on demand through the resolver the router binds when
//! it builds the [`Search`].

use super::Media;
use crate::RouterError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Resolves a search hit id into its full entity.
pub(crate) type Resolver<'r> = dyn Fn(u64) -> Result<Media, RouterError> + 'r;

/// Error code reported for an empty search query.
pub const EMPTY_QUERY_CODE: u32 = 321;

/// Error code reported for an unsupported search kind.
pub const INVALID_KIND_CODE: u32 = 320;

/// What a search looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    /// `/search/movie`
    Movie,
    /// `/search/tv`
    Tv,
}

impl SearchKind {
    /// The path segment used by the search endpoint.
    pub fn as_str(self) -> &'static str {
        match self {
            SearchKind::Movie => "movie",
            SearchKind::Tv => "tv",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchKind {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(SearchKind::Movie),
            "tv" => Ok(SearchKind::Tv),
            _ => Err(RouterError::InvalidArgument {
                message: format!("invalid search kind '{s}', valid kinds: tv, movie"),
                code: INVALID_KIND_CODE,
            }),
        }
    }
}

/// Optional search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Result page, starting at 1
    pub page: u32,
    /// Include adult titles
    pub include_adult: bool,
    /// Restrict TV results to a first air date year
    pub first_air_date_year: Option<i32>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            page: 1,
            include_adult: false,
            first_air_date_year: None,
        }
    }
}

/// Summary of one search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchItem {
    /// Catalog id used to resolve the full entity
    pub id: u64,
    /// `title` for movies, `name` for TV shows
    pub title: String,
    /// `original_title` or `original_name`
    pub original_title: String,
    pub overview: String,
    /// `release_date` or `first_air_date`
    pub date: Option<String>,
    pub popularity: f64,
    /// The untouched result object
    pub raw: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawItem {
    id: u64,
    title: Option<String>,
    name: Option<String>,
    original_title: Option<String>,
    original_name: Option<String>,
    overview: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
    popularity: f64,
}

impl SearchItem {
    fn from_raw(raw: Value) -> Result<Self, RouterError> {
        let fields: RawItem = serde_json::from_value(raw.clone()).map_err(RouterError::Mapping)?;

        Ok(Self {
            id: fields.id,
            title: fields.title.or(fields.name).unwrap_or_default(),
            original_title: fields
                .original_title
                .or(fields.original_name)
                .unwrap_or_default(),
            overview: fields.overview.unwrap_or_default(),
            date: fields
                .release_date
                .or(fields.first_air_date)
                .filter(|date| !date.is_empty()),
            popularity: fields.popularity,
            raw,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchPage {
    page: u32,
    total_pages: u32,
    total_results: u64,
    results: Vec<Value>,
}

/// One page of search results.
pub struct Search<'r> {
    kind: SearchKind,
    page: u32,
    total_pages: u32,
    total_results: u64,
    items: Vec<SearchItem>,
    resolver: Box<Resolver<'r>>,
}

impl fmt::Debug for Search<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Search")
            .field("kind", &self.kind)
            .field("page", &self.page)
            .field("total_pages", &self.total_pages)
            .field("total_results", &self.total_results)
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl<'r> Search<'r> {
    /// Binds a raw search payload to the resolver for its kind.
    pub(crate) fn new(
        kind: SearchKind,
        payload: Value,
        resolver: Box<Resolver<'r>>,
    ) -> Result<Self, RouterError> {
        let page: SearchPage = serde_json::from_value(payload).map_err(RouterError::Mapping)?;
        let items = page
            .results
            .into_iter()
            .map(SearchItem::from_raw)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            kind,
            page: page.page,
            total_pages: page.total_pages,
            total_results: page.total_results,
            items,
            resolver,
        })
    }

    pub fn kind(&self) -> SearchKind {
        self.kind
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_results(&self) -> u64 {
        self.total_results
    }

    /// The result summaries on this page.
    pub fn items(&self) -> &[SearchItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The hit at `index`.
    pub fn get(&self, index: usize) -> Option<SearchHit<'_, 'r>> {
        self.items.get(index).map(|item| SearchHit {
            item,
            resolver: &*self.resolver,
        })
    }

    /// Iterates over lazy hit handles. Nothing is fetched until
    /// [`SearchHit::resolve`] is called.
    pub fn hits(&self) -> impl Iterator<Item = SearchHit<'_, 'r>> {
        self.items.iter().map(|item| SearchHit {
            item,
            resolver: &*self.resolver,
        })
    }
}

/// A handle to one search result that can fetch the full entity.
#[derive(Clone, Copy)]
pub struct SearchHit<'s, 'r> {
    item: &'s SearchItem,
    resolver: &'s Resolver<'r>,
}

impl fmt::Debug for SearchHit<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchHit")
            .field("item", self.item)
            .finish_non_exhaustive()
    }
}

impl<'s> SearchHit<'s, '_> {
    pub fn item(&self) -> &'s SearchItem {
        self.item
    }

    pub fn id(&self) -> u64 {
        self.item.id
    }

    /// Fetches the full movie or TV show behind this hit.
    ///
    /// # Errors
    ///
    /// Propagates any error of the underlying detail lookup.
    pub fn resolve(&self) -> Result<Media, RouterError> {
        (self.resolver)(self.item.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TvShow;
    use serde_json::json;
    use std::cell::RefCell;

    fn tv_payload() -> Value {
        json!({
            "page": 1,
            "total_pages": 1,
            "total_results": 2,
            "results": [
                {"id": 1399, "name": "Game of Thrones", "first_air_date": "2011-04-17", "popularity": 369.6},
                {"id": 94997, "name": "House of the Dragon", "first_air_date": ""}
            ]
        })
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("movie".parse::<SearchKind>().unwrap(), SearchKind::Movie);
        assert_eq!("tv".parse::<SearchKind>().unwrap(), SearchKind::Tv);

        match "person".parse::<SearchKind>() {
            Err(RouterError::InvalidArgument { code, message }) => {
                assert_eq!(code, INVALID_KIND_CODE);
                assert!(message.contains("person"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_items_are_summarized() {
        let search = Search::new(
            SearchKind::Tv,
            tv_payload(),
            Box::new(|_: u64| -> Result<Media, RouterError> { unreachable!() }),
        )
        .unwrap();

        assert_eq!(search.len(), 2);
        assert_eq!(search.total_results(), 2);
        let first = &search.items()[0];
        assert_eq!(first.title, "Game of Thrones");
        assert_eq!(first.date.as_deref(), Some("2011-04-17"));
        assert_eq!(first.raw["popularity"], json!(369.6));
        assert_eq!(search.items()[1].date, None);
    }

    #[test]
    fn test_hits_resolve_lazily() {
        let calls = RefCell::new(Vec::new());
        let resolver = |id: u64| -> Result<Media, RouterError> {
            calls.borrow_mut().push(id);
            Ok(Media::TvShow(TvShow {
                id,
                ..TvShow::default()
            }))
        };
        let search = Search::new(SearchKind::Tv, tv_payload(), Box::new(resolver)).unwrap();

        let hits: Vec<_> = search.hits().collect();
        assert!(calls.borrow().is_empty());

        let resolved = hits[1].resolve().unwrap();
        assert_eq!(*calls.borrow(), vec![94997]);
        assert!(matches!(resolved, Media::TvShow(ref show) if show.id == 94997));
    }

    #[test]
    fn test_resolver_errors_propagate() {
        let payload = json!({"results": [{"id": 550, "title": "Fight Club"}]});
        let search = Search::new(
            SearchKind::Movie,
            payload,
            Box::new(|_: u64| -> Result<Media, RouterError> {
                Err(RouterError::Transport("empty response".to_string()))
            }),
        )
        .unwrap();

        let hit = search.get(0).unwrap();
        assert_eq!(hit.item().title, "Fight Club");
        assert!(matches!(hit.resolve(), Err(RouterError::Transport(_))));
        assert!(search.get(1).is_none());
    }
}

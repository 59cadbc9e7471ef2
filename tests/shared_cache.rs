//! Routers sharing one file cache behave like separate client processes.

use std::cell::Cell;
use std::rc::Rc;

use tmdb_router::{
    CacheStore, FileCache, HttpTransport, Media, Router, RouterConfig, RouterError,
    SearchOptions, GENRE_TV_CACHE_KEY,
};

/// Serves one fixed body per path prefix and counts calls.
struct CountingTransport {
    calls: Rc<Cell<usize>>,
}

impl HttpTransport for CountingTransport {
    fn get(&self, url: &str) -> Result<String, RouterError> {
        self.calls.set(self.calls.get() + 1);

        let path = url
            .strip_prefix("http://catalog.local/3")
            .and_then(|rest| rest.split('?').next())
            .unwrap_or_default();

        let body = match path {
            "/tv/1399" => r#"{"id":1399,"name":"Game of Thrones","genres":[{"id":10765,"name":"Sci-Fi & Fantasy"},{"id":18,"name":"Drama"}]}"#,
            "/movie/550" => r#"{"id":550,"title":"Fight Club","runtime":139}"#,
            "/genre/tv/list" => r#"{"genres":[{"id":10759,"name":"Action & Adventure"}]}"#,
            "/search/tv" => r#"{"page":1,"total_pages":1,"total_results":1,"results":[{"id":1399,"name":"Game of Thrones"}]}"#,
            "/movie/7" => r#"{"success":false,"status_code":34,"status_message":"The resource you requested could not be found."}"#,
            _ => "",
        };
        Ok(body.to_string())
    }
}

fn router(cache: FileCache, calls: &Rc<Cell<usize>>) -> Router<FileCache, CountingTransport> {
    let config = RouterConfig::builder()
        .api_key("integration")
        .base_url("http://catalog.local/3/")
        .build()
        .unwrap();

    Router::with_transport(
        config,
        cache,
        CountingTransport {
            calls: Rc::clone(calls),
        },
    )
}

#[test]
fn second_router_reuses_entries_written_by_the_first() {
    let dir = tempfile::tempdir().unwrap();
    let calls = Rc::new(Cell::new(0));

    let first = router(FileCache::with_dir(dir.path()).unwrap(), &calls);
    let show = first.tv_show_by_id(1399).unwrap();
    assert_eq!(calls.get(), 1);

    let second = router(FileCache::with_dir(dir.path()).unwrap(), &calls);
    let cached = second.tv_show_by_id(1399).unwrap();

    assert_eq!(calls.get(), 1);
    assert_eq!(show, cached);
    assert_eq!(cached.genres.order_by_id(false).get(0).unwrap().id, 10765);
}

#[test]
fn language_change_misses_url_cache() {
    let dir = tempfile::tempdir().unwrap();
    let calls = Rc::new(Cell::new(0));
    let mut router = router(FileCache::with_dir(dir.path()).unwrap(), &calls);

    router.movie_by_id(550).unwrap();
    router.set_language("de-DE");
    router.movie_by_id(550).unwrap();
    router.movie_by_id(550).unwrap();

    assert_eq!(calls.get(), 2);
}

#[test]
fn tv_genres_come_from_the_fixed_key_on_repeat() {
    let dir = tempfile::tempdir().unwrap();
    let calls = Rc::new(Cell::new(0));
    let router = router(FileCache::with_dir(dir.path()).unwrap(), &calls);

    let first = router.genres_tv_show().unwrap();
    let second = router.genres_tv_show().unwrap();

    assert_eq!(first, second);
    assert_eq!(calls.get(), 1);
    assert!(router.cache().get(GENRE_TV_CACHE_KEY).unwrap().is_some());
}

#[test]
fn search_is_live_and_hits_resolve_through_the_cache() {
    let dir = tempfile::tempdir().unwrap();
    let calls = Rc::new(Cell::new(0));
    let router = router(FileCache::with_dir(dir.path()).unwrap(), &calls);
    router.tv_show_by_id(1399).unwrap();

    let search = router
        .search("tv", "game of thrones", &SearchOptions::default())
        .unwrap();
    let again = router
        .search("tv", "game of thrones", &SearchOptions::default())
        .unwrap();
    assert_eq!(calls.get(), 3);
    assert_eq!(search.len(), again.len());

    // Details were cached by the earlier lookup
    let resolved = search.get(0).unwrap().resolve().unwrap();
    assert_eq!(calls.get(), 3);
    assert!(matches!(resolved, Media::TvShow(ref show) if show.name == "Game of Thrones"));
}

#[test]
fn failures_are_not_cached() {
    let dir = tempfile::tempdir().unwrap();
    let calls = Rc::new(Cell::new(0));
    let router = router(FileCache::with_dir(dir.path()).unwrap(), &calls);

    for _ in 0..2 {
        match router.movie_by_id(7) {
            Err(RouterError::Domain { code, .. }) => assert_eq!(code, Some(34)),
            other => panic!("unexpected result: {other:?}"),
        }
    }
    assert!(matches!(router.tv_show_by_id(2), Err(RouterError::Transport(_))));

    assert_eq!(calls.get(), 3);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

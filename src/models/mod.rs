//! Typed catalog entities.
//!
//! These structures mirror the JSON documents returned by the catalog API.
//! Missing fields fall back to their defaults, so partial payloads still map.

mod configuration;
mod genres;
mod movie;
mod search;
mod tv_show;

pub use configuration::{Configuration, ImagesConfiguration};
pub use genres::{Genre, GenreList, Genres};
pub use movie::Movie;
pub use search::{
    EMPTY_QUERY_CODE, INVALID_KIND_CODE, Search, SearchHit, SearchItem, SearchKind, SearchOptions,
};
pub use tv_show::{Episode, Season, SeasonSummary, TvShow};

pub(crate) use search::Resolver;

use crate::RouterError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A fully resolved search hit.
/// Serialized untagged, as the entity itself. Not deserializable: the
/// lenient entity structs cannot tell a movie from a TV show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Media {
    /// A movie
    Movie(Movie),
    /// A TV show
    TvShow(TvShow),
}

/// Maps a decoded payload into a typed entity.
pub(crate) fn from_payload<T: DeserializeOwned>(payload: Value) -> Result<T, RouterError> {
    serde_json::from_value(payload).map_err(RouterError::Mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_media_serializes_as_the_entity() {
        let show = Media::TvShow(TvShow {
            id: 1399,
            name: "Game of Thrones".to_string(),
            ..TvShow::default()
        });

        let value = serde_json::to_value(&show).unwrap();

        assert_eq!(value["id"], json!(1399));
        assert_eq!(value["name"], json!("Game of Thrones"));
        assert!(value.get("TvShow").is_none());
    }
}

//! Genre collections.

use serde::{Deserialize, Serialize};

/// A single genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// The genre id
    pub id: u64,
    /// The localized genre name
    pub name: String,
}

/// An ordered list of genres.
///
/// Serialized as a plain JSON array, which is also how it appears inside
/// movie and TV show payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genres(Vec<Genre>);

impl Genres {
    /// Creates a genre list.
    pub fn new(genres: Vec<Genre>) -> Self {
        Self(genres)
    }

    /// All genres in their current order.
    pub fn all(&self) -> &[Genre] {
        &self.0
    }

    /// The genre at `index`.
    pub fn get(&self, index: usize) -> Option<&Genre> {
        self.0.get(index)
    }

    /// Looks a genre up by id.
    pub fn find(&self, id: u64) -> Option<&Genre> {
        self.0.iter().find(|genre| genre.id == id)
    }

    /// Returns a copy sorted by id, ascending or descending.
    #[must_use]
    pub fn order_by_id(&self, ascending: bool) -> Self {
        let mut sorted = self.0.clone();
        if ascending {
            sorted.sort_by_key(|genre| genre.id);
        } else {
            sorted.sort_by(|a, b| b.id.cmp(&a.id));
        }
        Self(sorted)
    }

    /// Number of genres.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Genres {
    type Item = &'a Genre;
    type IntoIter = std::slice::Iter<'a, Genre>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Payload of `/genre/{movie|tv}/list`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenreList {
    /// The listed genres
    #[serde(default)]
    pub genres: Genres,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn got_genres() -> Genres {
        serde_json::from_value(json!([
            {"id": 10765, "name": "Sci-Fi & Fantasy"},
            {"id": 18, "name": "Drama"},
            {"id": 10759, "name": "Action & Adventure"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_get_keeps_payload_order() {
        let genres = got_genres();

        assert_eq!(genres.get(0).unwrap().name, "Sci-Fi & Fantasy");
        assert_eq!(genres.len(), 3);
        assert!(genres.get(3).is_none());
    }

    #[test]
    fn test_order_by_id() {
        let genres = got_genres();

        assert_eq!(genres.order_by_id(true).get(0).unwrap().id, 18);
        assert_eq!(genres.order_by_id(false).get(0).unwrap().id, 10765);
        // Original order untouched
        assert_eq!(genres.get(0).unwrap().id, 10765);
    }

    #[test]
    fn test_find_by_id() {
        let genres = got_genres();

        assert_eq!(genres.find(18).unwrap().name, "Drama");
        assert!(genres.find(1).is_none());
    }

    #[test]
    fn test_genre_list_payload() {
        let list: GenreList =
            serde_json::from_value(json!({"genres": [{"id": 28, "name": "Action"}]})).unwrap();

        assert_eq!(list.genres.all().len(), 1);
        assert_eq!(serde_json::to_value(&list.genres).unwrap(), json!([{"id": 28, "name": "Action"}]));
    }
}

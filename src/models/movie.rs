//! Movie details.

use super::Genres;
use serde::{Deserialize, Serialize};

/// Movie details as returned by `/movie/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub original_title: String,
    pub original_language: String,
    pub overview: String,
    /// Release date as `YYYY-MM-DD`, empty when unknown
    pub release_date: String,
    /// Runtime in minutes
    pub runtime: Option<u32>,
    pub genres: Genres,
    pub popularity: f64,
    pub vote_average: f64,
    pub vote_count: u64,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub adult: bool,
    pub imdb_id: Option<String>,
    pub status: Option<String>,
    pub tagline: Option<String>,
}

impl Movie {
    /// Release year parsed from `release_date`.
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.get(..4)?.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::from_payload;
    use serde_json::json;

    #[test]
    fn test_movie_from_payload() {
        let payload = json!({
            "id": 550,
            "title": "Fight Club",
            "original_title": "Fight Club",
            "release_date": "1999-10-15",
            "runtime": 139,
            "genres": [{"id": 18, "name": "Drama"}],
            "vote_average": 8.4,
            "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg"
        });

        let movie: Movie = from_payload(payload).unwrap();

        assert_eq!(movie.id, 550);
        assert_eq!(movie.title, "Fight Club");
        assert_eq!(movie.runtime, Some(139));
        assert_eq!(movie.release_year(), Some(1999));
        assert_eq!(movie.genres.get(0).unwrap().name, "Drama");
        assert!(movie.backdrop_path.is_none());
    }

    #[test]
    fn test_movie_without_release_date() {
        let movie: Movie = from_payload(json!({"id": 1, "release_date": ""})).unwrap();

        assert_eq!(movie.release_year(), None);
    }
}

//! TV shows, their seasons and episodes.

use super::Genres;
use serde::{Deserialize, Serialize};

/// TV show details as returned by `/tv/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TvShow {
    pub id: u64,
    pub name: String,
    pub original_name: String,
    pub original_language: String,
    pub overview: String,
    pub first_air_date: Option<String>,
    pub last_air_date: Option<String>,
    pub number_of_seasons: u32,
    pub number_of_episodes: u32,
    pub genres: Genres,
    pub seasons: Vec<SeasonSummary>,
    /// Typical episode runtimes in minutes
    pub episode_run_time: Vec<u32>,
    pub origin_country: Vec<String>,
    pub status: Option<String>,
    pub popularity: f64,
    pub vote_average: f64,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub in_production: bool,
}

impl TvShow {
    /// Looks up the summary of a season by its number.
    pub fn season(&self, season_number: u32) -> Option<&SeasonSummary> {
        self.seasons
            .iter()
            .find(|season| season.season_number == season_number)
    }
}

/// Season entry embedded in a TV show payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonSummary {
    pub id: u64,
    pub name: String,
    pub season_number: u32,
    pub episode_count: u32,
    pub air_date: Option<String>,
    pub poster_path: Option<String>,
}

/// Season details as returned by `/tv/{id}/season/{number}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Season {
    pub id: u64,
    pub name: String,
    /// Season number (0 for specials)
    pub season_number: u32,
    pub air_date: Option<String>,
    pub overview: String,
    pub poster_path: Option<String>,
    pub episodes: Vec<Episode>,
}

impl Season {
    /// Looks up an episode by its number within the season.
    pub fn episode(&self, episode_number: u32) -> Option<&Episode> {
        self.episodes
            .iter()
            .find(|episode| episode.episode_number == episode_number)
    }
}

/// A single episode of a season.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Episode {
    pub id: u64,
    pub name: String,
    pub episode_number: u32,
    pub season_number: u32,
    pub air_date: Option<String>,
    pub overview: String,
    pub runtime: Option<u32>,
    pub still_path: Option<String>,
    pub vote_average: f64,
}

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier for a movie in the remote catalog (TMDB numeric ID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recommendable catalog entry
///
/// Its position in the catalog vector is its row/column index in the
/// similarity matrix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
}

/// Placeholder image served when a poster is missing or the fetch failed
pub const PLACEHOLDER_POSTER_URL: &str = "https://via.placeholder.com/500x750?text=No+Image";

/// Descriptive metadata for one movie, as returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub poster_url: String,
    pub overview: String,
    pub release_date: String,
    pub rating: String,
    pub trailer_url: Option<String>,
}

impl MovieDetails {
    /// Fixed fallback returned when the remote fetch fails entirely
    pub fn placeholder() -> Self {
        Self {
            poster_url: PLACEHOLDER_POSTER_URL.to_string(),
            overview: "N/A".to_string(),
            release_date: "N/A".to_string(),
            rating: "N/A".to_string(),
            trailer_url: None,
        }
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Raw movie details payload from GET /movie/{id}?append_to_response=videos
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub videos: Option<TmdbVideos>,
}

/// Embedded videos collection
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbVideos {
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

/// A single video entry attached to a movie
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideo {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
}

impl TmdbMovieDetails {
    /// Converts the raw payload into client-facing details
    ///
    /// Missing fields fall back individually; the trailer is the first video
    /// entry hosted on YouTube with type "Trailer".
    pub fn into_details(self, image_base_url: &str) -> MovieDetails {
        let poster_url = match self.poster_path {
            Some(path) => format!("{}{}", image_base_url, path),
            None => PLACEHOLDER_POSTER_URL.to_string(),
        };

        let trailer_url = self
            .videos
            .unwrap_or_default()
            .results
            .into_iter()
            .find(|video| video.video_type == "Trailer" && video.site == "YouTube")
            .map(|video| format!("https://www.youtube.com/embed/{}", video.key));

        MovieDetails {
            poster_url,
            overview: self
                .overview
                .filter(|overview| !overview.is_empty())
                .unwrap_or_else(|| "No description available.".to_string()),
            release_date: self
                .release_date
                .filter(|date| !date.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            rating: self
                .vote_average
                .map(|rating| format!("{:.1}", rating))
                .unwrap_or_else(|| "N/A".to_string()),
            trailer_url,
        }
    }
}

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{Movie, MovieId};
use crate::services::{enrichment, recommender};

use super::AppState;

/// Longest overview returned before truncation kicks in
const MAX_OVERVIEW_CHARS: usize = 400;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub title: String,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    recommender::DEFAULT_TOP_K
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
}

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub id: MovieId,
    pub title: String,
}

impl From<&Movie> for MovieResponse {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub id: MovieId,
    pub title: String,
    pub score: f32,
    pub poster_url: String,
    pub trailer_url: Option<String>,
    pub release_date: String,
    pub rating: String,
    pub overview: String,
}

impl From<enrichment::Recommendation> for RecommendationResponse {
    fn from(recommendation: enrichment::Recommendation) -> Self {
        Self {
            id: recommendation.movie.id,
            title: recommendation.movie.title,
            score: recommendation.score,
            poster_url: recommendation.details.poster_url,
            trailer_url: recommendation.details.trailer_url,
            release_date: recommendation.details.release_date,
            rating: recommendation.details.rating,
            overview: truncate_overview(&recommendation.details.overview),
        }
    }
}

// Handlers

/// Full catalog listing, in matrix order, for the selection control
pub async fn list_titles(State(state): State<AppState>) -> Json<Vec<MovieResponse>> {
    let movies: Vec<MovieResponse> = state.catalog.movies().iter().map(Into::into).collect();
    Json(movies)
}

/// Case-insensitive substring filter over catalog titles
pub async fn search_titles(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<MovieResponse>>> {
    let query = params.q.trim().to_lowercase();
    if query.is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }

    let matches: Vec<MovieResponse> = state
        .catalog
        .movies()
        .iter()
        .filter(|movie| movie.title.to_lowercase().contains(&query))
        .map(Into::into)
        .collect();

    tracing::debug!(query = %params.q, results = matches.len(), "Title search completed");

    Ok(Json(matches))
}

/// Ranks the catalog against the selected title and enriches the top results
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<Vec<RecommendationResponse>>> {
    let ranked = recommender::recommend(&state.catalog, &request.title, request.top_k)?;
    let recommendations = enrichment::enrich(state.provider.as_ref(), ranked).await;

    tracing::info!(
        title = %request.title,
        top_k = request.top_k,
        results = recommendations.len(),
        "Recommendations served"
    );

    Ok(Json(recommendations.into_iter().map(Into::into).collect()))
}

/// Caps an overview at `MAX_OVERVIEW_CHARS` characters, appending an
/// ellipsis when something was cut
fn truncate_overview(overview: &str) -> String {
    if overview.chars().count() <= MAX_OVERVIEW_CHARS {
        return overview.to_string();
    }

    let mut truncated: String = overview.chars().take(MAX_OVERVIEW_CHARS).collect();
    truncated.push_str("...");
    truncated
}

use crate::models::{Movie, MovieDetails};
use crate::services::providers::MetadataProvider;
use crate::services::recommender::RankedMovie;

/// A ranked recommendation joined with its fetched metadata
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub movie: Movie,
    pub score: f32,
    pub details: MovieDetails,
}

/// Joins ranked movies with metadata from the provider
///
/// The per-movie fetches run concurrently; output order follows the ranking.
pub async fn enrich(
    provider: &dyn MetadataProvider,
    ranked: Vec<RankedMovie>,
) -> Vec<Recommendation> {
    let movie_ids = ranked.iter().map(|r| r.movie.id).collect();
    let details = provider.fetch_details_batch(movie_ids).await;

    ranked
        .into_iter()
        .zip(details)
        .map(|(ranked, details)| Recommendation {
            movie: ranked.movie,
            score: ranked.score,
            details,
        })
        .collect()
}

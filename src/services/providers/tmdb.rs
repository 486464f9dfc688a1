/// TMDB metadata provider
///
/// Fetches poster, overview, release date, rating, and trailer data for a
/// movie id from the TMDB API, with an LRU cache in front of the network.
///
/// Transport behavior:
/// - 5 second request timeout
/// - up to 3 attempts on 502/503/504, with linear backoff between attempts
/// - any terminal failure resolves to the placeholder details; callers
///   never see an error
use std::time::Duration;

use reqwest::{Client as HttpClient, StatusCode};

use crate::{
    cache::MetadataCache,
    config::Config,
    error::{AppError, AppResult},
    models::{MovieDetails, MovieId, TmdbMovieDetails},
    services::providers::MetadataProvider,
};

const FETCH_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_ATTEMPTS: u32 = 3;
const RETRY_BACKOFF: Duration = Duration::from_secs(1);
/// Statuses indicating the upstream is transiently unavailable
const RETRYABLE_STATUSES: [StatusCode; 3] = [
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_base_url: String,
    cache: MetadataCache,
}

impl TmdbProvider {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(FETCH_TIMEOUT).build()?;

        Ok(Self {
            http_client,
            api_key: config.tmdb_api_key.clone(),
            api_url: config.tmdb_api_url.clone(),
            image_base_url: config.image_base_url.clone(),
            cache: MetadataCache::new(config.metadata_cache_size),
        })
    }

    /// One fetch against the API, including the retry loop
    async fn try_fetch(&self, movie_id: MovieId) -> AppResult<MovieDetails> {
        let url = format!("{}/movie/{}", self.api_url, movie_id);
        let mut attempt = 1;

        loop {
            let response = self
                .http_client
                .get(&url)
                .query(&[
                    ("api_key", self.api_key.as_str()),
                    ("language", "en-US"),
                    ("append_to_response", "videos"),
                ])
                .send()
                .await?;

            let status = response.status();
            if status.is_success() {
                let payload: TmdbMovieDetails = response.json().await?;
                return Ok(payload.into_details(&self.image_base_url));
            }

            if !RETRYABLE_STATUSES.contains(&status) || attempt >= MAX_ATTEMPTS {
                let body = response.text().await.unwrap_or_default();
                return Err(AppError::ExternalApi(format!(
                    "TMDB returned status {}: {}",
                    status, body
                )));
            }

            tracing::warn!(
                movie_id = %movie_id,
                status = %status,
                attempt,
                "Transient TMDB error, retrying"
            );
            tokio::time::sleep(RETRY_BACKOFF * attempt).await;
            attempt += 1;
        }
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn fetch_details(&self, movie_id: MovieId) -> MovieDetails {
        if let Some(cached) = self.cache.get(movie_id).await {
            return cached;
        }

        match self.try_fetch(movie_id).await {
            Ok(details) => {
                self.cache.insert(movie_id, details.clone()).await;
                tracing::info!(
                    movie_id = %movie_id,
                    provider = self.name(),
                    "Metadata fetched"
                );
                details
            }
            Err(e) => {
                // Placeholders are not cached: the next request should get
                // another chance at the real data.
                tracing::warn!(
                    movie_id = %movie_id,
                    error = %e,
                    "Metadata fetch failed, serving placeholder"
                );
                MovieDetails::placeholder()
            }
        }
    }

    fn clone_for_task(&self) -> Box<dyn MetadataProvider> {
        Box::new(self.clone())
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

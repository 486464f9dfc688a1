/// Movie metadata provider abstraction
///
/// The ranking core produces movie ids; a provider turns them into
/// displayable details (poster, overview, rating, trailer). Providers own
/// their transport concerns: timeout, retry, and caching.
use crate::models::{MovieDetails, MovieId};

pub mod tmdb;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch descriptive metadata for a single movie
    ///
    /// Never fails the caller: any transport problem resolves to the fixed
    /// placeholder details.
    async fn fetch_details(&self, movie_id: MovieId) -> MovieDetails;

    /// Fetch metadata for several movies concurrently
    ///
    /// Default implementation spawns one task per id, bounded by the input
    /// length, and returns results in input order.
    async fn fetch_details_batch(&self, movie_ids: Vec<MovieId>) -> Vec<MovieDetails> {
        let mut tasks = Vec::with_capacity(movie_ids.len());

        for movie_id in movie_ids {
            let provider = self.clone_for_task();
            tasks.push(tokio::spawn(
                async move { provider.fetch_details(movie_id).await },
            ));
        }

        let mut results = Vec::with_capacity(tasks.len());
        for task in tasks {
            match task.await {
                Ok(details) => results.push(details),
                Err(e) => {
                    tracing::error!(error = %e, "Metadata fetch task failed to join");
                    results.push(MovieDetails::placeholder());
                }
            }
        }

        results
    }

    /// Clone provider for parallel task execution
    ///
    /// Required because providers need to be moved into tokio tasks.
    fn clone_for_task(&self) -> Box<dyn MetadataProvider>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal provider that derives details from the id, with a delay that
    /// is longer for earlier ids so ordering cannot come from timing.
    #[derive(Clone)]
    struct EchoProvider;

    #[async_trait::async_trait]
    impl MetadataProvider for EchoProvider {
        async fn fetch_details(&self, movie_id: MovieId) -> MovieDetails {
            let delay = 50u64.saturating_sub(movie_id.0 * 10);
            tokio::time::sleep(tokio::time::Duration::from_millis(delay)).await;
            MovieDetails {
                overview: format!("movie {}", movie_id),
                ..MovieDetails::placeholder()
            }
        }

        fn clone_for_task(&self) -> Box<dyn MetadataProvider> {
            Box::new(self.clone())
        }

        fn name(&self) -> &'static str {
            "echo"
        }
    }

    #[tokio::test]
    async fn test_batch_preserves_input_order() {
        let provider = EchoProvider;
        let details = provider
            .fetch_details_batch(vec![MovieId(1), MovieId(2), MovieId(3)])
            .await;

        let overviews: Vec<&str> = details.iter().map(|d| d.overview.as_str()).collect();
        assert_eq!(overviews, ["movie 1", "movie 2", "movie 3"]);
    }

    #[tokio::test]
    async fn test_batch_empty_input() {
        let provider = EchoProvider;
        let details = provider.fetch_details_batch(vec![]).await;
        assert!(details.is_empty());
    }
}

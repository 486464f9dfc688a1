use std::sync::Arc;

use axum_test::TestServer;
use serde_json::json;

use reelmatch_api::api::{create_router, AppState};
use reelmatch_api::catalog::{Catalog, SimilarityMatrix};
use reelmatch_api::models::{Movie, MovieDetails, MovieId};
use reelmatch_api::services::providers::MetadataProvider;

/// Provider stub that serves canned details without touching the network
#[derive(Clone)]
struct StubProvider;

#[async_trait::async_trait]
impl MetadataProvider for StubProvider {
    async fn fetch_details(&self, movie_id: MovieId) -> MovieDetails {
        MovieDetails {
            poster_url: format!("https://img.test/{}.jpg", movie_id),
            overview: format!("Overview for movie {}", movie_id),
            release_date: "2010-07-16".to_string(),
            rating: "8.2".to_string(),
            trailer_url: None,
        }
    }

    fn clone_for_task(&self) -> Box<dyn MetadataProvider> {
        Box::new(self.clone())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn movie(id: u64, title: &str) -> Movie {
    Movie {
        id: MovieId(id),
        title: title.to_string(),
    }
}

fn create_test_server() -> TestServer {
    let movies = vec![
        movie(1, "The Matrix"),
        movie(2, "Blade Runner"),
        movie(3, "Alien"),
    ];
    let similarity = SimilarityMatrix::new(vec![
        vec![1.0, 0.8, 0.3],
        vec![0.8, 1.0, 0.5],
        vec![0.3, 0.5, 1.0],
    ])
    .unwrap();
    let catalog = Catalog::new(movies, similarity).unwrap();

    let state = AppState::new(catalog, Arc::new(StubProvider));
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_list_titles_in_catalog_order() {
    let server = create_test_server();

    let response = server.get("/api/v1/titles").await;
    response.assert_status_ok();

    let titles: Vec<serde_json::Value> = response.json();
    assert_eq!(titles.len(), 3);
    assert_eq!(titles[0]["title"], "The Matrix");
    assert_eq!(titles[0]["id"], 1);
    assert_eq!(titles[2]["title"], "Alien");
}

#[tokio::test]
async fn test_search_titles_case_insensitive() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/titles/search")
        .add_query_param("q", "matrix")
        .await;
    response.assert_status_ok();

    let titles: Vec<serde_json::Value> = response.json();
    assert_eq!(titles.len(), 1);
    assert_eq!(titles[0]["title"], "The Matrix");
}

#[tokio::test]
async fn test_search_titles_empty_query_is_rejected() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/titles/search")
        .add_query_param("q", "  ")
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommendations_ranked_and_enriched() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "title": "The Matrix",
            "top_k": 2
        }))
        .await;
    response.assert_status_ok();

    let recommendations: Vec<serde_json::Value> = response.json();
    assert_eq!(recommendations.len(), 2);

    // Row for "The Matrix" is [1.0, 0.8, 0.3]: Blade Runner first, then Alien.
    assert_eq!(recommendations[0]["title"], "Blade Runner");
    assert_eq!(recommendations[0]["id"], 2);
    assert_eq!(recommendations[0]["score"], 0.8);
    assert_eq!(recommendations[0]["poster_url"], "https://img.test/2.jpg");
    assert_eq!(recommendations[0]["overview"], "Overview for movie 2");
    assert_eq!(recommendations[0]["rating"], "8.2");

    assert_eq!(recommendations[1]["title"], "Alien");
    assert_eq!(recommendations[1]["score"], 0.3);
}

#[tokio::test]
async fn test_recommendations_default_top_k_clamps_to_catalog() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "The Matrix" }))
        .await;
    response.assert_status_ok();

    // Default top_k is 5, but only two other movies exist; the selection
    // itself never appears.
    let recommendations: Vec<serde_json::Value> = response.json();
    assert_eq!(recommendations.len(), 2);
    assert!(recommendations
        .iter()
        .all(|r| r["title"] != "The Matrix"));
}

#[tokio::test]
async fn test_recommendations_unknown_title_is_not_found() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "Tremors" }))
        .await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Tremors"));
}

#[tokio::test]
async fn test_recommendations_zero_top_k_is_rejected() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "The Matrix", "top_k": 0 }))
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_responses_carry_request_id_header() {
    let server = create_test_server();

    let response = server.get("/health").await;
    let header = response.header("x-request-id");
    assert!(!header.is_empty());
}

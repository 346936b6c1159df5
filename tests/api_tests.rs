use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use mockall::{mock, predicate::eq};
use serde_json::{json, Value};

use cinelog::{
    db::{MovieStore, StoreConfig},
    error::{AppError, AppResult},
    models::{CatalogEntry, Movie},
    routes::{create_router, AppState},
    services::{CatalogClient, Recommender},
};

mock! {
    pub Catalog {}

    #[async_trait]
    impl CatalogClient for Catalog {
        async fn search(&self, query: &str) -> AppResult<Vec<CatalogEntry>>;
        async fn fetch(&self, movie_id: i64) -> AppResult<CatalogEntry>;
        fn name(&self) -> &'static str;
    }
}

mock! {
    pub Ai {}

    #[async_trait]
    impl Recommender for Ai {
        async fn generate(&self, prompt: &str) -> AppResult<String>;
        fn name(&self) -> &'static str;
    }
}

fn entry(id: i64, title: &str, year: Option<&str>) -> CatalogEntry {
    CatalogEntry {
        id,
        title: title.to_string(),
        year: year.map(str::to_string),
        poster_path: Some(format!("https://image.tmdb.org/t/p/w500/{}.jpg", id)),
    }
}

fn movie(id: i64, title: &str, year: Option<&str>, rating: i64) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        year: year.map(str::to_string),
        poster_path: None,
        rating,
    }
}

async fn test_store() -> MovieStore {
    let store = MovieStore::connect(&StoreConfig::in_memory()).await.unwrap();
    store.initialize().await.unwrap();
    store
}

fn create_test_server(store: MovieStore, catalog: MockCatalog, ai: MockAi) -> TestServer {
    let state = AppState {
        store,
        catalog: Arc::new(catalog),
        recommender: Arc::new(ai),
    };
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(test_store().await, MockCatalog::new(), MockAi::new());
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_request_id_echoed() {
    let server = create_test_server(test_store().await, MockCatalog::new(), MockAi::new());

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("trace-me-42"),
        )
        .await;

    assert_eq!(response.header("x-request-id"), "trace-me-42");
}

#[tokio::test]
async fn test_add_movie_resolves_catalog_metadata() {
    let store = test_store().await;
    let mut catalog = MockCatalog::new();
    catalog
        .expect_fetch()
        .with(eq(27205))
        .times(1)
        .returning(|id| Ok(entry(id, "Inception", Some("2010"))));

    let server = create_test_server(store.clone(), catalog, MockAi::new());

    let response = server
        .post("/api/v1/movies")
        .json(&json!({ "movie_id": 27205, "rating": 5 }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["title"], "Inception");
    assert_eq!(created["year"], "2010");
    assert_eq!(created["rating"], 5);

    let stored = store.get_by_id(27205).await.unwrap().unwrap();
    assert_eq!(stored.title, "Inception");
    assert_eq!(
        stored.poster_path.as_deref(),
        Some("https://image.tmdb.org/t/p/w500/27205.jpg")
    );

    let response = server.get("/api/v1/movies/27205").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["rating"], 5);
}

#[tokio::test]
async fn test_add_movie_invalid_rating_skips_catalog() {
    let store = test_store().await;
    let mut catalog = MockCatalog::new();
    catalog.expect_fetch().never();

    let server = create_test_server(store.clone(), catalog, MockAi::new());

    for rating in [0, 6] {
        let response = server
            .post("/api/v1/movies")
            .json(&json!({ "movie_id": 1, "rating": rating }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    assert!(store.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_duplicate_movie_conflicts() {
    let store = test_store().await;
    store.add(&movie(1, "Original", Some("2000"), 2)).await.unwrap();

    let mut catalog = MockCatalog::new();
    catalog
        .expect_fetch()
        .returning(|id| Ok(entry(id, "Renamed", Some("2001"))));

    let server = create_test_server(store.clone(), catalog, MockAi::new());

    let response = server
        .post("/api/v1/movies")
        .json(&json!({ "movie_id": 1, "rating": 5 }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let stored = store.get_by_id(1).await.unwrap().unwrap();
    assert_eq!(stored.title, "Original");
    assert_eq!(stored.rating, 2);
}

#[tokio::test]
async fn test_add_movie_unknown_to_catalog() {
    let mut catalog = MockCatalog::new();
    catalog
        .expect_fetch()
        .returning(|id| Err(AppError::NotFound(format!("Movie {} not found in catalog", id))));

    let server = create_test_server(test_store().await, catalog, MockAi::new());

    let response = server
        .post("/api/v1/movies")
        .json(&json!({ "movie_id": 999, "rating": 3 }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_catalog_outage_is_bad_gateway() {
    let mut catalog = MockCatalog::new();
    catalog
        .expect_fetch()
        .returning(|_| Err(AppError::ExternalApi("TMDb API returned status 503".to_string())));

    let server = create_test_server(test_store().await, catalog, MockAi::new());

    let response = server
        .post("/api/v1/movies")
        .json(&json!({ "movie_id": 5, "rating": 3 }))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_malformed_catalog_metadata_is_bad_gateway() {
    let store = test_store().await;
    let mut catalog = MockCatalog::new();
    catalog
        .expect_fetch()
        .with(eq(10))
        .returning(|id| Ok(entry(id, "   ", Some("2010"))));
    catalog
        .expect_fetch()
        .with(eq(11))
        .returning(|id| Ok(entry(id, "Odd Date", Some("20-1"))));

    let server = create_test_server(store.clone(), catalog, MockAi::new());

    for movie_id in [10, 11] {
        let response = server
            .post("/api/v1/movies")
            .json(&json!({ "movie_id": movie_id, "rating": 4 }))
            .await;
        response.assert_status(StatusCode::BAD_GATEWAY);
    }

    assert!(store.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_missing_movie() {
    let server = create_test_server(test_store().await, MockCatalog::new(), MockAi::new());
    server
        .get("/api/v1/movies/12345")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_movies() {
    let store = test_store().await;
    store.add(&movie(2, "B", None, 3)).await.unwrap();
    store.add(&movie(1, "A", Some("1999"), 4)).await.unwrap();

    let server = create_test_server(store, MockCatalog::new(), MockAi::new());

    let response = server.get("/api/v1/movies").await;
    response.assert_status_ok();
    let movies: Vec<Movie> = response.json();
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].id, 1);
    assert_eq!(movies[1].title, "B");
}

#[tokio::test]
async fn test_remove_movie_is_idempotent() {
    let store = test_store().await;
    store.add(&movie(1, "A", None, 3)).await.unwrap();

    let server = create_test_server(store.clone(), MockCatalog::new(), MockAi::new());

    server
        .delete("/api/v1/movies/1")
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .delete("/api/v1/movies/1")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert_eq!(store.get_by_id(1).await.unwrap(), None);
}

#[tokio::test]
async fn test_update_rating() {
    let store = test_store().await;
    store.add(&movie(1, "A", Some("2020"), 1)).await.unwrap();

    let server = create_test_server(store.clone(), MockCatalog::new(), MockAi::new());

    server
        .put("/api/v1/movies/1/rating")
        .json(&json!({ "rating": 4 }))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let updated = store.get_by_id(1).await.unwrap().unwrap();
    assert_eq!(updated, movie(1, "A", Some("2020"), 4));

    server
        .put("/api/v1/movies/1/rating")
        .json(&json!({ "rating": 9 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .put("/api/v1/movies/77/rating")
        .json(&json!({ "rating": 3 }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    assert_eq!(store.get_by_id(1).await.unwrap().unwrap().rating, 4);
}

#[tokio::test]
async fn test_search_delegates_to_catalog() {
    let mut catalog = MockCatalog::new();
    catalog
        .expect_search()
        .withf(|query: &str| query == "heat")
        .times(1)
        .returning(|_| Ok(vec![entry(949, "Heat", Some("1995")), entry(1, "Heat 2", None)]));

    let server = create_test_server(test_store().await, catalog, MockAi::new());

    let response = server
        .get("/api/v1/search")
        .add_query_param("query", "heat")
        .await;

    response.assert_status_ok();
    let entries: Vec<CatalogEntry> = response.json();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].title, "Heat");
    assert_eq!(entries[1].year, None);
}

#[tokio::test]
async fn test_stats_empty() {
    let server = create_test_server(test_store().await, MockCatalog::new(), MockAi::new());

    let response = server.get("/api/v1/stats").await;
    response.assert_status_ok();

    let stats: Value = response.json();
    assert_eq!(stats["total"], 0);
    assert_eq!(stats["avg_rating"], Value::Null);
    assert_eq!(stats["distribution"], json!({}));
    assert_eq!(stats["avg_year"], Value::Null);
    assert_eq!(stats["most_common_year"], Value::Null);
}

#[tokio::test]
async fn test_stats_scenario() {
    let store = test_store().await;
    store.add(&movie(1, "A", Some("2020"), 5)).await.unwrap();
    store.add(&movie(2, "B", Some("2020"), 3)).await.unwrap();
    store.add(&movie(3, "C", None, 4)).await.unwrap();

    let server = create_test_server(store, MockCatalog::new(), MockAi::new());

    let stats: Value = server.get("/api/v1/stats").await.json();
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["avg_rating"], 4.0);
    assert_eq!(stats["distribution"], json!({ "3": 1, "4": 1, "5": 1 }));
    assert_eq!(stats["avg_year"], 2020);
    assert_eq!(stats["most_common_year"], "2020");
}

#[tokio::test]
async fn test_recommendations() {
    let store = test_store().await;
    store.add(&movie(949, "Heat", Some("1995"), 5)).await.unwrap();

    let mut ai = MockAi::new();
    ai.expect_name().return_const("mock");
    ai.expect_generate()
        .withf(|prompt: &str| prompt.contains("- Heat (1995) rated 5/5"))
        .times(1)
        .returning(|_| Ok("Try Collateral (2004).".to_string()));

    let server = create_test_server(store, MockCatalog::new(), ai);

    let response = server.post("/api/v1/recommendations").await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "recommendations": "Try Collateral (2004)." })
    );
}

#[tokio::test]
async fn test_recommendations_need_movies() {
    let mut ai = MockAi::new();
    ai.expect_name().return_const("mock");
    ai.expect_generate().never();

    let server = create_test_server(test_store().await, MockCatalog::new(), ai);

    server
        .post("/api/v1/recommendations")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

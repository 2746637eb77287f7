//! End-to-end HTTP tests dispatched in-process against `build_router`
//! (spec §6) via `tower::ServiceExt::oneshot`.

#[path = "utils/mod.rs"]
mod utils;

use axum::http::StatusCode;

use utils::harness::{test_app, test_get, test_post};

#[tokio::test]
async fn health_check_returns_ok_without_touching_the_database() {
    let app = test_app();
    let response = test_get(&app, "/health").await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn readiness_check_round_trips_the_source_repository() {
    let app = test_app();
    let response = test_get(&app, "/readyz").await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn create_then_list_sources_round_trips_through_the_registry() {
    let app = test_app();

    let create_body = serde_json::json!({
        "name": "Ministry of Education circulars",
        "base_url": "https://example.test/circulars",
        "dialect": "moe",
        "keywords": ["Circular", " circular ", "notice"],
    });
    let created = test_post(&app, "/web-scraping/sources", &create_body.to_string()).await;
    assert_eq!(created.status, StatusCode::OK);

    let source: govdocs_domain::entities::Source = created.json();
    assert_eq!(source.keywords, vec!["circular".to_string(), "notice".to_string()]);

    let listed = test_get(&app, "/web-scraping/sources").await;
    assert_eq!(listed.status, StatusCode::OK);
    let sources: Vec<govdocs_domain::entities::Source> = listed.json();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].id, source.id);
}

#[tokio::test]
async fn create_source_rejects_a_window_size_larger_than_max_pages() {
    let app = test_app();
    let body = serde_json::json!({
        "name": "oversized window",
        "base_url": "https://example.test",
        "dialect": "generic",
        "max_pages": 2,
        "window_size": 5,
    });
    let response = test_post(&app, "/web-scraping/sources", &body.to_string()).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn compare_documents_rejects_fewer_than_two_ids() {
    let app = test_app();
    let body = serde_json::json!({ "document_ids": [govdocs_domain::value_objects::DocumentId::new()] });
    let response = test_post(&app, "/documents/compare", &body.to_string()).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn document_status_reports_not_found_for_an_unknown_id() {
    let app = test_app();
    let id = govdocs_domain::value_objects::DocumentId::new();
    let response = test_get(&app, &format!("/documents/{id}/status")).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn chat_query_falls_back_to_a_no_results_answer_when_the_retriever_finds_nothing() {
    let app = test_app();
    let body = serde_json::json!({ "question": "What is the attendance policy?" });
    let response = test_post(&app, "/chat/query", &body.to_string()).await;
    assert_eq!(response.status, StatusCode::OK);
    let parsed: serde_json::Value = response.json();
    assert_eq!(parsed["answer"], "No matching documents were found.");
    assert_eq!(parsed["format"], "text");
}

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use snip_cache::MokaCache;
use snip_engine::{ContentHashGenerator, LinkEngine, RandomTokenGenerator};
use snip_gateway::app::App;
use snip_gateway::state::AppState;
use snip_storage::MemoryStore;
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> Router {
    let engine = LinkEngine::new(
        MemoryStore::new(),
        MokaCache::new(),
        RandomTokenGenerator::new(),
    );
    App::router(AppState::new(Arc::new(engine)))
}

fn hash_app() -> Router {
    let engine = LinkEngine::new(
        MemoryStore::new(),
        MokaCache::new(),
        ContentHashGenerator::new(),
    );
    App::router(AppState::new(Arc::new(engine)))
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_link(app: &Router, url: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/v1/links", serde_json::json!({ "url": url })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app();

    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_then_get() {
    let app = test_app();

    let id = create_link(&app, "https://example.com/a").await;
    assert_eq!(id.len(), 5);

    let response = app
        .clone()
        .oneshot(get_request(&format!("/v1/links/{}", id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["url"], "https://example.com/a");
    assert_eq!(body["id"], id.as_str());
}

#[tokio::test]
async fn public_route_redirects_with_307() {
    let app = test_app();

    let id = create_link(&app, "https://example.com/a").await;

    let response = app
        .clone()
        .oneshot(get_request(&format!("/{}", id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "https://example.com/a"
    );
}

#[tokio::test]
async fn missing_id_is_404() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(get_request("/v1/links/nope1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert!(body["error"].is_string());

    let response = app.oneshot(get_request("/nope1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_id_is_400_on_the_api() {
    let app = test_app();

    // Too short to ever be a valid short id.
    let response = app.oneshot(get_request("/v1/links/ab")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_url_is_rejected() {
    let app = test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/v1/links",
            serde_json::json!({ "url": "" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_then_resolve_is_404() {
    let app = test_app();

    let id = create_link(&app, "https://example.com/a").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/v1/links/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(get_request(&format!("/v1/links/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // A second delete finds nothing.
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/v1/links/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_returns_every_link() {
    let app = test_app();

    create_link(&app, "https://example.com/a").await;
    create_link(&app, "https://example.com/b").await;

    let response = app.oneshot(get_request("/v1/links")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn bulk_create_preserves_input_order() {
    let app = test_app();
    let urls = vec![
        "https://example.com/1",
        "https://example.com/2",
        "https://example.com/3",
    ];

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/links/bulk",
            serde_json::json!({ "urls": urls }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let ids = body["ids"].as_array().unwrap().clone();
    assert_eq!(ids.len(), 3);

    for (id, url) in ids.iter().zip(&urls) {
        let response = app
            .clone()
            .oneshot(get_request(&format!("/v1/links/{}", id.as_str().unwrap())))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["url"], *url);
    }
}

#[tokio::test]
async fn bulk_create_rejects_an_empty_batch() {
    let app = test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/v1/links/bulk",
            serde_json::json!({ "urls": [] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bulk_delete_reports_how_many_rows_existed() {
    let app = test_app();

    let id = create_link(&app, "https://example.com/a").await;

    let response = app
        .oneshot(json_request(
            "DELETE",
            "/v1/links/bulk",
            serde_json::json!({ "ids": [id, "zzzz9"] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["removed"], 1);
}

#[tokio::test]
async fn cache_diagnostics_after_create() {
    let app = test_app();

    let id = create_link(&app, "https://example.com/a").await;

    let response = app
        .oneshot(get_request(&format!("/v1/links/{}/cached", id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["cached"], true);
}

#[tokio::test]
async fn hash_strategy_reshorten_returns_the_same_id() {
    let app = hash_app();

    let first = create_link(&app, "https://example.com/a").await;
    let second = create_link(&app, "https://example.com/a").await;

    assert_eq!(first, second);

    let response = app.oneshot(get_request("/v1/links")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

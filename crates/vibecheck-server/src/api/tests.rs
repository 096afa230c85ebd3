use std::collections::HashMap;
use std::env::VarError;

use axum::body::{to_bytes, Body};
use axum::http::Request;
use tower::ServiceExt;
use vibecheck_core::build_app_config;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn test_config(vars: &[(&str, &str)]) -> Arc<AppConfig> {
    let mut map: HashMap<String, String> = HashMap::from([(
        "VIBECHECK_HTTP_TIMEOUT_SECS".to_string(),
        "2".to_string(),
    )]);
    map.extend(vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())));
    let config = build_app_config(|key| map.get(key).cloned().ok_or(VarError::NotPresent))
        .expect("test config should build");
    Arc::new(config)
}

fn test_app(vars: &[(&str, &str)]) -> Router {
    build_app(AppState::from_config(test_config(vars)))
}

fn post_vibecheck(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

async fn json_body(response: Response) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&body).expect("json parse")
}

/// Gemini stand-in that answers every call with prose, forcing fallbacks.
async fn unhelpful_gemini() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "no comment" }] } }]
        })))
        .mount(&server)
        .await;
    server
}

#[test]
fn api_error_bad_request_maps_to_400() {
    let response = ApiError::new("req-1", "bad_request", "nope").into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn api_error_config_error_maps_to_500() {
    let response = ApiError::new("req-1", "config_error", "missing").into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn health_reports_healthy_with_request_id() {
    let response = test_app(&[]).oneshot(get_request("/health")).await.expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    let json = json_body(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn incoming_request_id_is_echoed() {
    let request = Request::builder()
        .uri("/health")
        .header(REQUEST_ID_HEADER, "trace-123")
        .body(Body::empty())
        .expect("request");
    let response = test_app(&[]).oneshot(request).await.expect("response");
    assert_eq!(
        response.headers().get(REQUEST_ID_HEADER).unwrap(),
        "trace-123"
    );
}

#[tokio::test]
async fn root_lists_service_info() {
    let response = test_app(&[]).oneshot(get_request("/")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "Vibe Check AI Backend running");
    assert_eq!(json["version"], "1.0.0");
    assert!(json["endpoints"]
        .as_array()
        .expect("endpoints array")
        .iter()
        .any(|e| e == "/vibecheck/"));
}

#[tokio::test]
async fn instagram_status_without_credentials_is_not_ready() {
    let response = test_app(&[])
        .oneshot(get_request("/instagram-status"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["instagram_business_api"]["page_access_token_configured"], false);
    assert_eq!(json["token_validation"]["valid"], false);
    assert_eq!(
        json["token_validation"]["suggestion"],
        "Add INSTAGRAM_PAGE_ACCESS_TOKEN to .env file"
    );
    assert_eq!(json["overall_status"]["ready"], false);
}

#[tokio::test]
async fn empty_body_is_bad_request() {
    let response = test_app(&[("GEMINI_API_KEY", "k")])
        .oneshot(post_vibecheck("/vibecheck/", ""))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "bad_request");
    assert_eq!(json["error"]["message"], "Provide insta_link");
    assert!(json["meta"]["request_id"].is_string());
}

#[tokio::test]
async fn missing_link_is_bad_request() {
    let response = test_app(&[("GEMINI_API_KEY", "k")])
        .oneshot(post_vibecheck("/vibecheck/", r#"{"max_posts": 3}"#))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_gemini_key_is_server_error() {
    let response = test_app(&[])
        .oneshot(post_vibecheck("/vibecheck/", r#"{"insta_link": "demo_user"}"#))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "config_error");
    assert_eq!(json["error"]["message"], "Gemini API key not configured");
}

#[tokio::test]
async fn demo_user_without_provider_credentials_succeeds() {
    let gemini = unhelpful_gemini().await;
    let gemini_url = gemini.uri();
    let app = test_app(&[
        ("GEMINI_API_KEY", "test-key"),
        ("GEMINI_BASE_URL", gemini_url.as_str()),
    ]);

    // Zero posts keeps the demo image URLs out of the request path.
    let response = app
        .oneshot(post_vibecheck(
            "/vibecheck/",
            r#"{"insta_link": "demo_user", "max_posts": 0}"#,
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["ok"], true);
    assert_eq!(json["scrape"]["source"], "demo");
    assert_eq!(json["scrape"]["handle"], "demo_user");
    assert!(json["memes"].as_array().expect("memes array").is_empty());
    assert!(json["image_analysis"].as_array().expect("image array").is_empty());
    assert_eq!(json["text_analysis"]["style"], "minimal");
    assert_eq!(json["vibe_profile"]["tagline"], "Living life in full color 🌈");
    assert_eq!(
        json["message"],
        "Analysis complete using Instagram API and AI services!"
    );
}

#[tokio::test]
async fn business_posts_run_through_every_stage() {
    let gemini = unhelpful_gemini().await;
    let gemini_url = gemini.uri();

    let graph = MockServer::start().await;
    let graph_url = graph.uri();
    let image_url = format!("{graph_url}/img/1.jpg");
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "1784" })),
        )
        .mount(&graph)
        .await;
    Mock::given(method("GET"))
        .and(path("/1784/media"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{ "caption": "latte art", "media_url": image_url }]
        })))
        .mount(&graph)
        .await;
    Mock::given(method("GET"))
        .and(path("/img/1.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpegbytes".to_vec()))
        .expect(1)
        .mount(&graph)
        .await;

    let app = test_app(&[
        ("GEMINI_API_KEY", "test-key"),
        ("GEMINI_BASE_URL", gemini_url.as_str()),
        ("INSTAGRAM_GRAPH_BASE_URL", graph_url.as_str()),
        ("INSTAGRAM_PAGE_ACCESS_TOKEN", "page-token"),
        ("INSTAGRAM_BUSINESS_ACCOUNT_ID", "1784"),
    ]);
    let response = app
        .oneshot(post_vibecheck("/vibecheck/", r#"{"insta_link": "@latte.lab"}"#))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["scrape"]["source"], "business_api");
    assert_eq!(json["text_analysis"]["dominant_sentiment"], "positive");
    assert_eq!(json["image_analysis"][0]["mood"], "vibrant / aesthetic");
    let memes = json["memes"].as_array().expect("memes array");
    assert_eq!(memes.len(), 1);
    assert_eq!(memes[0]["image_url"], image_url.as_str());
    assert_eq!(memes[0]["original_caption"], "latte art");
}

#[tokio::test]
async fn route_without_trailing_slash_is_accepted() {
    let response = test_app(&[("GEMINI_API_KEY", "k")])
        .oneshot(post_vibecheck("/vibecheck", ""))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

async fn panicking_handler() -> &'static str {
    panic!("model exploded")
}

#[tokio::test]
async fn handler_panic_becomes_error_envelope() {
    let config = test_config(&[]);
    let router = Router::new().route("/boom", get(panicking_handler));
    let response = with_layers(router, &config)
        .oneshot(get_request("/boom"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "internal_error");
    assert_eq!(
        json["error"]["message"],
        "Analysis failed: model exploded. Please check your API configuration."
    );
}

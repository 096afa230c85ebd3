//! Integration tests for `GraphClient` using wiremock HTTP mocks.

use vibecheck_instagram::{GraphClient, InstagramError, TokenCheck};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> GraphClient {
    GraphClient::new(base_url, 5, "vibecheck-test/0.1").expect("client construction should not fail")
}

fn graph_error(code: i64, message: &str) -> serde_json::Value {
    serde_json::json!({
        "error": { "message": message, "type": "OAuthException", "code": code }
    })
}

#[tokio::test]
async fn check_token_returns_identity_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(query_param("fields", "id,name"))
        .and(query_param("access_token", "page-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "id": "1784", "name": "Coffee Page" })),
        )
        .mount(&server)
        .await;

    let check = test_client(&server.uri()).check_token("page-token").await;
    match check {
        TokenCheck::Valid(identity) => {
            assert_eq!(identity.id, "1784");
            assert_eq!(identity.name.as_deref(), Some("Coffee Page"));
        }
        other => panic!("expected valid token, got {other:?}"),
    }
}

#[tokio::test]
async fn check_token_classifies_expired_token_as_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(graph_error(190, "Error validating access token")),
        )
        .mount(&server)
        .await;

    let check = test_client(&server.uri()).check_token("expired").await;
    match check {
        TokenCheck::Invalid(detail) => assert!(detail.contains("Error validating access token")),
        other => panic!("expected invalid token, got {other:?}"),
    }
}

#[tokio::test]
async fn check_token_classifies_missing_permission() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(400).set_body_json(graph_error(200, "Permissions error")))
        .mount(&server)
        .await;

    let check = test_client(&server.uri()).check_token("scoped").await;
    assert!(matches!(check, TokenCheck::PermissionDenied(_)));
}

#[tokio::test]
async fn check_token_treats_server_error_as_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let check = test_client(&server.uri()).check_token("tok").await;
    assert!(matches!(check, TokenCheck::Unreachable(_)));
}

#[tokio::test]
async fn fetch_media_parses_partial_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1784/media"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {
                    "id": "1",
                    "caption": "latte art",
                    "media_type": "IMAGE",
                    "media_url": "https://cdn.example/1.jpg",
                    "permalink": "https://www.instagram.com/p/one/",
                    "like_count": 12
                },
                { "id": "2", "media_type": "VIDEO", "thumbnail_url": "https://cdn.example/2.jpg" }
            ],
            "paging": { "cursors": { "before": "a", "after": "b" } }
        })))
        .mount(&server)
        .await;

    let media = test_client(&server.uri())
        .fetch_media("1784", "tok", 2)
        .await
        .expect("media should parse");

    assert_eq!(media.len(), 2);
    assert_eq!(media[0].caption.as_deref(), Some("latte art"));
    assert_eq!(media[0].like_count, Some(12));
    assert!(media[1].caption.is_none());
    assert_eq!(media[1].thumbnail_url.as_deref(), Some("https://cdn.example/2.jpg"));
}

#[tokio::test]
async fn fetch_app_token_sends_client_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/oauth/access_token"))
        .and(query_param("client_id", "app"))
        .and(query_param("client_secret", "secret"))
        .and(query_param("grant_type", "client_credentials"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "access_token": "app|token", "token_type": "bearer" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let token = test_client(&server.uri())
        .fetch_app_token("app", "secret")
        .await
        .expect("token exchange should succeed");
    assert_eq!(token, "app|token");
}

#[tokio::test]
async fn graph_error_without_envelope_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(401).set_body_string("nope"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_identity("tok")
        .await
        .unwrap_err();
    assert!(matches!(err, InstagramError::Graph { status: 401, code: None, .. }));
    assert!(err.is_token_invalid());
}

#[tokio::test]
async fn error_text_does_not_leak_access_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_identity("super-secret-token")
        .await
        .unwrap_err();
    assert!(matches!(err, InstagramError::Deserialize { .. }));
    assert!(!err.to_string().contains("super-secret-token"));
}

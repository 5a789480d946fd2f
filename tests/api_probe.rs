use serde_json::json;
use tgcast::error::BroadcastError;
use tgcast::services::api_probe::{ProbeOutcome, probe_endpoint};
use tgcast::traits::presenter::NoticeLevel;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn ok_response_is_success_with_pretty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bot123:abc/getMe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": { "id": 42, "username": "cast_bot" }
        })))
        .mount(&server)
        .await;

    let url = format!("{}/bot123:abc/getMe", server.uri());
    let outcome = probe_endpoint(&reqwest::Client::new(), &url).await.unwrap();

    let ProbeOutcome::Succeeded(text) = &outcome else { panic!("expected success, got {:?}", outcome) };
    assert!(text.contains("\"username\": \"cast_bot\""));
    let (level, title, _) = outcome.notice();
    assert_eq!(level, NoticeLevel::Success);
    assert_eq!(title, "API Test Successful");
}

#[tokio::test]
async fn not_ok_response_reports_description() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "ok": false,
            "error_code": 404,
            "description": "Not Found"
        })))
        .mount(&server)
        .await;

    let outcome = probe_endpoint(&reqwest::Client::new(), &format!("{}/botX/nope", server.uri()))
        .await
        .unwrap();

    assert_eq!(outcome, ProbeOutcome::Failed("Not Found".to_string()));
    assert_eq!(
        outcome.notice(),
        (NoticeLevel::Error, "API Test Failed", "Error: Not Found".to_string())
    );
}

#[tokio::test]
async fn non_json_body_is_an_error_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .mount(&server)
        .await;

    let outcome = probe_endpoint(&reqwest::Client::new(), &server.uri()).await.unwrap();

    assert!(matches!(outcome, ProbeOutcome::Errored(_)));
    assert_eq!(outcome.notice().1, "API Test Error");
}

#[tokio::test]
async fn malformed_url_is_an_error_outcome() {
    let outcome = probe_endpoint(&reqwest::Client::new(), "not a url").await.unwrap();
    assert!(matches!(outcome, ProbeOutcome::Errored(_)));
}

#[tokio::test]
async fn blank_url_is_rejected() {
    let err = probe_endpoint(&reqwest::Client::new(), "   ").await.unwrap_err();
    assert!(matches!(err, BroadcastError::MissingEndpoint));
    assert_eq!(err.title(), "Missing Endpoint");
}

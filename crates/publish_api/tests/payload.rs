use base64::{engine::general_purpose, Engine as _};
use publish_api::{PageRequest, PublishApiClient, PublishApiConfig, PublishApiError};
use serde_json::{json, Value};

#[test]
fn page_payload_matches_reference_shape_exactly() {
    let request = PageRequest::page("T", "SPACE", "B");
    let body = serde_json::to_value(&request).expect("serialize payload");

    assert_eq!(
        body,
        json!({
            "type": "page",
            "title": "T",
            "space": { "key": "SPACE" },
            "ancestors": [{ "id": "3564306438" }],
            "body": {
                "storage": {
                    "value": "B",
                    "representation": "storage"
                }
            }
        })
    );
}

#[test]
fn build_request_targets_content_resource_with_basic_auth() {
    let config = PublishApiConfig::new("https://wiki.example.com/", "DOCS")
        .with_credentials("dev@example.com", "token-123");
    let client = PublishApiClient::new(config).expect("client");

    let request = client
        .build_request("Release notes", "<p>hello</p>")
        .expect("build request")
        .build()
        .expect("request");

    assert_eq!(request.method(), "POST");
    assert_eq!(
        request.url().as_str(),
        "https://wiki.example.com/rest/api/content"
    );

    let expected = general_purpose::STANDARD.encode("dev@example.com:token-123");
    assert_eq!(
        request
            .headers()
            .get("authorization")
            .expect("authorization header")
            .to_str()
            .expect("header value"),
        format!("Basic {expected}")
    );

    let body = request_body_json(&request);
    assert_eq!(body["title"], "Release notes");
    assert_eq!(body["space"]["key"], "DOCS");
    assert_eq!(body["body"]["storage"]["value"], "<p>hello</p>");
}

#[test]
fn empty_title_is_rejected_before_any_request_exists() {
    let config = PublishApiConfig::new("https://wiki.example.com", "DOCS")
        .with_credentials("dev@example.com", "token-123");
    let client = PublishApiClient::new(config).expect("client");

    let error = client
        .build_request("   ", "<p>hello</p>")
        .expect_err("blank title should fail preflight");
    assert!(matches!(error, PublishApiError::EmptyTitle));
}

#[tokio::test]
async fn create_page_with_empty_title_performs_no_network_call() {
    // Unroutable base URL: reaching the network at all would fail loudly.
    let config = PublishApiConfig::new("http://127.0.0.1:1", "DOCS")
        .with_credentials("dev@example.com", "token-123");
    let client = PublishApiClient::new(config).expect("client");

    let error = client
        .create_page("", "<p>hello</p>")
        .await
        .expect_err("empty title should abort");
    assert!(matches!(error, PublishApiError::EmptyTitle));
}

#[test]
fn missing_credentials_fail_preflight() {
    let config = PublishApiConfig::new("https://wiki.example.com", "DOCS");
    let client = PublishApiClient::new(config).expect("client");

    let error = client
        .build_request("Release notes", "<p>hello</p>")
        .expect_err("missing credentials should fail preflight");
    assert!(matches!(error, PublishApiError::MissingCredentials));
}

fn request_body_json(request: &reqwest::Request) -> Value {
    let body = request
        .body()
        .expect("request should carry JSON body")
        .as_bytes()
        .expect("JSON body should be buffered bytes");
    serde_json::from_slice::<Value>(body).expect("request body should be valid JSON")
}

use completion_api::payload::{MAX_TOKENS, TEMPERATURE};
use completion_api::prompt::{analysis_messages, conversion_messages, ANALYSIS_DIRECTIVE};
use completion_api::{ChatRequest, CompletionApiClient, CompletionApiConfig, CompletionApiError};
use serde_json::{json, Value};

#[test]
fn payload_serialization_matches_reference_shape() {
    let request = ChatRequest::new("gpt-4o", analysis_messages("const x = 1;"));
    let body = serde_json::to_value(&request).expect("serialize payload");

    assert_eq!(body["model"], Value::String("gpt-4o".to_string()));
    assert_eq!(body["max_tokens"], json!(MAX_TOKENS));
    assert_eq!(body["n"], json!(1));
    assert_eq!(body["temperature"], json!(TEMPERATURE));

    // `stop` must be present and null, not omitted.
    assert!(body.as_object().expect("object body").contains_key("stop"));
    assert!(body["stop"].is_null());

    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], ANALYSIS_DIRECTIVE);
    assert_eq!(body["messages"][1]["role"], "user");
}

#[test]
fn analysis_user_turn_embeds_code_verbatim() {
    let code = "function add(a,b){return a+b;}";
    let messages = analysis_messages(code);

    let user_content = &messages[1].content;
    assert!(user_content.contains(code));

    // Verbatim means no escaping of braces or quotes on the wire either.
    let request = ChatRequest::new("gpt-4o", messages.clone());
    let body = serde_json::to_value(&request).expect("serialize payload");
    let wire_content = body["messages"][1]["content"]
        .as_str()
        .expect("user content is a string");
    assert!(wire_content.contains(code));
}

#[test]
fn build_request_carries_bearer_auth_and_json_body() {
    let config = CompletionApiConfig::new("secret-key");
    let client = CompletionApiClient::new(config).expect("client");

    let request = client
        .build_request(analysis_messages("const x = 1;"))
        .expect("build request")
        .build()
        .expect("request");

    assert_eq!(request.method(), "POST");
    assert_eq!(
        request.url().as_str(),
        "https://api.openai.com/v1/chat/completions"
    );
    assert_eq!(
        request
            .headers()
            .get("authorization")
            .expect("authorization header")
            .to_str()
            .expect("header value"),
        "Bearer secret-key"
    );

    let body = request_body_json(&request);
    assert_eq!(body["messages"].as_array().expect("messages array").len(), 2);
}

#[test]
fn build_request_rejects_missing_api_key() {
    let client = CompletionApiClient::new(CompletionApiConfig::default()).expect("client");

    let error = client
        .build_request(conversion_messages("| a |"))
        .expect_err("empty key should fail preflight");

    assert!(matches!(error, CompletionApiError::MissingApiKey));
}

fn request_body_json(request: &reqwest::Request) -> Value {
    let body = request
        .body()
        .expect("request should carry JSON body")
        .as_bytes()
        .expect("JSON body should be buffered bytes");
    serde_json::from_slice::<Value>(body).expect("request body should be valid JSON")
}

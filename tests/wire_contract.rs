//! Wire-level tests for the extraction client.
//!
//! Uses wiremock to stand in for the extraction backend and the development
//! proxy, so every transport is exercised over real HTTP.

use serde_json::json;
use std::time::Duration;
use ticket_scanner_lib::{
    normalize, ExtractError, ExtractionConfig, FieldKind, FieldValue, RuntimeEnvironment,
    TicketExtractionClient, TransportKind,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SAMPLE_OCR_TEXT: &str = "
Notice to Owner
Lambeth This notice is for a parking contravention
Date of this Notice: 21/11/2022
Penalty Charge Notice: LJ24475960
Vehicle Registration Number: DG66ZXV
On 19/10/2022 a PCN was issued by Civil Enforcement officer LH2316
Contravention Code
12s Parked in a residents' shared use parking
Location: Blakemore Road ()
";

fn ticket_body() -> serde_json::Value {
    json!({
        "ticket_data": {
            "ticket_category": "council",
            "pcn_number": "LJ24475960",
            "car_vrm": "DG66ZXV",
            "contravention_code": "12",
            "contravention_code_suffix": "s",
            "date_of_notice": "2022-11-21",
            "council": "Lambeth",
            "location": "Blakemore Road",
            "ceo_code": "LH2316",
            "geo_lat": 0,
            "geo_lng": 0,
            "car_make": ""
        },
        "source_file": null,
        "extraction_timestamp": "2024-03-02T09:00:00Z",
        "llm_tokens_used": 1210,
        "llm_cost": 0.0031
    })
}

fn expected_request() -> serde_json::Value {
    json!({ "ocr_text": SAMPLE_OCR_TEXT.trim() })
}

fn config(runtime: RuntimeEnvironment, server: &MockServer) -> ExtractionConfig {
    ExtractionConfig::new("test-key")
        .with_runtime(runtime)
        .with_api_url(format!("{}/extract_ticket", server.uri()))
        .with_dev_origin(server.uri())
}

#[tokio::test]
async fn production_posts_to_remote_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/extract_ticket"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("content-type", "application/json"))
        .and(body_json(expected_request()))
        .respond_with(ResponseTemplate::new(200).set_body_json(ticket_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/extract_ticket"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client =
        TicketExtractionClient::new(&config(RuntimeEnvironment::Production, &server)).unwrap();
    assert_eq!(client.transport_kind(), TransportKind::Direct);

    let response = client.extract(SAMPLE_OCR_TEXT).await.unwrap();
    assert_eq!(response.llm_tokens_used, Some(1210));
    assert!(response.extracted_at().is_some());

    let fields = normalize(&response);
    let pcn = fields.iter().find(|f| f.key == "pcn_number").unwrap();
    assert_eq!(pcn.label, "PCN Number");
    assert_eq!(pcn.value, FieldValue::Text("LJ24475960".into()));
    assert_eq!(pcn.kind, FieldKind::Text);
    assert!(fields.iter().all(|f| f.key != "geo_lat" && f.key != "car_make"));
}

#[tokio::test]
async fn development_goes_through_proxy_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/extract_ticket"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ticket_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/extract_ticket"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client =
        TicketExtractionClient::new(&config(RuntimeEnvironment::Development, &server)).unwrap();
    assert_eq!(client.transport_kind(), TransportKind::DevProxy);
    client.extract(SAMPLE_OCR_TEXT).await.unwrap();
}

#[tokio::test]
async fn native_shell_uses_native_transport() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/extract_ticket"))
        .and(body_json(expected_request()))
        .respond_with(ResponseTemplate::new(200).set_body_json(ticket_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/extract_ticket"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client =
        TicketExtractionClient::new(&config(RuntimeEnvironment::NativeShell, &server)).unwrap();
    assert_eq!(client.transport_kind(), TransportKind::NativeHttp);

    let fields = client.extract_display_fields(SAMPLE_OCR_TEXT).await.unwrap();
    assert_eq!(fields.first().map(|f| f.key), Some("ticket_category"));
}

#[tokio::test]
async fn server_error_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/extract_ticket"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        TicketExtractionClient::new(&config(RuntimeEnvironment::Production, &server)).unwrap();
    let err = client.extract(SAMPLE_OCR_TEXT).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(err.is_retryable());
    assert!(err.to_string().contains("model unavailable"));
}

#[tokio::test]
async fn unauthorized_is_extraction_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "detail": "bad token" })))
        .mount(&server)
        .await;

    let client =
        TicketExtractionClient::new(&config(RuntimeEnvironment::Production, &server)).unwrap();
    let err = client.extract(SAMPLE_OCR_TEXT).await.unwrap_err();
    assert!(matches!(err, ExtractError::Extraction { status: Some(401), .. }));
}

#[tokio::test]
async fn native_timeout_is_enforced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ticket_body())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = config(RuntimeEnvironment::NativeShell, &server)
        .with_native_timeout(Duration::from_millis(100));
    let client = TicketExtractionClient::new(&config).unwrap();

    let err = client.extract(SAMPLE_OCR_TEXT).await.unwrap_err();
    assert!(matches!(err, ExtractError::Extraction { status: None, .. }));
    assert!(err.to_string().contains("timed out"), "{}", err);
}

#[tokio::test]
async fn unreachable_host_is_extraction_error() {
    let config = ExtractionConfig::new("test-key")
        .with_runtime(RuntimeEnvironment::Production)
        .with_api_url("http://127.0.0.1:1/extract_ticket");
    let client = TicketExtractionClient::new(&config).unwrap();

    let err = client.extract(SAMPLE_OCR_TEXT).await.unwrap_err();
    assert!(matches!(err, ExtractError::Extraction { status: None, .. }));
}

#[tokio::test]
async fn missing_key_never_reaches_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ticket_body()))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = config(RuntimeEnvironment::Production, &server);
    config.api_key = None;
    let client = TicketExtractionClient::new(&config).unwrap();

    let err = client.extract(SAMPLE_OCR_TEXT).await.unwrap_err();
    assert!(matches!(err, ExtractError::Configuration));
}

use std::sync::Arc;
use std::time::Duration;

use actix_web::{test, web, App};
use async_trait::async_trait;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dpay::{
    HttpPoster, PaymentOutcome, PaymentProcessor, PaymentService, RawPayload,
};
use dpay_gateway::{config::GatewayConfig, error, routes, state::AppState};

/// Canned-outcome processor for exercising the HTTP boundary in isolation.
struct StubProcessor {
    outcome: PaymentOutcome,
}

#[async_trait]
impl PaymentProcessor for StubProcessor {
    async fn process(&self, _raw: &RawPayload) -> PaymentOutcome {
        self.outcome.clone()
    }
}

fn test_config(api_url: &str) -> GatewayConfig {
    GatewayConfig {
        company_code: "DCM12345678".to_string(),
        store_code: "TNP00000001".to_string(),
        authentication_pass: "secret-pass".to_string(),
        payment_api_url: api_url.to_string(),
        request_timeout: Duration::from_secs(5),
        default_billing_token: "9000000248250856006510".to_string(),
        allowed_origins: vec![],
        port: 8080,
    }
}

fn stub_state(outcome: PaymentOutcome) -> web::Data<AppState> {
    web::Data::new(AppState::with_processor(
        test_config("https://settlement.example.com/charge"),
        Arc::new(StubProcessor { outcome }),
    ))
}

/// State wired through the real pipeline (normalize → serialize → reqwest).
fn live_state(api_url: &str) -> web::Data<AppState> {
    let config = test_config(api_url);
    let processor = Arc::new(PaymentService::new(
        Arc::new(HttpPoster::new()),
        config.merchant(),
        config.payment_api_url.clone(),
        config.request_timeout,
    ));
    web::Data::new(AppState::with_processor(config, processor))
}

#[actix_rt::test]
async fn test_health_returns_ok() {
    let app = test::init_service(App::new().configure(routes::health::configure)).await;

    let req = test::TestRequest::get()
        .uri("/api/payment/health")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "status": "ok" }));
}

#[actix_rt::test]
async fn test_root_reports_service_identity() {
    let app = test::init_service(App::new().configure(routes::root::configure)).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["service"], "dpay-gateway");
}

#[actix_rt::test]
async fn test_receive_returns_upstream_body_verbatim() {
    let state = stub_state(PaymentOutcome::succeeded(json!({
        "responseCode": "0000",
        "responseMessage": "Success",
    })));
    let app = test::init_service(
        App::new()
            .app_data(state)
            .configure(routes::payment::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/payment/receive")
        .set_json(json!({
            "data": {
                "billingToken": "9000000248250856006510",
                "paymentInfo": {
                    "amount": 3980,
                    "orderNumber": "TEST12345",
                    "description": "テスト決済",
                }
            }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "responseCode": "0000", "responseMessage": "Success" })
    );
}

#[actix_rt::test]
async fn test_pipeline_failure_maps_to_bad_gateway() {
    let state = stub_state(PaymentOutcome::failed(
        "network error: connection refused",
    ));
    let app = test::init_service(
        App::new()
            .app_data(state)
            .configure(routes::payment::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/payment/receive")
        .set_json(json!({ "data": {} }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 502);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("connection refused"));
}

#[actix_rt::test]
async fn test_missing_data_field_is_unprocessable() {
    let state = stub_state(PaymentOutcome::succeeded(json!({})));
    let app = test::init_service(
        App::new()
            .app_data(state)
            .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
            .configure(routes::payment::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/payment/receive")
        .set_json(json!({ "paymentInfo": { "amount": 3980 } }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 422);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["detail"].is_string());
}

#[actix_rt::test]
async fn test_non_json_body_is_unprocessable() {
    let state = stub_state(PaymentOutcome::succeeded(json!({})));
    let app = test::init_service(
        App::new()
            .app_data(state)
            .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
            .configure(routes::payment::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/payment/receive")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("not json at all")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 422);
}

#[actix_rt::test]
async fn test_full_pipeline_against_mock_settlement_api() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/charge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"responseCode": "0000"})))
        .expect(1)
        .mount(&server)
        .await;

    let state = live_state(&format!("{}/charge", server.uri()));
    let app = test::init_service(
        App::new()
            .app_data(state)
            .configure(routes::payment::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/payment/receive")
        .set_json(json!({
            "data": {
                "paymentInfo": {
                    "amount": 3980,
                    "orderNumber": "TEST12345",
                    "description": "test",
                }
            }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "responseCode": "0000" }));

    // The mock saw the reshaped wire request, not the inbound payload
    let requests = server.received_requests().await.unwrap();
    let sent: serde_json::Value = requests[0].body_json().unwrap();
    assert_eq!(sent["companyCode"], "DCM12345678");
    assert_eq!(sent["execMode"], "000");
    assert_eq!(sent["regiChargeReqList"][0]["settlementAmount"], "3980");
}

#[actix_rt::test]
async fn test_full_pipeline_unreachable_upstream_is_bad_gateway() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let state = live_state(&format!("{}/charge", uri));
    let app = test::init_service(
        App::new()
            .app_data(state)
            .configure(routes::payment::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/payment/receive")
        .set_json(json!({ "data": {} }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 502);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["detail"].as_str().unwrap().contains("network error"));
}

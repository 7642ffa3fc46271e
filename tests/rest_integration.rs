use std::collections::BTreeMap;
use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use wiremock::matchers::{body_string_contains, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bitfinex_api_client::auth::{NonceProvider, StaticCredentials, sign_payload};
use bitfinex_api_client::error::BitfinexError;
use bitfinex_api_client::rest::private::UserTransactionsRequest;
use bitfinex_api_client::rest::{PublicClient, TradingClient};
use rust_decimal::Decimal;

const SECRET: &str = "test_secret";

fn build_client(server: &MockServer) -> TradingClient {
    let credentials = Arc::new(StaticCredentials::new("test_key", SECRET));
    let public = PublicClient::builder().base_url(server.uri()).build().unwrap();
    TradingClient::with_client(public, credentials)
}

struct FixedNonce(u64);

impl NonceProvider for FixedNonce {
    fn next_nonce(&self) -> u64 {
        self.0
    }
}

fn header_str<'a>(request: &'a wiremock::Request, name: &str) -> &'a str {
    request.headers.get(name).unwrap().to_str().unwrap()
}

fn form_fields(request: &wiremock::Request) -> BTreeMap<String, String> {
    serde_urlencoded::from_bytes(&request.body).unwrap()
}

fn payload_envelope(request: &wiremock::Request) -> serde_json::Value {
    let payload = STANDARD.decode(header_str(request, "X-BFX-PAYLOAD")).unwrap();
    serde_json::from_slice(&payload).unwrap()
}

#[tokio::test]
async fn test_get_account_infos() {
    let server = MockServer::start().await;
    let response = serde_json::json!([{
        "maker_fees": "0.1",
        "taker_fees": "0.2",
        "fees": [
            { "pairs": "BTC", "maker_fees": "0.1", "taker_fees": "0.2" },
            { "pairs": "LTC", "maker_fees": "0.0", "taker_fees": "0.1" }
        ]
    }]);

    Mock::given(method("POST"))
        .and(path("/v1/account_infos"))
        .and(header("X-BFX-APIKEY", "test_key"))
        .and(header_exists("X-BFX-PAYLOAD"))
        .and(header_exists("X-BFX-SIGNATURE"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("request=%2Fv1%2Faccount_infos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let infos = client.get_account_infos().await.unwrap();

    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].fees[0].pairs, "BTC");
    assert_eq!(infos[0].fees[1].taker_fees, "0.1".parse::<Decimal>().unwrap());
}

#[tokio::test]
async fn test_user_transactions_parameters() {
    let server = MockServer::start().await;
    let response = serde_json::json!([{
        "usd": "-39.25",
        "datetime": "2013-03-26 18:49:13",
        "fee": "0.20",
        "btc": "0.50000000",
        "type": 2,
        "id": 213642
    }]);

    Mock::given(method("POST"))
        .and(path("/v1/user_transactions"))
        .and(body_string_contains("offset=5"))
        .and(body_string_contains("limit=10"))
        .and(body_string_contains("sort=asc"))
        .and(body_string_contains("request=%2Fv1%2Fuser_transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = UserTransactionsRequest::new(5, 10, false);
    let transactions = client.get_user_transactions(&request).await.unwrap();

    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].id, 213642);
    assert_eq!(
        transactions[0].amount("usd"),
        Some("-39.25".parse::<Decimal>().unwrap())
    );
}

#[tokio::test]
async fn test_get_open_orders() {
    let server = MockServer::start().await;
    let response = serde_json::json!([{
        "id": 448411365,
        "symbol": "btcusd",
        "price": "0.02",
        "side": "buy",
        "is_live": true
    }]);

    Mock::given(method("POST"))
        .and(path("/v1/open_orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let orders = client.get_open_orders().await.unwrap();

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["symbol"], "btcusd");
    assert_eq!(orders[0]["is_live"], true);
}

#[tokio::test]
async fn test_signature_headers_match_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/open_orders"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let client = build_client(&server).with_nonce_provider(Arc::new(FixedNonce(1_700_000_000)));
    client.get_open_orders().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];

    let payload = header_str(request, "X-BFX-PAYLOAD");
    let signature = header_str(request, "X-BFX-SIGNATURE");

    assert_eq!(signature, sign_payload(SECRET.as_bytes(), payload).unwrap());
    assert_eq!(signature.len(), 96);

    let envelope = payload_envelope(request);
    assert_eq!(envelope["nonce"], "1700000000");
    assert_eq!(envelope["request"], "/v1/open_orders");

    let form = form_fields(request);
    assert_eq!(form.len(), 2);
    assert_eq!(form["nonce"], "1700000000");
    assert_eq!(form["request"], "/v1/open_orders");
}

#[tokio::test]
async fn test_form_body_matches_signed_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/user_transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let client = build_client(&server).with_nonce_provider(Arc::new(FixedNonce(1_700_000_001)));
    let request = UserTransactionsRequest::new(5, 10, true);
    client.get_user_transactions(&request).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let envelope = payload_envelope(&requests[0]);
    let form = form_fields(&requests[0]);

    let envelope_fields: BTreeMap<String, String> = envelope
        .as_object()
        .unwrap()
        .iter()
        .map(|(key, value)| {
            let text = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), text)
        })
        .collect();

    assert_eq!(form, envelope_fields);
    assert_eq!(form["sort"], "desc");
    assert_eq!(form["offset"], "5");
}

#[tokio::test]
async fn test_nonces_increase_between_calls() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/open_orders"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    for _ in 0..3 {
        client.get_open_orders().await.unwrap();
    }

    let nonces: Vec<u64> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|request| form_fields(request)["nonce"].parse().unwrap())
        .collect();

    assert_eq!(nonces.len(), 3);
    assert!(nonces.windows(2).all(|pair| pair[1] > pair[0]));
}

#[tokio::test]
async fn test_invalid_nonce_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/account_infos"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "error": "Invalid nonce" })),
        )
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.get_account_infos().await.unwrap_err();

    assert!(err.to_string().contains("Invalid nonce"));
    assert!(!err.is_transport());
    assert!(err.api_error().unwrap().is_invalid_nonce());
}

#[tokio::test]
async fn test_server_error_skips_decoding() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/open_orders"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({ "error": "Invalid nonce" })),
        )
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.get_open_orders().await.unwrap_err();

    assert!(matches!(err, BitfinexError::Status { .. }));
    assert!(err.api_error().is_none());
}

#[tokio::test]
async fn test_signed_post_raw() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/open_orders"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let body = client.signed_post_raw("/v1/open_orders", &()).await.unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_non_object_params_rejected_before_sending() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(0)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client
        .signed_post::<serde_json::Value, _>("/v1/open_orders", &vec![1, 2, 3])
        .await
        .unwrap_err();
    assert!(matches!(err, BitfinexError::InvalidRequest(_)));
}

use dq_client::{AssetPriceFeed, QuoteClient, ReferenceRateFeed};
use dq_core::{AssetSymbol, Config, Error};
use dq_models::{ApplicationForm, ApplicationSubmission};
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> QuoteClient {
  let config = Config {
    price_feed_url: server.uri(),
    rate_feed_url: server.uri(),
    submit_url: Some(format!("{}/applications", server.uri())),
    timeout_secs: 5,
    ..Config::default()
  };
  QuoteClient::new(config).expect("client")
}

#[tokio::test]
async fn test_fetch_btc_price() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/v3/ticker/price"))
    .and(query_param("symbol", "BTCUSDT"))
    .respond_with(
      ResponseTemplate::new(200).set_body_json(json!({"symbol": "BTCUSDT", "price": "50000.00000000"})),
    )
    .expect(1)
    .mount(&server)
    .await;

  let price = client_for(&server).prices().fetch_price(AssetSymbol::Btc).await.unwrap();
  assert_eq!(price, Decimal::from(50000));
}

#[tokio::test]
async fn test_pegged_asset_never_hits_the_network() {
  let server = MockServer::start().await;
  Mock::given(method("GET")).respond_with(ResponseTemplate::new(500)).expect(0).mount(&server).await;

  let price = client_for(&server).prices().fetch_price(AssetSymbol::Usdt).await.unwrap();
  assert_eq!(price, Decimal::ONE);
}

#[tokio::test]
async fn test_ticker_error_status() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/v3/ticker/price"))
    .respond_with(ResponseTemplate::new(400).set_body_json(json!({"code": -1121, "msg": "Invalid symbol."})))
    .mount(&server)
    .await;

  let err = client_for(&server).prices().fetch_price(AssetSymbol::Eth).await.unwrap_err();
  assert!(matches!(err, Error::Status { status: 400, .. }));
}

#[tokio::test]
async fn test_ticker_rate_limited() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/v3/ticker/price"))
    .respond_with(ResponseTemplate::new(429))
    .mount(&server)
    .await;

  let err = client_for(&server).prices().fetch_price(AssetSymbol::Btc).await.unwrap_err();
  assert!(matches!(err, Error::RateLimit(_)));
}

#[tokio::test]
async fn test_ticker_malformed_body() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/v3/ticker/price"))
    .respond_with(ResponseTemplate::new(200).set_body_string("<html>down for maintenance</html>"))
    .mount(&server)
    .await;

  let err = client_for(&server).prices().fetch_price(AssetSymbol::Btc).await.unwrap_err();
  assert!(matches!(err, Error::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_ticker_non_numeric_price() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/v3/ticker/price"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({"symbol": "BTCUSDT", "price": null})))
    .mount(&server)
    .await;

  assert!(client_for(&server).prices().fetch_price(AssetSymbol::Btc).await.is_err());
}

#[tokio::test]
async fn test_fetch_reference_rate() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/v4/latest/USD"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "base": "USD",
      "date": "2026-10-19",
      "rates": {"USD": 1, "JPY": 149.83, "EUR": 0.92}
    })))
    .expect(1)
    .mount(&server)
    .await;

  let rate = client_for(&server).rates().fetch_rate().await.unwrap();
  assert_eq!(rate, Decimal::from_str("149.83").unwrap());
}

#[tokio::test]
async fn test_reference_rate_missing_local_currency() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/v4/latest/USD"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({"base": "USD", "rates": {"EUR": 0.92}})))
    .mount(&server)
    .await;

  let err = client_for(&server).rates().fetch_rate().await.unwrap_err();
  assert!(matches!(err, Error::MissingField(_)));
}

#[tokio::test]
async fn test_submit_application() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/applications"))
    .and(body_partial_json(json!({"assetSymbol": "ETH", "derivedAmount": "1.5", "csid": "CS-1"})))
    .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "app-77"})))
    .expect(1)
    .mount(&server)
    .await;

  let form = ApplicationForm {
    first_name: "Hanako".to_string(),
    last_name: "スズキ".to_string(),
    email: "hanako@example.jp".to_string(),
    phone: "080-0000-0000".to_string(),
    application_type: "individual".to_string(),
    csid: "CS-1".to_string(),
    participant_count: "1".to_string(),
    crypto_type: "ETH".to_string(),
    amount: "675000".to_string(),
  };
  let payload = ApplicationSubmission::from_form(
    &form,
    AssetSymbol::Eth,
    Decimal::from(675000),
    Decimal::from_str("1.5").unwrap(),
    chrono::Utc::now(),
  )
  .unwrap();

  let receipt = client_for(&server).submissions().unwrap().submit(&payload).await.unwrap();
  assert_eq!(receipt.id.as_deref(), Some("app-77"));
}

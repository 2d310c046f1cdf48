use async_trait::async_trait;
use dq_client::{AssetPriceFeed, ReferenceRateFeed};
use dq_core::{AssetSymbol, Error, RefreshPolicy, Result};
use dq_tracker::{
  CalcError, ConversionTracker, Notice, Notifier, RefreshPhase, TrackerSettings,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

fn dec(s: &str) -> Decimal {
  Decimal::from_str(s).unwrap()
}

#[derive(Default)]
struct FakePrices {
  prices: Mutex<HashMap<AssetSymbol, Decimal>>,
  calls: Mutex<Vec<AssetSymbol>>,
  failing: AtomicBool,
  delay: Option<Duration>,
}

impl FakePrices {
  fn new() -> Self {
    let prices = HashMap::from([
      (AssetSymbol::Btc, Decimal::from(50000)),
      (AssetSymbol::Eth, Decimal::from(3000)),
      (AssetSymbol::Usdt, Decimal::ONE),
    ]);
    Self { prices: Mutex::new(prices), ..Self::default() }
  }

  fn delayed(delay: Duration) -> Self {
    Self { delay: Some(delay), ..Self::new() }
  }

  fn calls(&self) -> Vec<AssetSymbol> {
    self.calls.lock().unwrap().clone()
  }

  fn set_price(&self, symbol: AssetSymbol, price: Decimal) {
    self.prices.lock().unwrap().insert(symbol, price);
  }
}

#[async_trait]
impl AssetPriceFeed for FakePrices {
  async fn fetch_price(&self, symbol: AssetSymbol) -> Result<Decimal> {
    self.calls.lock().unwrap().push(symbol);
    if let Some(delay) = self.delay {
      sleep(delay).await;
    }
    if self.failing.load(Ordering::SeqCst) {
      return Err(Error::Status { status: 503, url: "fake://prices".to_string() });
    }
    self
      .prices
      .lock()
      .unwrap()
      .get(&symbol)
      .copied()
      .ok_or_else(|| Error::invalid_response("fake", "no price"))
  }

  fn source_name(&self) -> &'static str {
    "fake-prices"
  }
}

struct FakeRates {
  rate: Mutex<Decimal>,
  calls: AtomicUsize,
  failing: AtomicBool,
  delay: Option<Duration>,
}

impl FakeRates {
  fn new(rate: &str) -> Self {
    Self {
      rate: Mutex::new(dec(rate)),
      calls: AtomicUsize::new(0),
      failing: AtomicBool::new(false),
      delay: None,
    }
  }

  fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl ReferenceRateFeed for FakeRates {
  async fn fetch_rate(&self) -> Result<Decimal> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    if let Some(delay) = self.delay {
      sleep(delay).await;
    }
    if self.failing.load(Ordering::SeqCst) {
      return Err(Error::MissingField("rates.JPY".to_string()));
    }
    Ok(*self.rate.lock().unwrap())
  }

  fn source_name(&self) -> &'static str {
    "fake-rates"
  }
}

#[derive(Default)]
struct RecordingNotifier {
  notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
  fn notices(&self) -> Vec<Notice> {
    self.notices.lock().unwrap().clone()
  }
}

impl Notifier for RecordingNotifier {
  fn notify(&self, notice: &Notice) {
    self.notices.lock().unwrap().push(notice.clone());
  }
}

struct Harness {
  prices: Arc<FakePrices>,
  rates: Arc<FakeRates>,
  notices: Arc<RecordingNotifier>,
  tracker: ConversionTracker,
}

fn harness_with(prices: FakePrices, rates: FakeRates, settings: TrackerSettings) -> Harness {
  let prices = Arc::new(prices);
  let rates = Arc::new(rates);
  let notices = Arc::new(RecordingNotifier::default());
  let tracker =
    ConversionTracker::with_notifier(prices.clone(), rates.clone(), settings, notices.clone());
  Harness { prices, rates, notices, tracker }
}

fn harness() -> Harness {
  harness_with(FakePrices::new(), FakeRates::new("150"), TrackerSettings::default())
}

// --- conversion scenarios ---

#[tokio::test]
async fn test_btc_quote() {
  let h = harness();
  assert!(h.tracker.refresh_asset_price().await);
  assert!(h.tracker.refresh_reference_rate().await);
  h.tracker.set_local_amount("750000").await;

  let quote = h.tracker.calculate().await.unwrap();
  assert_eq!(quote.derived_amount, dec("0.1"));
  assert_eq!(h.tracker.quote_line().await.as_deref(), Some("750000 円 = 0.1 BTC"));
  assert_eq!(h.tracker.rate_line().await, "1 BTC = ¥7500000");
}

#[tokio::test]
async fn test_ltc_selector_quotes_pegged_asset() {
  let h = harness();
  h.tracker.select_asset_str("LTC").await;
  assert!(h.tracker.refresh_reference_rate().await);
  h.tracker.set_local_amount("15000").await;

  let quote = h.tracker.calculate().await.unwrap();
  assert_eq!(quote.symbol, AssetSymbol::Usdt);
  assert_eq!(quote.derived_amount, dec("100"));
  assert_eq!(h.tracker.quote_line().await.as_deref(), Some("15000 円 = 100 USDT"));
}

#[tokio::test]
async fn test_unknown_selector_falls_back_to_btc() {
  let h = harness();
  h.tracker.select_asset(AssetSymbol::Eth).await;
  h.tracker.select_asset_str("DOGE").await;
  assert_eq!(h.tracker.snapshot().await.symbol, AssetSymbol::Btc);
}

#[tokio::test]
async fn test_invalid_amount_keeps_previous_quote() {
  let h = harness();
  h.tracker.refresh_asset_price().await;
  h.tracker.refresh_reference_rate().await;
  h.tracker.set_local_amount("750000").await;
  let first = h.tracker.calculate().await.unwrap();

  h.tracker.set_local_amount("").await;
  assert_eq!(h.tracker.calculate().await, Err(CalcError::EmptyAmount));

  h.tracker.set_local_amount("abc").await;
  assert_eq!(h.tracker.calculate().await, Err(CalcError::InvalidAmount("abc".to_string())));

  assert_eq!(h.tracker.snapshot().await.quote, Some(first));
  assert_eq!(
    h.notices.notices(),
    vec![
      Notice::Validation("Enter a deposit amount".to_string()),
      Notice::Validation("Deposit amount 'abc' is not a number".to_string()),
    ]
  );
}

#[tokio::test]
async fn test_missing_rate_is_not_ready() {
  let h = harness();
  h.tracker.refresh_asset_price().await;
  h.tracker.set_local_amount("750000").await;

  assert_eq!(h.tracker.calculate().await, Err(CalcError::RateNotReady));
  assert!(h.tracker.snapshot().await.quote.is_none());
}

#[tokio::test]
async fn test_missing_price_is_not_ready() {
  let h = harness();
  h.tracker.refresh_reference_rate().await;
  h.tracker.set_local_amount("750000").await;

  assert_eq!(h.tracker.calculate().await, Err(CalcError::PriceNotReady(AssetSymbol::Btc)));
}

#[tokio::test]
async fn test_select_resets_quote_and_refetches() {
  let h = harness();
  h.tracker.refresh_asset_price().await;
  h.tracker.refresh_reference_rate().await;
  h.tracker.set_local_amount("750000").await;
  h.tracker.calculate().await.unwrap();

  h.tracker.select_asset(AssetSymbol::Eth).await;

  let state = h.tracker.snapshot().await;
  assert!(state.quote.is_none());
  assert_eq!(state.asset_price, Decimal::from(3000));
  assert_eq!(h.prices.calls(), vec![AssetSymbol::Btc, AssetSymbol::Eth]);

  let quote = h.tracker.calculate().await.unwrap();
  assert_eq!(quote.derived_amount, dec("1.66666667"));
}

#[tokio::test]
async fn test_failed_refresh_keeps_last_price() {
  let h = harness();
  assert!(h.tracker.refresh_asset_price().await);

  h.prices.set_price(AssetSymbol::Btc, Decimal::from(60000));
  h.prices.failing.store(true, Ordering::SeqCst);
  assert!(!h.tracker.refresh_asset_price().await);

  let state = h.tracker.snapshot().await;
  assert_eq!(state.asset_price, Decimal::from(50000));
  assert_eq!(state.price_phase, RefreshPhase::Ready);
  assert!(matches!(
    h.notices.notices().as_slice(),
    [Notice::StaleFeed { feed: "asset price", .. }]
  ));
}

#[tokio::test]
async fn test_failed_first_rate_refresh_returns_to_idle() {
  let h = harness();
  h.rates.failing.store(true, Ordering::SeqCst);
  assert!(!h.tracker.refresh_reference_rate().await);

  let state = h.tracker.snapshot().await;
  assert_eq!(state.reference_rate, Decimal::ZERO);
  assert_eq!(state.rate_phase, RefreshPhase::Idle);
  assert_eq!(state.last_refresh_label(), "--:--:--");
}

#[tokio::test]
async fn test_feed_values_rounded_to_whole_units_by_default() {
  let h = harness_with(FakePrices::new(), FakeRates::new("149.83"), TrackerSettings::default());
  h.tracker.refresh_reference_rate().await;
  assert_eq!(h.tracker.snapshot().await.reference_rate, Decimal::from(150));

  let raw = TrackerSettings { feed_decimals: None, ..TrackerSettings::default() };
  let h = harness_with(FakePrices::new(), FakeRates::new("149.83"), raw);
  h.tracker.refresh_reference_rate().await;
  assert_eq!(h.tracker.snapshot().await.reference_rate, dec("149.83"));
}

#[tokio::test]
async fn test_sub_unit_rate_is_kept() {
  let settings = TrackerSettings { local_currency: "KWD".to_string(), ..TrackerSettings::default() };
  let h = harness_with(FakePrices::new(), FakeRates::new("0.307"), settings);
  assert!(h.tracker.refresh_reference_rate().await);
  assert!(h.tracker.refresh_asset_price().await);

  let state = h.tracker.snapshot().await;
  assert_eq!(state.reference_rate, dec("0.307"));
  assert_eq!(state.rate_phase, RefreshPhase::Ready);

  h.tracker.set_local_amount("3070").await;
  let quote = h.tracker.calculate().await.unwrap();
  assert_eq!(quote.derived_amount, dec("0.2"));
}

#[tokio::test]
async fn test_zero_rate_is_a_failed_refresh() {
  let h = harness();
  assert!(h.tracker.refresh_reference_rate().await);

  *h.rates.rate.lock().unwrap() = Decimal::ZERO;
  assert!(!h.tracker.refresh_reference_rate().await);

  let state = h.tracker.snapshot().await;
  assert_eq!(state.reference_rate, Decimal::from(150));
  assert_eq!(state.rate_phase, RefreshPhase::Ready);
  assert!(matches!(
    h.notices.notices().as_slice(),
    [Notice::StaleFeed { feed: "reference rate", .. }]
  ));
}

#[tokio::test]
async fn test_zero_first_price_leaves_price_unset() {
  let h = harness();
  h.prices.set_price(AssetSymbol::Btc, Decimal::ZERO);
  assert!(!h.tracker.refresh_asset_price().await);

  let state = h.tracker.snapshot().await;
  assert!(!state.price_ready);
  assert_eq!(state.price_phase, RefreshPhase::Idle);
}

#[tokio::test]
async fn test_subscribers_see_updates() {
  let h = harness();
  let mut updates = h.tracker.subscribe();

  h.tracker.refresh_asset_price().await;
  assert!(updates.has_changed().unwrap());
  let state = updates.borrow_and_update().clone();
  assert!(state.price_ready);
  assert_eq!(state.asset_price, Decimal::from(50000));
}

// --- polling lifecycle ---

#[tokio::test(start_paused = true)]
async fn test_price_polls_on_interval() {
  let h = harness();
  h.tracker.activate().await;
  sleep(Duration::from_secs(25)).await;

  assert_eq!(h.prices.calls().len(), 3);
  assert_eq!(h.rates.calls(), 1);
  assert!(h.tracker.snapshot().await.price_ready);
}

#[tokio::test(start_paused = true)]
async fn test_activate_twice_is_noop() {
  let h = harness();
  h.tracker.activate().await;
  h.tracker.activate().await;
  sleep(Duration::from_secs(5)).await;

  assert_eq!(h.prices.calls().len(), 1);
  assert_eq!(h.rates.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_periodic_rate_refresh() {
  let settings = TrackerSettings {
    rate_refresh: RefreshPolicy::Every(Duration::from_secs(30)),
    ..TrackerSettings::default()
  };
  let h = harness_with(FakePrices::new(), FakeRates::new("150"), settings);
  h.tracker.activate().await;
  sleep(Duration::from_secs(65)).await;

  assert_eq!(h.rates.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_select_restarts_poll_for_new_asset() {
  let h = harness();
  h.tracker.activate().await;
  sleep(Duration::from_secs(5)).await;

  h.tracker.select_asset(AssetSymbol::Eth).await;
  sleep(Duration::from_secs(21)).await;

  assert_eq!(
    h.prices.calls(),
    vec![AssetSymbol::Btc, AssetSymbol::Eth, AssetSymbol::Eth, AssetSymbol::Eth]
  );
  assert_eq!(h.tracker.snapshot().await.asset_price, Decimal::from(3000));
}

#[tokio::test(start_paused = true)]
async fn test_deactivate_stops_fetching() {
  let h = harness();
  h.tracker.activate().await;
  sleep(Duration::from_secs(15)).await;
  assert_eq!(h.prices.calls().len(), 2);

  h.tracker.deactivate().await;
  assert!(!h.tracker.is_active().await);
  sleep(Duration::from_secs(60)).await;

  assert_eq!(h.prices.calls().len(), 2);
  assert_eq!(h.rates.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_can_reactivate_after_deactivate() {
  let h = harness();
  h.tracker.activate().await;
  sleep(Duration::from_secs(1)).await;
  h.tracker.deactivate().await;

  h.tracker.activate().await;
  sleep(Duration::from_secs(1)).await;

  assert_eq!(h.prices.calls().len(), 2);
  assert_eq!(h.rates.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_in_flight_poll_discarded_on_deactivate() {
  let h = harness_with(
    FakePrices::delayed(Duration::from_secs(5)),
    FakeRates::new("150"),
    TrackerSettings::default(),
  );
  h.tracker.activate().await;
  sleep(Duration::from_secs(1)).await;
  assert_eq!(h.prices.calls().len(), 1);

  h.tracker.deactivate().await;
  sleep(Duration::from_secs(60)).await;

  let state = h.tracker.snapshot().await;
  assert!(!state.price_ready);
  assert_eq!(state.price_phase, RefreshPhase::Idle);
  assert_eq!(state.rate_phase, RefreshPhase::Ready);
}

#[tokio::test(start_paused = true)]
async fn test_deactivate_mid_fetch_keeps_ready_phase() {
  let h = harness_with(
    FakePrices::delayed(Duration::from_secs(5)),
    FakeRates::new("150"),
    TrackerSettings::default(),
  );
  h.tracker.activate().await;
  sleep(Duration::from_secs(12)).await;
  assert_eq!(h.tracker.snapshot().await.price_phase, RefreshPhase::Loading);

  h.tracker.deactivate().await;

  let state = h.tracker.snapshot().await;
  assert_eq!(state.price_phase, RefreshPhase::Ready);
  assert_eq!(state.asset_price, Decimal::from(50000));
}

#[tokio::test(start_paused = true)]
async fn test_late_result_after_teardown_is_discarded() {
  let h = harness_with(
    FakePrices::delayed(Duration::from_secs(5)),
    FakeRates::new("150"),
    TrackerSettings::default(),
  );

  let (applied, _) = tokio::join!(h.tracker.refresh_asset_price(), async {
    sleep(Duration::from_secs(1)).await;
    h.tracker.deactivate().await;
  });

  assert!(!applied);
  let state = h.tracker.snapshot().await;
  assert!(!state.price_ready);
  assert_eq!(state.price_phase, RefreshPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_late_result_for_previous_asset_is_discarded() {
  let h = harness_with(
    FakePrices::delayed(Duration::from_secs(5)),
    FakeRates::new("150"),
    TrackerSettings::default(),
  );

  let (applied, _) = tokio::join!(h.tracker.refresh_asset_price(), async {
    sleep(Duration::from_secs(1)).await;
    h.tracker.select_asset(AssetSymbol::Eth).await;
  });

  assert!(!applied);
  let state = h.tracker.snapshot().await;
  assert_eq!(state.symbol, AssetSymbol::Eth);
  assert_eq!(state.asset_price, Decimal::from(3000));
}

#[tokio::test(start_paused = true)]
async fn test_dropping_tracker_stops_polls() {
  let h = harness();
  let prices = h.prices.clone();
  h.tracker.activate().await;
  sleep(Duration::from_secs(1)).await;
  drop(h);

  sleep(Duration::from_secs(60)).await;
  assert_eq!(prices.calls().len(), 1);
}

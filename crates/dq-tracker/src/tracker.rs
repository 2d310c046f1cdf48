/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-dot-]browne[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! The conversion tracker: shared state, feed refreshes and polling lifecycle

use crate::calc::{Quote, convert, normalize_feed_value};
use crate::error::CalcResult;
use crate::notify::{Notice, Notifier, TracingNotifier};
use crate::poller::{PollHandle, spawn_price_poll, spawn_rate_refresh};
use crate::state::TrackerState;
use chrono::Local;
use dq_client::{AssetPriceFeed, ReferenceRateFeed};
use dq_core::{AssetSymbol, Config, Error, RefreshPolicy, RoundingPolicy};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock, watch};
use tracing::{debug, info, warn};

const PRICE_FEED: &str = "asset price";
const RATE_FEED: &str = "reference rate";

/// Tracker behaviour that does not change while it runs
#[derive(Debug, Clone)]
pub struct TrackerSettings {
  /// Asset selected when the tracker is created
  pub asset: AssetSymbol,
  pub price_poll: Duration,
  pub rate_refresh: RefreshPolicy,
  pub rounding: RoundingPolicy,
  /// Decimal places kept from feed quotes; `None` keeps them as received
  pub feed_decimals: Option<u32>,
  pub local_currency: String,
}

impl TrackerSettings {
  pub fn from_config(config: &Config) -> Self {
    Self {
      asset: AssetSymbol::default(),
      price_poll: config.price_poll_interval(),
      rate_refresh: config.rate_refresh,
      rounding: config.rounding.clone(),
      feed_decimals: config.feed_decimals,
      local_currency: config.local_currency.clone(),
    }
  }
}

impl Default for TrackerSettings {
  fn default() -> Self {
    Self::from_config(&Config::default())
  }
}

/// State and collaborators shared with the polling tasks
pub(crate) struct Shared {
  state: RwLock<TrackerState>,
  price_feed: Arc<dyn AssetPriceFeed>,
  rate_feed: Arc<dyn ReferenceRateFeed>,
  notifier: Arc<dyn Notifier>,
  settings: TrackerSettings,
  /// Bumped on every teardown; a fetch that straddles a bump is dropped
  epoch: AtomicU64,
  updates: watch::Sender<TrackerState>,
}

impl Shared {
  fn publish(&self, state: &TrackerState) {
    self.updates.send_replace(state.clone());
  }

  /// Fetch the price of the selected asset.
  ///
  /// Returns `true` when a new price was applied.
  pub(crate) async fn refresh_asset_price(&self) -> bool {
    let epoch = self.epoch.load(Ordering::Acquire);
    let (symbol, generation) = {
      let mut state = self.state.write().await;
      state.begin_price_refresh();
      self.publish(&state);
      (state.symbol, state.generation)
    };

    let result = self
      .price_feed
      .fetch_price(symbol)
      .await
      .and_then(|price| positive_feed_value(price, self.price_feed.source_name()));

    let mut state = self.state.write().await;
    if state.generation != generation {
      debug!("Discarding {} price fetched for a previous selection", symbol);
      return false;
    }
    if self.epoch.load(Ordering::Acquire) != epoch {
      debug!("Discarding {} price fetched before teardown", symbol);
      state.fail_price_refresh();
      self.publish(&state);
      return false;
    }

    match result {
      Ok(price) => {
        let price = normalize_feed_value(price, self.settings.feed_decimals);
        state.apply_price(price, Local::now());
        self.publish(&state);
        debug!("{} price updated from {}: {}", symbol, self.price_feed.source_name(), price);
        true
      }
      Err(e) => {
        state.fail_price_refresh();
        self.publish(&state);
        drop(state);
        warn!("Failed to refresh {} price from {}: {}", symbol, self.price_feed.source_name(), e);
        self.notifier.notify(&Notice::StaleFeed { feed: PRICE_FEED, error: e.to_string() });
        false
      }
    }
  }

  /// Fetch the local-currency rate.
  ///
  /// Returns `true` when a new rate was applied.
  pub(crate) async fn refresh_reference_rate(&self) -> bool {
    let epoch = self.epoch.load(Ordering::Acquire);
    {
      let mut state = self.state.write().await;
      state.begin_rate_refresh();
      self.publish(&state);
    }

    let result = self
      .rate_feed
      .fetch_rate()
      .await
      .and_then(|rate| positive_feed_value(rate, self.rate_feed.source_name()));

    let mut state = self.state.write().await;
    if self.epoch.load(Ordering::Acquire) != epoch {
      debug!("Discarding reference rate fetched before teardown");
      state.fail_rate_refresh();
      self.publish(&state);
      return false;
    }

    match result {
      Ok(rate) => {
        let rate = normalize_feed_value(rate, self.settings.feed_decimals);
        state.apply_rate(rate, Local::now());
        self.publish(&state);
        debug!(
          "{} rate updated from {}: {}",
          self.settings.local_currency,
          self.rate_feed.source_name(),
          rate
        );
        true
      }
      Err(e) => {
        state.fail_rate_refresh();
        self.publish(&state);
        drop(state);
        warn!("Failed to refresh reference rate from {}: {}", self.rate_feed.source_name(), e);
        self.notifier.notify(&Notice::StaleFeed { feed: RATE_FEED, error: e.to_string() });
        false
      }
    }
  }
}

/// A zero or negative quote is unusable and counts as a failed fetch
fn positive_feed_value(value: Decimal, source: &str) -> dq_core::Result<Decimal> {
  if value > Decimal::ZERO {
    Ok(value)
  } else {
    Err(Error::invalid_response(source, format!("non-positive value {}", value)))
  }
}

#[derive(Debug, Default)]
struct Polls {
  active: bool,
  price: Option<PollHandle>,
  rate: Option<PollHandle>,
}

/// Keeps an asset price and a reference rate fresh and converts a local
/// deposit amount into the selected asset on demand.
///
/// Cloning is not supported; share it behind an `Arc` if several callers need it.
pub struct ConversionTracker {
  shared: Arc<Shared>,
  polls: Mutex<Polls>,
}

impl ConversionTracker {
  pub fn new(
    price_feed: Arc<dyn AssetPriceFeed>,
    rate_feed: Arc<dyn ReferenceRateFeed>,
    settings: TrackerSettings,
  ) -> Self {
    Self::with_notifier(price_feed, rate_feed, settings, Arc::new(TracingNotifier))
  }

  pub fn with_notifier(
    price_feed: Arc<dyn AssetPriceFeed>,
    rate_feed: Arc<dyn ReferenceRateFeed>,
    settings: TrackerSettings,
    notifier: Arc<dyn Notifier>,
  ) -> Self {
    let state = TrackerState::new(settings.asset);
    let (updates, _) = watch::channel(state.clone());
    Self {
      shared: Arc::new(Shared {
        state: RwLock::new(state),
        price_feed,
        rate_feed,
        notifier,
        settings,
        epoch: AtomicU64::new(0),
        updates,
      }),
      polls: Mutex::new(Polls::default()),
    }
  }

  pub fn settings(&self) -> &TrackerSettings {
    &self.shared.settings
  }

  /// Start polling both feeds. Each refreshes immediately.
  pub async fn activate(&self) {
    let mut polls = self.polls.lock().await;
    if polls.active {
      debug!("Tracker already active");
      return;
    }

    let settings = &self.shared.settings;
    info!(
      "Activating tracker: price every {:?}, rate {}",
      settings.price_poll, settings.rate_refresh
    );
    polls.price = Some(spawn_price_poll(self.shared.clone(), settings.price_poll));
    polls.rate = Some(spawn_rate_refresh(self.shared.clone(), settings.rate_refresh));
    polls.active = true;
  }

  /// Stop polling. Results still in flight are discarded.
  pub async fn deactivate(&self) {
    self.shared.epoch.fetch_add(1, Ordering::AcqRel);

    let mut polls = self.polls.lock().await;
    if let Some(handle) = polls.price.take() {
      handle.cancel();
    }
    if let Some(handle) = polls.rate.take() {
      handle.cancel();
    }
    if polls.active {
      info!("Tracker deactivated");
    }
    polls.active = false;
    drop(polls);

    // Aborted tasks never finish their refresh
    let mut state = self.shared.state.write().await;
    state.fail_price_refresh();
    state.fail_rate_refresh();
    self.shared.publish(&state);
  }

  pub async fn is_active(&self) -> bool {
    self.polls.lock().await.active
  }

  /// Switch to another asset.
  ///
  /// The quote is cleared and the price is re-fetched for the new asset: by
  /// restarting the price poll when active, inline otherwise.
  pub async fn select_asset(&self, symbol: AssetSymbol) {
    {
      let mut state = self.shared.state.write().await;
      state.select(symbol);
      self.shared.publish(&state);
    }
    info!("Selected {}", symbol);

    let mut polls = self.polls.lock().await;
    if polls.active {
      if let Some(handle) = polls.price.take() {
        handle.cancel();
      }
      polls.price = Some(spawn_price_poll(self.shared.clone(), self.shared.settings.price_poll));
    } else {
      drop(polls);
      self.shared.refresh_asset_price().await;
    }
  }

  /// Select from selector text; unknown values fall back to the default asset
  pub async fn select_asset_str(&self, text: &str) {
    self.select_asset(AssetSymbol::parse_or_default(text)).await;
  }

  pub async fn refresh_asset_price(&self) -> bool {
    self.shared.refresh_asset_price().await
  }

  pub async fn refresh_reference_rate(&self) -> bool {
    self.shared.refresh_reference_rate().await
  }

  /// Store deposit text as typed; it is only parsed by `calculate`
  pub async fn set_local_amount(&self, text: impl Into<String>) {
    let mut state = self.shared.state.write().await;
    state.local_amount = text.into();
    self.shared.publish(&state);
  }

  /// Convert the current deposit amount into the selected asset.
  ///
  /// On error the previous quote is kept and a validation notice is sent.
  pub async fn calculate(&self) -> CalcResult<Quote> {
    let mut state = self.shared.state.write().await;
    let result = convert(&state.inputs(), &self.shared.settings.rounding);
    match result {
      Ok(quote) => {
        state.quote = Some(quote.clone());
        self.shared.publish(&state);
        debug!("Quoted {}", quote.display_line(&self.shared.settings.local_currency));
        Ok(quote)
      }
      Err(e) => {
        drop(state);
        debug!("Conversion not computed: {}", e);
        self.shared.notifier.notify(&Notice::Validation(e.to_string()));
        Err(e)
      }
    }
  }

  pub async fn snapshot(&self) -> TrackerState {
    self.shared.state.read().await.clone()
  }

  /// Receiver that sees every state change
  pub fn subscribe(&self) -> watch::Receiver<TrackerState> {
    self.shared.updates.subscribe()
  }

  /// `750000 円 = 0.1 BTC`, once a quote exists
  pub async fn quote_line(&self) -> Option<String> {
    let state = self.shared.state.read().await;
    state.quote.as_ref().map(|q| q.display_line(&self.shared.settings.local_currency))
  }

  /// `1 BTC = ¥7500000`
  pub async fn rate_line(&self) -> String {
    self.shared.state.read().await.rate_line(&self.shared.settings.local_currency)
  }
}

impl Drop for ConversionTracker {
  fn drop(&mut self) {
    self.shared.epoch.fetch_add(1, Ordering::AcqRel);
    let polls = self.polls.get_mut();
    if let Some(handle) = polls.price.take() {
      handle.cancel();
    }
    if let Some(handle) = polls.rate.take() {
      handle.cancel();
    }
    if let Ok(mut state) = self.shared.state.try_write() {
      state.fail_price_refresh();
      state.fail_rate_refresh();
      self.shared.publish(&state);
    }
  }
}

impl std::fmt::Debug for ConversionTracker {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ConversionTracker")
      .field("price_feed", &self.shared.price_feed.source_name())
      .field("rate_feed", &self.shared.rate_feed.source_name())
      .field("settings", &self.shared.settings)
      .finish()
  }
}

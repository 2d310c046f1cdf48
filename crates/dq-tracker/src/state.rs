//! Tracker state and its refresh lifecycle

use crate::calc::{ConversionInputs, Quote, local_sign};
use chrono::{DateTime, Local};
use dq_core::{AssetSymbol, PriceSource, QUOTE_ASSET};
use rust_decimal::Decimal;

/// Refresh lifecycle of one feed.
///
/// `Idle -> Loading -> Ready`. A failed fetch returns to whichever phase
/// preceded `Loading`; there is no separate error phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RefreshPhase {
  #[default]
  Idle,
  Loading,
  Ready,
}

/// Everything the tracker knows at one instant
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerState {
  pub symbol: AssetSymbol,
  /// Price of one unit of `symbol` in the reference currency
  pub asset_price: Decimal,
  /// False until a price for the current `symbol` has been received
  pub price_ready: bool,
  /// Local units per reference unit; zero until the first rate arrives
  pub reference_rate: Decimal,
  /// Raw deposit text as typed
  pub local_amount: String,
  /// Last computed quote; cleared on every asset selection
  pub quote: Option<Quote>,
  pub price_phase: RefreshPhase,
  pub rate_phase: RefreshPhase,
  pub price_refreshed_at: Option<DateTime<Local>>,
  pub rate_refreshed_at: Option<DateTime<Local>>,
  /// Bumped on every selection so fetches started for an older selection are dropped
  pub generation: u64,
  price_phase_before_load: RefreshPhase,
  rate_phase_before_load: RefreshPhase,
}

impl TrackerState {
  pub fn new(symbol: AssetSymbol) -> Self {
    let mut state = Self {
      symbol,
      asset_price: Decimal::ONE,
      price_ready: false,
      reference_rate: Decimal::ZERO,
      local_amount: String::new(),
      quote: None,
      price_phase: RefreshPhase::Idle,
      rate_phase: RefreshPhase::Idle,
      price_refreshed_at: None,
      rate_refreshed_at: None,
      generation: 0,
      price_phase_before_load: RefreshPhase::Idle,
      rate_phase_before_load: RefreshPhase::Idle,
    };
    state.seed_price();
    state
  }

  /// Switch asset: drop the quote and the old asset's price
  pub fn select(&mut self, symbol: AssetSymbol) {
    self.symbol = symbol;
    self.quote = None;
    self.asset_price = Decimal::ONE;
    self.price_ready = false;
    self.price_phase = RefreshPhase::Idle;
    self.price_phase_before_load = RefreshPhase::Idle;
    self.generation = self.generation.wrapping_add(1);
    self.seed_price();
  }

  /// Pegged assets are priced the moment they are selected
  fn seed_price(&mut self) {
    if let PriceSource::Pegged(price) = self.symbol.price_source(QUOTE_ASSET) {
      self.asset_price = price;
      self.price_ready = true;
    }
  }

  pub fn begin_price_refresh(&mut self) {
    if self.price_phase != RefreshPhase::Loading {
      self.price_phase_before_load = self.price_phase;
    }
    self.price_phase = RefreshPhase::Loading;
  }

  pub fn apply_price(&mut self, price: Decimal, at: DateTime<Local>) {
    self.asset_price = price;
    self.price_ready = true;
    self.price_phase = RefreshPhase::Ready;
    self.price_refreshed_at = Some(at);
  }

  pub fn fail_price_refresh(&mut self) {
    if self.price_phase == RefreshPhase::Loading {
      self.price_phase = self.price_phase_before_load;
    }
  }

  pub fn begin_rate_refresh(&mut self) {
    if self.rate_phase != RefreshPhase::Loading {
      self.rate_phase_before_load = self.rate_phase;
    }
    self.rate_phase = RefreshPhase::Loading;
  }

  pub fn apply_rate(&mut self, rate: Decimal, at: DateTime<Local>) {
    self.reference_rate = rate;
    self.rate_phase = RefreshPhase::Ready;
    self.rate_refreshed_at = Some(at);
  }

  pub fn fail_rate_refresh(&mut self) {
    if self.rate_phase == RefreshPhase::Loading {
      self.rate_phase = self.rate_phase_before_load;
    }
  }

  /// Snapshot the values a conversion reads
  pub fn inputs(&self) -> ConversionInputs<'_> {
    ConversionInputs {
      symbol: self.symbol,
      local_amount: &self.local_amount,
      asset_price: self.price_ready.then_some(self.asset_price),
      reference_rate: self.reference_rate,
    }
  }

  /// Most recent successful refresh of either feed
  pub fn last_refresh(&self) -> Option<DateTime<Local>> {
    self.price_refreshed_at.max(self.rate_refreshed_at)
  }

  /// `HH:MM:SS` of the last refresh, or `--:--:--` before the first one
  pub fn last_refresh_label(&self) -> String {
    self
      .last_refresh()
      .map(|at| at.format("%H:%M:%S").to_string())
      .unwrap_or_else(|| "--:--:--".to_string())
  }

  /// Local price of one asset unit, once both feeds have reported
  pub fn unit_local_price(&self) -> Option<Decimal> {
    if !self.price_ready || self.reference_rate <= Decimal::ZERO {
      return None;
    }
    self.asset_price.checked_mul(self.reference_rate).map(|p| p.normalize())
  }

  /// `1 BTC = ¥7500000`
  pub fn rate_line(&self, local_currency: &str) -> String {
    match self.unit_local_price() {
      Some(price) => {
        format!("1 {} = {}{}", self.symbol.display_label(), local_sign(local_currency), price)
      }
      None => format!("1 {} = {}-", self.symbol.display_label(), local_sign(local_currency)),
    }
  }
}

impl Default for TrackerState {
  fn default() -> Self {
    Self::new(AssetSymbol::default())
  }
}

//! Configuration management for the quote tracker and its feeds

use crate::error::{Error, Result};
use crate::types::AssetSymbol;
use dotenvy::dotenv;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// How often the reference exchange rate is refreshed while the tracker is active
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefreshPolicy {
  /// Fetch once on activation only
  #[default]
  Once,
  /// Fetch on activation, then on every interval
  Every(Duration),
}

impl FromStr for RefreshPolicy {
  type Err = Error;

  /// Accepts `once` or a positive number of seconds
  fn from_str(s: &str) -> Result<Self> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("once") {
      return Ok(RefreshPolicy::Once);
    }
    match s.parse::<u64>() {
      Ok(0) => Err(Error::Config("refresh interval must be greater than zero".to_string())),
      Ok(secs) => Ok(RefreshPolicy::Every(Duration::from_secs(secs))),
      Err(_) => Err(Error::Config(format!("invalid refresh policy '{}'", s))),
    }
  }
}

impl std::fmt::Display for RefreshPolicy {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      RefreshPolicy::Once => write!(f, "once"),
      RefreshPolicy::Every(d) => write!(f, "every {}s", d.as_secs()),
    }
  }
}

/// Display rounding applied to derived asset amounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundingPolicy {
  /// Amounts whose magnitude exceeds this are rounded to whole units
  pub threshold: Decimal,

  /// Decimal places kept below the threshold, per asset
  pub decimals: HashMap<AssetSymbol, u32>,

  /// Fallback when an asset has no entry in `decimals`
  pub default_decimals: u32,
}

impl RoundingPolicy {
  pub fn with_threshold(mut self, threshold: Decimal) -> Self {
    self.threshold = threshold;
    self
  }

  pub fn decimals_for(&self, symbol: AssetSymbol) -> u32 {
    self.decimals.get(&symbol).copied().unwrap_or(self.default_decimals)
  }
}

impl Default for RoundingPolicy {
  fn default() -> Self {
    let decimals =
      HashMap::from([(AssetSymbol::Btc, 8), (AssetSymbol::Eth, 8), (AssetSymbol::Usdt, 2)]);
    Self {
      threshold: Decimal::from(crate::DEFAULT_ROUNDING_THRESHOLD),
      decimals,
      default_decimals: 8,
    }
  }
}

/// Main configuration struct for the quote workspace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
  /// Base URL of the asset ticker feed
  pub price_feed_url: String,

  /// Base URL of the reference exchange-rate feed
  pub rate_feed_url: String,

  /// Application submission endpoint, if one is configured
  pub submit_url: Option<String>,

  /// Stable intermediary currency (e.g. USD)
  pub reference_currency: String,

  /// Deposit currency (e.g. JPY)
  pub local_currency: String,

  /// Request timeout in seconds
  pub timeout_secs: u64,

  /// Outbound requests per minute
  pub rate_limit: u32,

  /// Asset price poll cadence in seconds
  pub price_poll_secs: u64,

  /// Reference-rate refresh cadence
  pub rate_refresh: RefreshPolicy,

  /// Decimal places kept from feed quotes, `None` keeps full precision
  pub feed_decimals: Option<u32>,

  /// Display rounding for derived amounts
  pub rounding: RoundingPolicy,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      price_feed_url: crate::PRICE_FEED_BASE_URL.to_string(),
      rate_feed_url: crate::RATE_FEED_BASE_URL.to_string(),
      submit_url: None,
      reference_currency: crate::DEFAULT_REFERENCE_CURRENCY.to_string(),
      local_currency: crate::DEFAULT_LOCAL_CURRENCY.to_string(),
      timeout_secs: 30,
      rate_limit: crate::DEFAULT_RATE_LIMIT,
      price_poll_secs: crate::DEFAULT_PRICE_POLL_SECS,
      rate_refresh: RefreshPolicy::Once,
      feed_decimals: Some(0),
      rounding: RoundingPolicy::default(),
    }
  }
}

impl Config {
  /// Load configuration from environment variables (and `.env` if present)
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Build configuration from an arbitrary variable lookup
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let defaults = Config::default();

    let price_feed_url = lookup("DQ_PRICE_FEED_URL").unwrap_or(defaults.price_feed_url);
    validate_url("DQ_PRICE_FEED_URL", &price_feed_url)?;

    let rate_feed_url = lookup("DQ_RATE_FEED_URL").unwrap_or(defaults.rate_feed_url);
    validate_url("DQ_RATE_FEED_URL", &rate_feed_url)?;

    let submit_url = lookup("DQ_SUBMIT_URL").filter(|u| !u.trim().is_empty());
    if let Some(url) = &submit_url {
      validate_url("DQ_SUBMIT_URL", url)?;
    }

    let reference_currency = lookup("DQ_REFERENCE_CURRENCY")
      .map(|c| c.trim().to_ascii_uppercase())
      .unwrap_or(defaults.reference_currency);

    let local_currency = lookup("DQ_LOCAL_CURRENCY")
      .map(|c| c.trim().to_ascii_uppercase())
      .unwrap_or(defaults.local_currency);

    let timeout_secs = parse_var(&lookup, "DQ_TIMEOUT_SECS", defaults.timeout_secs)?;
    let rate_limit = parse_var(&lookup, "DQ_RATE_LIMIT", defaults.rate_limit)?;

    let price_poll_secs = parse_var(&lookup, "DQ_PRICE_POLL_SECS", defaults.price_poll_secs)?;
    if price_poll_secs == 0 {
      return Err(Error::Config("DQ_PRICE_POLL_SECS must be greater than zero".to_string()));
    }

    let rate_refresh = match lookup("DQ_RATE_REFRESH") {
      Some(v) => v
        .parse()
        .map_err(|e| Error::Config(format!("Invalid DQ_RATE_REFRESH: {}", e)))?,
      None => defaults.rate_refresh,
    };

    let feed_decimals = match lookup("DQ_FEED_DECIMALS") {
      Some(v) if v.trim().eq_ignore_ascii_case("none") => None,
      Some(v) => Some(
        v.trim().parse().map_err(|_| Error::Config("Invalid DQ_FEED_DECIMALS".to_string()))?,
      ),
      None => defaults.feed_decimals,
    };

    let threshold = match lookup("DQ_ROUNDING_THRESHOLD") {
      Some(v) => Decimal::from_str(v.trim())
        .map_err(|_| Error::Config("Invalid DQ_ROUNDING_THRESHOLD".to_string()))?,
      None => defaults.rounding.threshold,
    };

    Ok(Config {
      price_feed_url,
      rate_feed_url,
      submit_url,
      reference_currency,
      local_currency,
      timeout_secs,
      rate_limit,
      price_poll_secs,
      rate_refresh,
      feed_decimals,
      rounding: defaults.rounding.with_threshold(threshold),
    })
  }

  /// Asset price poll cadence
  pub fn price_poll_interval(&self) -> Duration {
    Duration::from_secs(self.price_poll_secs)
  }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
  F: Fn(&str) -> Option<String>,
  T: FromStr,
{
  match lookup(key) {
    Some(v) => v.trim().parse().map_err(|_| Error::Config(format!("Invalid {}", key))),
    None => Ok(default),
  }
}

fn validate_url(key: &str, value: &str) -> Result<()> {
  Url::parse(value).map(|_| ()).map_err(|e| Error::Config(format!("Invalid {}: {}", key, e)))
}

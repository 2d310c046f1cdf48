//! Reference exchange-rate responses

use dq_core::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Rates for one base currency, e.g. `GET /v4/latest/USD`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRates {
  /// Base currency code
  pub base: String,

  /// Publication date (YYYY-MM-DD)
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub date: Option<String>,

  /// Unix timestamp of the last provider update
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub time_last_updated: Option<i64>,

  /// Units of each currency per one unit of `base`
  pub rates: HashMap<String, Decimal>,
}

impl ExchangeRates {
  /// Rate for `currency`, if the feed listed it
  pub fn rate_for(&self, currency: &str) -> Option<Decimal> {
    self.rates.get(&currency.to_ascii_uppercase()).copied()
  }

  /// Extract the single rate the tracker consumes, rejecting unusable values
  pub fn local_rate(&self, base: &str, currency: &str) -> Result<Decimal> {
    if !self.base.eq_ignore_ascii_case(base) {
      return Err(Error::invalid_response(
        "exchange-rate",
        format!("expected base {}, got {}", base, self.base),
      ));
    }

    let rate = self
      .rate_for(currency)
      .ok_or_else(|| Error::MissingField(format!("rates.{}", currency)))?;

    if rate.is_sign_negative() {
      return Err(Error::invalid_response("exchange-rate", format!("negative rate {}", rate)));
    }

    Ok(rate)
  }
}

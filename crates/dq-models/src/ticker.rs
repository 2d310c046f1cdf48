//! Asset ticker price responses

use dq_core::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Latest price for one trading pair, e.g. `{"symbol":"BTCUSDT","price":"50000.00000000"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerPrice {
  /// Trading pair symbol
  pub symbol: String,

  /// Last traded price in the quote asset
  #[serde(with = "rust_decimal::serde::str")]
  pub price: Decimal,
}

impl TickerPrice {
  /// Check the quote belongs to `expected_pair` and carries a usable price
  pub fn validated_price(&self, expected_pair: &str) -> Result<Decimal> {
    if !self.symbol.eq_ignore_ascii_case(expected_pair) {
      return Err(Error::invalid_response(
        "ticker",
        format!("expected pair {}, got {}", expected_pair, self.symbol),
      ));
    }

    if self.price.is_sign_negative() {
      return Err(Error::invalid_response("ticker", format!("negative price {}", self.price)));
    }

    Ok(self.price)
  }
}

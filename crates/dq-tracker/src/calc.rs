//! Deposit conversion arithmetic.
//!
//! Everything here is a pure function over a snapshot of tracker state, so
//! the conversion can be exercised without feeds or a runtime.

use crate::error::{CalcError, CalcResult};
use dq_core::{AssetSymbol, RoundingPolicy};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Values a conversion reads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionInputs<'a> {
  pub symbol: AssetSymbol,
  /// Raw deposit text as typed
  pub local_amount: &'a str,
  /// `None` until a price for `symbol` has arrived
  pub asset_price: Option<Decimal>,
  /// Local units per reference unit; zero until the first rate arrives
  pub reference_rate: Decimal,
}

/// A computed deposit quote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
  pub symbol: AssetSymbol,
  pub local_amount: Decimal,
  pub derived_amount: Decimal,
}

impl Quote {
  /// `750000 円 = 0.1 BTC`
  pub fn display_line(&self, local_currency: &str) -> String {
    format!(
      "{} {} = {} {}",
      self.local_amount,
      local_unit(local_currency),
      self.derived_amount,
      self.symbol.display_label()
    )
  }
}

/// Parse deposit text. Blank, non-numeric and non-positive input is rejected.
pub fn parse_local_amount(text: &str) -> CalcResult<Decimal> {
  let trimmed = text.trim();
  if trimmed.is_empty() {
    return Err(CalcError::EmptyAmount);
  }

  let amount = Decimal::from_str(trimmed)
    .or_else(|_| Decimal::from_scientific(trimmed))
    .map_err(|_| CalcError::InvalidAmount(trimmed.to_string()))?;

  if amount <= Decimal::ZERO {
    return Err(CalcError::NonPositiveAmount);
  }
  Ok(amount)
}

/// `derived = (local_amount / reference_rate) / asset_price`, then display rounding
pub fn convert(inputs: &ConversionInputs<'_>, policy: &RoundingPolicy) -> CalcResult<Quote> {
  let local_amount = parse_local_amount(inputs.local_amount)?;

  if inputs.reference_rate <= Decimal::ZERO {
    return Err(CalcError::RateNotReady);
  }

  let asset_price = inputs
    .asset_price
    .filter(|p| *p > Decimal::ZERO)
    .ok_or(CalcError::PriceNotReady(inputs.symbol))?;

  let derived = local_amount
    .checked_div(inputs.reference_rate)
    .and_then(|reference_amount| reference_amount.checked_div(asset_price))
    .ok_or(CalcError::Overflow)?;

  Ok(Quote {
    symbol: inputs.symbol,
    local_amount,
    derived_amount: apply_rounding(derived, inputs.symbol, policy),
  })
}

/// Whole units above the threshold, the asset's display precision otherwise
pub fn apply_rounding(value: Decimal, symbol: AssetSymbol, policy: &RoundingPolicy) -> Decimal {
  let dp = if value.abs() > policy.threshold { 0 } else { policy.decimals_for(symbol) };
  value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero).normalize()
}

/// Trim a feed quote to `decimals` places; `None` keeps it as received.
///
/// Values below one unit are never trimmed, so a small positive rate cannot
/// collapse to zero.
pub fn normalize_feed_value(value: Decimal, decimals: Option<u32>) -> Decimal {
  match decimals {
    Some(dp) if value.abs() >= Decimal::ONE => {
      value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
    }
    _ => value,
  }
}

/// Unit written after a local amount
pub fn local_unit(currency: &str) -> &str {
  match currency {
    "JPY" => "円",
    other => other,
  }
}

/// Sign written before a local price
pub fn local_sign(currency: &str) -> String {
  match currency {
    "JPY" => "¥".to_string(),
    "USD" => "$".to_string(),
    "EUR" => "€".to_string(),
    other => format!("{} ", other),
  }
}

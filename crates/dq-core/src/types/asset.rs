//! Supported deposit assets

use crate::error::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Where an asset's reference-currency price comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceSource {
  /// Polled from the ticker feed under this pair, e.g. `BTCUSDT`
  Ticker(String),
  /// Fixed price, never fetched
  Pegged(Decimal),
}

/// Closed set of assets an applicant can deposit with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetSymbol {
  #[default]
  Btc,
  Eth,
  /// Tether. The form's selector still submits `LTC` for this option.
  #[serde(alias = "LTC", alias = "ltc", alias = "usdt")]
  Usdt,
}

impl AssetSymbol {
  /// Every supported asset, in selector order
  pub const ALL: [AssetSymbol; 3] = [AssetSymbol::Btc, AssetSymbol::Eth, AssetSymbol::Usdt];

  /// Parse user input, falling back to the default asset for anything unknown
  pub fn parse_or_default(s: &str) -> Self {
    s.parse().unwrap_or_default()
  }

  /// Currency label shown next to derived amounts
  pub fn display_label(&self) -> &'static str {
    match self {
      AssetSymbol::Btc => "BTC",
      AssetSymbol::Eth => "ETH",
      AssetSymbol::Usdt => "USDT",
    }
  }

  /// Human readable asset name
  pub fn name(&self) -> &'static str {
    match self {
      AssetSymbol::Btc => "Bitcoin",
      AssetSymbol::Eth => "Ethereum",
      AssetSymbol::Usdt => "Tether",
    }
  }

  /// Price source for this asset quoted against `quote_asset`
  pub fn price_source(&self, quote_asset: &str) -> PriceSource {
    match self {
      AssetSymbol::Btc | AssetSymbol::Eth => {
        PriceSource::Ticker(format!("{}{}", self.display_label(), quote_asset))
      }
      AssetSymbol::Usdt => PriceSource::Pegged(Decimal::ONE),
    }
  }

  /// Whether the price is fixed rather than polled
  pub fn is_pegged(&self) -> bool {
    matches!(self, AssetSymbol::Usdt)
  }
}

impl std::fmt::Display for AssetSymbol {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.display_label())
  }
}

impl FromStr for AssetSymbol {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_uppercase().as_str() {
      "BTC" => Ok(AssetSymbol::Btc),
      "ETH" => Ok(AssetSymbol::Eth),
      "USDT" | "LTC" => Ok(AssetSymbol::Usdt),
      other => Err(Error::UnknownAsset(other.to_string())),
    }
  }
}

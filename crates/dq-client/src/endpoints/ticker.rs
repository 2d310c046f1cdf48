//! Asset ticker endpoint (`GET /api/v3/ticker/price?symbol=BTCUSDT`)

use super::EndpointCore;
use crate::traits::AssetPriceFeed;
use crate::transport::endpoint_url;
use async_trait::async_trait;
use dq_core::{AssetSymbol, PriceSource, Result};
use dq_models::TickerPrice;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

const SOURCE: &str = "ticker";
const TICKER_PATH: &str = "api/v3/ticker/price";

/// Price endpoints on the ticker feed
#[derive(Debug, Clone)]
pub struct TickerEndpoints {
  core: EndpointCore,
  base_url: String,
  quote_asset: String,
}

impl TickerEndpoints {
  /// Create ticker endpoints against `base_url`, pricing assets in `quote_asset`
  pub fn new(
    core: EndpointCore,
    base_url: impl Into<String>,
    quote_asset: impl Into<String>,
  ) -> Self {
    Self { core, base_url: base_url.into(), quote_asset: quote_asset.into() }
  }

  /// Latest price for a trading pair
  ///
  /// # Arguments
  ///
  /// * `pair` - Ticker pair such as `BTCUSDT`
  #[instrument(skip(self))]
  pub async fn ticker_price(&self, pair: &str) -> Result<TickerPrice> {
    self.core.wait_for_rate_limit().await;

    let mut url = endpoint_url(&self.base_url, TICKER_PATH)?;
    url.query_pairs_mut().append_pair("symbol", pair);

    self.core.transport.get_json(SOURCE, &url).await
  }
}

#[async_trait]
impl AssetPriceFeed for TickerEndpoints {
  async fn fetch_price(&self, symbol: AssetSymbol) -> Result<Decimal> {
    match symbol.price_source(&self.quote_asset) {
      PriceSource::Pegged(price) => {
        debug!("{} is pegged at {}", symbol, price);
        Ok(price)
      }
      PriceSource::Ticker(pair) => self.ticker_price(&pair).await?.validated_price(&pair),
    }
  }

  fn source_name(&self) -> &'static str {
    "Binance"
  }
}

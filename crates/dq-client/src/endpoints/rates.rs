//! Reference exchange-rate endpoint (`GET /v4/latest/{base}`)

use super::EndpointCore;
use crate::traits::ReferenceRateFeed;
use crate::transport::endpoint_url;
use async_trait::async_trait;
use dq_core::Result;
use dq_models::ExchangeRates;
use rust_decimal::Decimal;
use tracing::instrument;

const SOURCE: &str = "exchange-rate";

/// Endpoints on the exchange-rate feed
#[derive(Debug, Clone)]
pub struct RateEndpoints {
  core: EndpointCore,
  base_url: String,
  reference_currency: String,
  local_currency: String,
}

impl RateEndpoints {
  pub fn new(
    core: EndpointCore,
    base_url: impl Into<String>,
    reference_currency: impl Into<String>,
    local_currency: impl Into<String>,
  ) -> Self {
    Self {
      core,
      base_url: base_url.into(),
      reference_currency: reference_currency.into(),
      local_currency: local_currency.into(),
    }
  }

  /// All published rates for `base`
  ///
  /// # Arguments
  ///
  /// * `base` - The base currency code (e.g., "USD")
  #[instrument(skip(self))]
  pub async fn latest(&self, base: &str) -> Result<ExchangeRates> {
    self.core.wait_for_rate_limit().await;

    let url = endpoint_url(&self.base_url, &format!("v4/latest/{}", base))?;
    self.core.transport.get_json(SOURCE, &url).await
  }
}

#[async_trait]
impl ReferenceRateFeed for RateEndpoints {
  async fn fetch_rate(&self) -> Result<Decimal> {
    let rates = self.latest(&self.reference_currency).await?;
    rates.local_rate(&self.reference_currency, &self.local_currency)
  }

  fn source_name(&self) -> &'static str {
    "ExchangeRate-API"
  }
}

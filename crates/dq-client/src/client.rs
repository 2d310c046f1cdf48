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

use crate::endpoints::{
  EndpointCore, FeedRateLimiter, rates::RateEndpoints, submit::SubmissionEndpoint,
  ticker::TickerEndpoints,
};
use crate::transport::Transport;
use dq_core::{Config, Error, Result};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Entry point for every upstream service the quote tracker talks to
///
/// # Examples
///
/// ```ignore
/// use dq_client::{AssetPriceFeed, QuoteClient};
/// use dq_core::{AssetSymbol, Config};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = QuoteClient::new(Config::from_env()?)?;
///     let price = client.prices().fetch_price(AssetSymbol::Btc).await?;
///     println!("1 BTC = {} USDT", price);
///     Ok(())
/// }
/// ```
pub struct QuoteClient {
  config: Config,
  rate_limiter: Arc<FeedRateLimiter>,
  transport: Arc<Transport>,
}

impl QuoteClient {
  /// Create a new client
  ///
  /// # Errors
  ///
  /// Returns an error if the HTTP client cannot be created.
  pub fn new(config: Config) -> Result<Self> {
    // Ensure rate_limit is non-zero, fallback to default if invalid
    let rate_limit_value = NonZeroU32::new(config.rate_limit)
      .or_else(|| NonZeroU32::new(dq_core::DEFAULT_RATE_LIMIT))
      .ok_or_else(|| Error::Config("rate limit must be non-zero".to_string()))?;
    let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(rate_limit_value)));

    let transport = Arc::new(Transport::new(&config)?);

    Ok(Self { config, rate_limiter, transport })
  }

  fn core(&self) -> EndpointCore {
    EndpointCore::new(self.transport.clone(), self.rate_limiter.clone())
  }

  /// Asset price feed
  pub fn prices(&self) -> TickerEndpoints {
    TickerEndpoints::new(self.core(), &self.config.price_feed_url, dq_core::QUOTE_ASSET)
  }

  /// Reference exchange-rate feed
  pub fn rates(&self) -> RateEndpoints {
    RateEndpoints::new(
      self.core(),
      &self.config.rate_feed_url,
      &self.config.reference_currency,
      &self.config.local_currency,
    )
  }

  /// Submission endpoint, when `DQ_SUBMIT_URL` is configured
  pub fn submissions(&self) -> Result<SubmissionEndpoint> {
    let url = self
      .config
      .submit_url
      .as_deref()
      .ok_or_else(|| Error::Config("DQ_SUBMIT_URL is not set".to_string()))?;
    SubmissionEndpoint::new(self.transport.clone(), url)
  }

  pub fn config(&self) -> &Config {
    &self.config
  }
}

impl std::fmt::Debug for QuoteClient {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("QuoteClient")
      .field("transport", &self.transport)
      .field("rate_limiter", &"RateLimiter")
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_client_creation() {
    let client = QuoteClient::new(Config::default()).expect("Failed to create client");
    assert_eq!(client.config().local_currency, "JPY");
  }

  #[test]
  fn test_zero_rate_limit_falls_back_to_default() {
    let config = Config { rate_limit: 0, ..Config::default() };
    assert!(QuoteClient::new(config).is_ok());
  }

  #[test]
  fn test_submissions_require_url() {
    let client = QuoteClient::new(Config::default()).unwrap();
    assert!(matches!(client.submissions(), Err(Error::Config(_))));

    let config =
      Config { submit_url: Some("https://forms.example.com/apply".to_string()), ..Config::default() };
    let client = QuoteClient::new(config).unwrap();
    assert_eq!(client.submissions().unwrap().url().as_str(), "https://forms.example.com/apply");
  }
}

//! Endpoint groups for each upstream service

pub mod rates;
pub mod submit;
pub mod ticker;

use crate::transport::Transport;
use governor::{
  RateLimiter,
  clock::DefaultClock,
  middleware::NoOpMiddleware,
  state::{InMemoryState, NotKeyed},
};
use std::sync::Arc;

/// Direct (unkeyed) limiter shared by the feed endpoints
pub type FeedRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Common endpoint structure
///
/// Feed endpoints share one transport and one rate limiter so rapid asset
/// switching cannot flood an upstream API.
#[derive(Clone)]
pub struct EndpointCore {
  pub transport: Arc<Transport>,
  pub rate_limiter: Arc<FeedRateLimiter>,
}

impl EndpointCore {
  /// Create a new endpoint core
  pub fn new(transport: Arc<Transport>, rate_limiter: Arc<FeedRateLimiter>) -> Self {
    Self { transport, rate_limiter }
  }

  /// Wait until the limiter admits the next request
  pub async fn wait_for_rate_limit(&self) {
    self.rate_limiter.until_ready().await;
  }
}

impl std::fmt::Debug for EndpointCore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("EndpointCore")
      .field("transport", &self.transport)
      .field("rate_limiter", &"RateLimiter")
      .finish()
  }
}

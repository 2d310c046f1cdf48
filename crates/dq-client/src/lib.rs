//! # dq-client
//!
//! HTTP clients for the two pricing feeds behind a deposit quote, plus the
//! application submission endpoint.
//!
//! - Asset ticker feed: `GET {price_feed_url}/api/v3/ticker/price?symbol=BTCUSDT`
//! - Exchange-rate feed: `GET {rate_feed_url}/v4/latest/USD`
//! - Submission: `POST {submit_url}` with an `ApplicationSubmission` JSON body
//!
//! Both feeds implement the [`AssetPriceFeed`] / [`ReferenceRateFeed`] traits
//! so the tracker can be driven by any source.
//!
//! ## Error Handling
//!
//! All methods return `Result<T, dq_core::Error>`.

#![warn(clippy::all)]

pub mod client;
pub mod endpoints;
pub mod traits;
pub mod transport;

pub use client::QuoteClient;
pub use dq_core::{Config, Error, Result};
pub use endpoints::{
  EndpointCore, rates::RateEndpoints, submit::SubmissionEndpoint, ticker::TickerEndpoints,
};
pub use traits::{AssetPriceFeed, ReferenceRateFeed};
pub use transport::Transport;

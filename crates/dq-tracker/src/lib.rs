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

//! # dq-tracker
//!
//! Keeps an asset price and a local-currency exchange rate fresh, and converts
//! a deposit amount into the selected asset on demand:
//!
//! ```text
//! derived = (local_amount / reference_rate) / asset_price
//! ```
//!
//! The tracker polls through the [`AssetPriceFeed`](dq_client::AssetPriceFeed)
//! and [`ReferenceRateFeed`](dq_client::ReferenceRateFeed) traits. Each poll
//! task is owned by the tracker and aborted when it is deactivated or dropped.
//!
//! ```ignore
//! let client = QuoteClient::new(Config::from_env()?)?;
//! let tracker = ConversionTracker::new(
//!   Arc::new(client.prices()),
//!   Arc::new(client.rates()),
//!   TrackerSettings::from_config(client.config()),
//! );
//! tracker.activate().await;
//! tracker.set_local_amount("750000").await;
//! let quote = tracker.calculate().await?;
//! ```

pub mod calc;
pub mod error;
pub mod notify;
pub mod poller;
pub mod state;
pub mod tracker;

pub use calc::{ConversionInputs, Quote};
pub use error::{CalcError, CalcResult};
pub use notify::{Notice, Notifier, TracingNotifier};
pub use poller::PollHandle;
pub use state::{RefreshPhase, TrackerState};
pub use tracker::{ConversionTracker, TrackerSettings};

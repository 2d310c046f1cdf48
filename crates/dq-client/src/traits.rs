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

//! Feed traits the tracker polls through.
//!
//! The tracker only sees these traits, so tests and alternative data sources
//! can stand in for the HTTP endpoints.

use async_trait::async_trait;
use dq_core::{AssetSymbol, Result};
use rust_decimal::Decimal;

/// Source of an asset's price in the reference currency
#[async_trait]
pub trait AssetPriceFeed: Send + Sync {
  /// Current price of one unit of `symbol`
  async fn fetch_price(&self, symbol: AssetSymbol) -> Result<Decimal>;

  /// Get the name of this data source.
  fn source_name(&self) -> &'static str;
}

/// Source of the local-currency value of one reference-currency unit
#[async_trait]
pub trait ReferenceRateFeed: Send + Sync {
  /// Units of local currency per one unit of reference currency
  async fn fetch_rate(&self) -> Result<Decimal>;

  /// Get the name of this data source.
  fn source_name(&self) -> &'static str;
}

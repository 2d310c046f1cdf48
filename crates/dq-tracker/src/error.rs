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

use dq_core::AssetSymbol;
use thiserror::Error;

/// Reasons a conversion could not be computed yet.
///
/// None of these are fatal; the previous quote is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
  #[error("Enter a deposit amount")]
  EmptyAmount,

  #[error("Deposit amount '{0}' is not a number")]
  InvalidAmount(String),

  #[error("Deposit amount must be greater than zero")]
  NonPositiveAmount,

  #[error("Exchange rate is not available yet")]
  RateNotReady,

  #[error("Price for {0} is not available yet")]
  PriceNotReady(AssetSymbol),

  #[error("Conversion result is out of range")]
  Overflow,
}

pub type CalcResult<T> = Result<T, CalcError>;

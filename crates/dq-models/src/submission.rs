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

//! Outbound application payload

use crate::application::{ApplicationForm, Plan};
use chrono::{DateTime, Utc};
use dq_core::AssetSymbol;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Application plus the quote it was submitted with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSubmission {
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  pub application_type: Plan,
  pub csid: String,
  pub participant_count: u32,

  /// Asset the deposit will be made in
  pub asset_symbol: AssetSymbol,

  /// Yen amount the applicant entered
  #[serde(with = "rust_decimal::serde::str")]
  pub local_amount: Decimal,

  /// Asset quantity quoted for `local_amount`
  #[serde(with = "rust_decimal::serde::str")]
  pub derived_amount: Decimal,

  /// Label shown next to `derived_amount`
  pub currency_label: String,

  pub quoted_at: DateTime<Utc>,
}

impl ApplicationSubmission {
  /// Assemble a payload from a validated form and a computed quote.
  ///
  /// Returns `None` if the form's plan or entitlement count do not parse;
  /// callers run `ApplicationForm::validate` first.
  pub fn from_form(
    form: &ApplicationForm,
    asset_symbol: AssetSymbol,
    local_amount: Decimal,
    derived_amount: Decimal,
    quoted_at: DateTime<Utc>,
  ) -> Option<Self> {
    Some(Self {
      first_name: form.first_name.trim().to_string(),
      last_name: form.last_name.trim().to_string(),
      email: form.email.trim().to_string(),
      phone: form.phone.trim().to_string(),
      application_type: form.plan()?,
      csid: form.csid.trim().to_string(),
      participant_count: form.participants()?,
      asset_symbol,
      local_amount,
      derived_amount,
      currency_label: asset_symbol.display_label().to_string(),
      quoted_at,
    })
  }
}

/// Acknowledgement returned by the submission endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
  #[serde(default)]
  pub id: Option<String>,
  #[serde(default)]
  pub message: Option<String>,
}

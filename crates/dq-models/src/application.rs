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

//! Investment application form fields and their validation rules

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
  regex::Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$")
    .expect("email pattern is valid")
});

/// Subscription plan chosen on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
  /// Full plan
  Individual,
  /// Light plan, first-time applicants only
  Light,
}

impl std::str::FromStr for Plan {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "individual" => Ok(Plan::Individual),
      "light" => Ok(Plan::Light),
      other => Err(format!("unknown plan '{}'", other)),
    }
  }
}

impl std::fmt::Display for Plan {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Plan::Individual => write!(f, "individual"),
      Plan::Light => write!(f, "light"),
    }
  }
}

/// One failed rule, keyed by the form field name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub field: &'static str,
  pub message: &'static str,
}

impl std::fmt::Display for FieldError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}: {}", self.field, self.message)
  }
}

/// Every rule the form failed, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Message for a single field, if it failed
  pub fn for_field(&self, field: &str) -> Option<&'static str> {
    self.0.iter().find(|e| e.field == field).map(|e| e.message)
  }

  fn push(&mut self, field: &'static str, message: &'static str) {
    self.0.push(FieldError { field, message });
  }
}

impl std::fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let joined: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
    write!(f, "{}", joined.join("; "))
  }
}

impl std::error::Error for ValidationErrors {}

/// Raw form input. Every field is kept as entered until `validate` runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationForm {
  pub first_name: String,
  /// Family name in kana
  pub last_name: String,
  pub email: String,
  pub phone: String,
  /// `individual` or `light`
  pub application_type: String,
  /// Customer id at the receiving institution
  pub csid: String,
  pub participant_count: String,
  /// Selector value: `BTC`, `ETH` or `LTC`
  pub crypto_type: String,
  /// Yen deposit amount
  pub amount: String,
}

impl ApplicationForm {
  /// Check every field, collecting all failures
  pub fn validate(&self) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if is_blank(&self.first_name) {
      errors.push("firstName", "First name is required");
    }
    if is_blank(&self.last_name) {
      errors.push("lastName", "Last name (kana) is required");
    }
    if is_blank(&self.email) {
      errors.push("email", "Email address is required");
    } else if !EMAIL_RE.is_match(self.email.trim()) {
      errors.push("email", "Invalid email address");
    }
    if is_blank(&self.phone) {
      errors.push("phone", "Phone number is required");
    }
    if is_blank(&self.application_type) {
      errors.push("applicationType", "Application plan is required");
    } else if self.application_type.parse::<Plan>().is_err() {
      errors.push("applicationType", "Unknown application plan");
    }
    if is_blank(&self.csid) {
      errors.push("csid", "CSID is required");
    }
    if is_blank(&self.participant_count) {
      errors.push("participantCount", "Number of entitlements is required");
    } else if positive_integer(&self.participant_count).is_none() {
      errors.push("participantCount", "Number of entitlements must be a positive integer");
    }
    if is_blank(&self.crypto_type) {
      errors.push("cryptoType", "Select a cryptocurrency");
    }
    if is_blank(&self.amount) {
      errors.push("amount", "Enter an amount");
    } else if positive_integer(&self.amount).is_none() {
      errors.push("amount", "Amount must be a positive whole number of yen");
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
  }

  /// Parsed plan, once the form has validated
  pub fn plan(&self) -> Option<Plan> {
    self.application_type.parse().ok()
  }

  /// Parsed entitlement count, once the form has validated
  pub fn participants(&self) -> Option<u32> {
    positive_integer(&self.participant_count).and_then(|n| u32::try_from(n).ok())
  }
}

fn is_blank(value: &str) -> bool {
  value.trim().is_empty()
}

fn positive_integer(value: &str) -> Option<u64> {
  value.trim().parse::<u64>().ok().filter(|n| *n > 0)
}

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

use super::{Session, TrackerArgs};
use anyhow::{Context, Result, anyhow, bail};
use chrono::Utc;
use clap::Args;
use colored::Colorize;
use dq_core::Config;
use dq_models::{ApplicationForm, ApplicationSubmission};
use dq_tracker::{Notice, Notifier};
use tracing::{error, info};

#[derive(Args, Debug)]
pub struct ApplyArgs {
  #[arg(long)]
  pub first_name: String,

  /// Family name in kana
  #[arg(long)]
  pub last_name: String,

  #[arg(long)]
  pub email: String,

  #[arg(long)]
  pub phone: String,

  /// Application plan: individual or light
  #[arg(long, default_value = "individual")]
  pub plan: String,

  /// Customer id at the receiving institution
  #[arg(long)]
  pub csid: String,

  /// Number of entitlements applied for
  #[arg(long)]
  pub participants: String,

  /// Asset to deposit in (BTC, ETH, LTC)
  #[arg(long, default_value = "BTC")]
  pub crypto: String,

  /// Deposit amount in yen
  #[arg(short = 'm', long)]
  pub amount: String,

  /// Print the payload instead of submitting it
  #[arg(short, long)]
  pub dry_run: bool,
}

impl ApplyArgs {
  fn form(&self) -> ApplicationForm {
    ApplicationForm {
      first_name: self.first_name.clone(),
      last_name: self.last_name.clone(),
      email: self.email.clone(),
      phone: self.phone.clone(),
      application_type: self.plan.clone(),
      csid: self.csid.clone(),
      participant_count: self.participants.clone(),
      crypto_type: self.crypto.clone(),
      amount: self.amount.clone(),
    }
  }
}

pub async fn execute(args: ApplyArgs, config: Config) -> Result<()> {
  let form = args.form();
  if let Err(errors) = form.validate() {
    for e in &errors.0 {
      eprintln!("{} {}", format!("{}:", e.field).red(), e.message);
    }
    bail!("Application has {} invalid field(s)", errors.len());
  }

  let tracker_args = TrackerArgs {
    asset: form.crypto_type.clone(),
    interval: None,
    rate_refresh: None,
    threshold: None,
  };
  let session = Session::new(&tracker_args, config)?;
  let tracker = &session.tracker;

  let (price_ok, rate_ok) =
    tokio::join!(tracker.refresh_asset_price(), tracker.refresh_reference_rate());
  if !price_ok || !rate_ok {
    bail!("Could not fetch current prices");
  }

  tracker.set_local_amount(form.amount.as_str()).await;
  let quote = tracker.calculate().await?;
  println!("{}", quote.display_line(&tracker.settings().local_currency).green().bold());

  let payload = ApplicationSubmission::from_form(
    &form,
    quote.symbol,
    quote.local_amount,
    quote.derived_amount,
    Utc::now(),
  )
  .ok_or_else(|| anyhow!("Application form could not be converted to a submission"))?;

  if args.dry_run {
    println!("{}", serde_json::to_string_pretty(&payload)?);
    info!("Dry run: application not submitted");
    return Ok(());
  }

  let endpoint = session.client.submissions().context("Submission endpoint is not configured")?;
  match endpoint.submit(&payload).await {
    Ok(receipt) => {
      session.notifier.notify(&Notice::Submitted { receipt_id: receipt.id });
      if let Some(message) = receipt.message {
        println!("{}", message);
      }
      Ok(())
    }
    Err(e) => {
      error!("Submission failed: {}", e);
      session.notifier.notify(&Notice::SubmitFailed(e.to_string()));
      Err(e.into())
    }
  }
}

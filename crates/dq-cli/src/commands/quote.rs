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
use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use dq_core::Config;

#[derive(Args, Debug)]
pub struct QuoteArgs {
  #[command(flatten)]
  pub tracker: TrackerArgs,

  /// Deposit amount in the local currency
  #[arg(short = 'm', long)]
  pub amount: String,
}

pub async fn execute(args: QuoteArgs, config: Config) -> Result<()> {
  let session = Session::new(&args.tracker, config)?;
  let tracker = &session.tracker;

  let (price_ok, rate_ok) =
    tokio::join!(tracker.refresh_asset_price(), tracker.refresh_reference_rate());
  if !price_ok || !rate_ok {
    bail!("Could not fetch current prices");
  }

  tracker.set_local_amount(args.amount).await;
  let quote = tracker.calculate().await?;

  let local_currency = &tracker.settings().local_currency;
  let state = tracker.snapshot().await;
  println!("{}", quote.display_line(local_currency).green().bold());
  println!("{} (as of {})", state.rate_line(local_currency), state.last_refresh_label());

  Ok(())
}

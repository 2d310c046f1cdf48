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
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dq_core::Config;
use dq_tracker::TrackerState;
use tracing::info;

#[derive(Args, Debug)]
pub struct WatchArgs {
  #[command(flatten)]
  pub tracker: TrackerArgs,

  /// Deposit amount to re-quote on every refresh
  #[arg(short = 'm', long)]
  pub amount: Option<String>,
}

pub async fn execute(args: WatchArgs, config: Config) -> Result<()> {
  let session = Session::new(&args.tracker, config)?;
  let tracker = &session.tracker;

  if let Some(amount) = &args.amount {
    tracker.set_local_amount(amount.as_str()).await;
  }

  let mut updates = tracker.subscribe();
  tracker.activate().await;
  info!("Watching {} (Ctrl-C to stop)", args.tracker.symbol());

  let shutdown = tokio::signal::ctrl_c();
  tokio::pin!(shutdown);

  let mut last_seen = None;
  loop {
    tokio::select! {
      _ = &mut shutdown => break,
      changed = updates.changed() => {
        if changed.is_err() {
          break;
        }
        let state = updates.borrow_and_update().clone();
        let refreshed = (state.price_refreshed_at, state.rate_refreshed_at);
        if last_seen == Some(refreshed) || state.last_refresh().is_none() {
          continue;
        }
        last_seen = Some(refreshed);
        print_refresh(&session, &state, args.amount.is_some()).await;
      }
    }
  }

  tracker.deactivate().await;
  info!("Stopped watching");
  Ok(())
}

async fn print_refresh(session: &Session, state: &TrackerState, quote: bool) {
  let local_currency = &session.tracker.settings().local_currency;
  println!(
    "[{}] {}",
    state.last_refresh_label().dimmed(),
    state.rate_line(local_currency).bold()
  );

  if quote && state.price_ready && !state.reference_rate.is_zero() {
    if let Ok(q) = session.tracker.calculate().await {
      println!("           {}", q.display_line(local_currency).green());
    }
  }
}

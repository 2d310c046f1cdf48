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

pub mod apply;
pub mod quote;
pub mod watch;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dq_client::QuoteClient;
use dq_core::{AssetSymbol, Config, RefreshPolicy};
use dq_tracker::{ConversionTracker, Notice, Notifier, TrackerSettings};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::warn;

/// Tracker options shared by every command
#[derive(Args, Debug)]
pub struct TrackerArgs {
  /// Asset to quote (BTC, ETH, LTC); unknown values fall back to BTC
  #[arg(short, long, default_value = "BTC")]
  pub asset: String,

  /// Asset price poll interval in seconds (overrides DQ_PRICE_POLL_SECS)
  #[arg(short, long)]
  pub interval: Option<u64>,

  /// Reference rate refresh: `once` or seconds (overrides DQ_RATE_REFRESH)
  #[arg(long)]
  pub rate_refresh: Option<RefreshPolicy>,

  /// Results above this magnitude are shown in whole units (overrides DQ_ROUNDING_THRESHOLD)
  #[arg(long)]
  pub threshold: Option<Decimal>,
}

impl TrackerArgs {
  pub fn symbol(&self) -> AssetSymbol {
    let symbol = AssetSymbol::parse_or_default(&self.asset);
    if self.asset.parse::<AssetSymbol>().is_err() {
      warn!("Unknown asset '{}', using {}", self.asset, symbol);
    }
    symbol
  }

  /// Apply command-line overrides on top of the environment configuration
  pub fn apply_to(&self, mut config: Config) -> Config {
    if let Some(secs) = self.interval.filter(|s| *s > 0) {
      config.price_poll_secs = secs;
    }
    if let Some(policy) = self.rate_refresh {
      config.rate_refresh = policy;
    }
    if let Some(threshold) = self.threshold {
      config.rounding = config.rounding.with_threshold(threshold);
    }
    config
  }
}

/// Prints notices to stderr
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
  fn notify(&self, notice: &Notice) {
    let line = notice.to_string();
    match notice {
      Notice::Validation(_) | Notice::SubmitFailed(_) => eprintln!("{}", line.red()),
      Notice::StaleFeed { .. } => eprintln!("{}", line.yellow()),
      Notice::Submitted { .. } => eprintln!("{}", line.green()),
    }
  }
}

/// Client and tracker wired from configuration
pub struct Session {
  pub client: QuoteClient,
  pub tracker: ConversionTracker,
  pub notifier: Arc<ConsoleNotifier>,
}

impl Session {
  pub fn new(args: &TrackerArgs, config: Config) -> Result<Self> {
    let config = args.apply_to(config);
    let client = QuoteClient::new(config)?;
    let settings =
      TrackerSettings { asset: args.symbol(), ..TrackerSettings::from_config(client.config()) };
    let notifier = Arc::new(ConsoleNotifier);
    let tracker = ConversionTracker::with_notifier(
      Arc::new(client.prices()),
      Arc::new(client.rates()),
      settings,
      notifier.clone(),
    );
    Ok(Self { client, tracker, notifier })
  }
}

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

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

mod commands;
use commands::{apply::ApplyArgs, quote::QuoteArgs, watch::WatchArgs};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "dq")]
#[command(propagate_version = true)]
struct Cli {
  #[command(subcommand)]
  command: Commands,

  /// Verbose output
  #[arg(short, long, global = true)]
  verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Poll the feeds and print the rate on every refresh until Ctrl-C
  Watch(WatchArgs),

  /// Fetch both feeds once and convert a deposit amount
  Quote(QuoteArgs),

  /// Validate an application, quote its deposit and submit it
  Apply(ApplyArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
  // Load environment variables
  dotenv().ok();

  // Parse CLI arguments
  let cli = Cli::parse();

  // Initialize logging
  let log_level = if cli.verbose { "debug" } else { "info" };
  let filter = tracing_subscriber::EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
  tracing_subscriber::fmt().with_env_filter(filter).init();

  // Load configuration
  let config = dq_core::Config::from_env()?;

  // Execute command
  match cli.command {
    Commands::Watch(args) => commands::watch::execute(args, config).await?,
    Commands::Quote(args) => commands::quote::execute(args, config).await?,
    Commands::Apply(args) => commands::apply::execute(args, config).await?,
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use clap::CommandFactory;

  #[test]
  fn test_cli_definition() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_parse_quote() {
    let cli = Cli::try_parse_from(["dq", "-v", "quote", "--asset", "eth", "--amount", "750000"])
      .unwrap();
    assert!(cli.verbose);
    match cli.command {
      Commands::Quote(args) => {
        assert_eq!(args.amount, "750000");
        assert_eq!(args.tracker.asset, "eth");
      }
      other => panic!("unexpected command {:?}", other),
    }
  }

  #[test]
  fn test_parse_watch_overrides() {
    let cli =
      Cli::try_parse_from(["dq", "watch", "--interval", "5", "--rate-refresh", "60"]).unwrap();
    match cli.command {
      Commands::Watch(args) => {
        assert_eq!(args.tracker.interval, Some(5));
        assert_eq!(
          args.tracker.rate_refresh,
          Some(dq_core::RefreshPolicy::Every(std::time::Duration::from_secs(60)))
        );
      }
      other => panic!("unexpected command {:?}", other),
    }
  }

  #[test]
  fn test_apply_requires_form_fields() {
    assert!(Cli::try_parse_from(["dq", "apply", "--email", "a@b.jp"]).is_err());
  }
}

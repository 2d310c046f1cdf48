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

//! User-facing notices raised by the tracker

use tracing::{info, warn};

/// Something the user may want to see
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
  /// A conversion was requested before it could be computed
  Validation(String),
  /// A feed refresh failed; the last known value is still in use
  StaleFeed { feed: &'static str, error: String },
  /// The application was accepted by the submission endpoint
  Submitted { receipt_id: Option<String> },
  /// The submission endpoint rejected or could not be reached
  SubmitFailed(String),
}

impl std::fmt::Display for Notice {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Notice::Validation(msg) => write!(f, "{}", msg),
      Notice::StaleFeed { feed, error } => write!(f, "{} refresh failed: {}", feed, error),
      Notice::Submitted { receipt_id: Some(id) } => write!(f, "Application submitted ({})", id),
      Notice::Submitted { receipt_id: None } => write!(f, "Application submitted"),
      Notice::SubmitFailed(msg) => write!(f, "Submission failed: {}", msg),
    }
  }
}

/// Receiver for notices; implementations decide how to surface them
pub trait Notifier: Send + Sync {
  fn notify(&self, notice: &Notice);
}

/// Writes notices to the tracing log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
  fn notify(&self, notice: &Notice) {
    match notice {
      Notice::StaleFeed { .. } | Notice::SubmitFailed(_) => warn!("{}", notice),
      Notice::Validation(_) | Notice::Submitted { .. } => info!("{}", notice),
    }
  }
}

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

//! Owned background refresh tasks

use crate::tracker::Shared;
use dq_core::RefreshPolicy;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::debug;

/// Handle to one spawned refresh task.
///
/// The task is aborted exactly once: by `cancel`, or on drop if `cancel` was
/// never called.
#[derive(Debug)]
pub struct PollHandle {
  name: &'static str,
  task: Option<JoinHandle<()>>,
}

impl PollHandle {
  pub fn spawn<F>(name: &'static str, future: F) -> Self
  where
    F: Future<Output = ()> + Send + 'static,
  {
    debug!("Starting {} poll", name);
    Self { name, task: Some(tokio::spawn(future)) }
  }

  pub fn name(&self) -> &'static str {
    self.name
  }

  /// Whether the task has run to completion or been aborted
  pub fn is_finished(&self) -> bool {
    self.task.as_ref().is_none_or(|t| t.is_finished())
  }

  pub fn cancel(mut self) {
    self.abort();
  }

  fn abort(&mut self) {
    if let Some(task) = self.task.take() {
      task.abort();
      debug!("Stopped {} poll", self.name);
    }
  }
}

impl Drop for PollHandle {
  fn drop(&mut self) {
    self.abort();
  }
}

/// Refresh the asset price now, then every `period`
pub(crate) fn spawn_price_poll(shared: Arc<Shared>, period: Duration) -> PollHandle {
  PollHandle::spawn("asset-price", async move {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
      ticker.tick().await;
      shared.refresh_asset_price().await;
    }
  })
}

/// Refresh the reference rate now, then again per `policy`
pub(crate) fn spawn_rate_refresh(shared: Arc<Shared>, policy: RefreshPolicy) -> PollHandle {
  PollHandle::spawn("reference-rate", async move {
    match policy {
      RefreshPolicy::Once => {
        shared.refresh_reference_rate().await;
      }
      RefreshPolicy::Every(period) => {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
          ticker.tick().await;
          shared.refresh_reference_rate().await;
        }
      }
    }
  })
}

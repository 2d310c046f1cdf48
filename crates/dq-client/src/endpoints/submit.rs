//! Application submission endpoint

use crate::transport::Transport;
use dq_core::{Error, Result};
use dq_models::{ApplicationSubmission, SubmissionReceipt};
use std::sync::Arc;
use tracing::{info, instrument};
use url::Url;

const SOURCE: &str = "submission";

/// Posts completed applications to the configured endpoint
#[derive(Debug, Clone)]
pub struct SubmissionEndpoint {
  transport: Arc<Transport>,
  url: Url,
}

impl SubmissionEndpoint {
  pub fn new(transport: Arc<Transport>, url: &str) -> Result<Self> {
    let url = Url::parse(url).map_err(|e| Error::Config(format!("Invalid submit URL: {}", e)))?;
    Ok(Self { transport, url })
  }

  /// Send one application. An empty success body yields a default receipt.
  #[instrument(skip(self, submission), fields(asset = %submission.asset_symbol))]
  pub async fn submit(&self, submission: &ApplicationSubmission) -> Result<SubmissionReceipt> {
    let body = self.transport.post_json(SOURCE, &self.url, submission).await?;

    let receipt = if body.trim().is_empty() {
      SubmissionReceipt::default()
    } else {
      serde_json::from_str(&body).map_err(|e| Error::invalid_response(SOURCE, e.to_string()))?
    };

    info!("Application submitted, receipt id {:?}", receipt.id);
    Ok(receipt)
  }

  pub fn url(&self) -> &Url {
    &self.url
  }
}

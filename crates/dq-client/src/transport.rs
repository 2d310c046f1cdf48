//! HTTP transport shared by every endpoint

use dq_core::{Config, Error, Result};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};
use url::Url;

/// Maximum response characters echoed into logs and errors
const BODY_PREVIEW_LEN: usize = 200;

/// Thin wrapper over `reqwest::Client` that turns statuses and bodies into `dq_core::Error`
#[derive(Debug, Clone)]
pub struct Transport {
  client: Client,
  timeout: Duration,
}

impl Transport {
  /// Create a new transport with the configured timeout
  pub fn new(config: &Config) -> Result<Self> {
    let timeout = Duration::from_secs(config.timeout_secs);
    let client = Client::builder()
      .timeout(timeout)
      .user_agent(concat!("dq-client/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Self { client, timeout })
  }

  /// GET `url` and decode the JSON body
  #[instrument(skip(self), fields(url = %url))]
  pub async fn get_json<T>(&self, source: &str, url: &Url) -> Result<T>
  where
    T: DeserializeOwned,
  {
    let response = self
      .client
      .get(url.clone())
      .send()
      .await
      .map_err(|e| Error::Http(format!("Request to {} failed: {}", source, e)))?;

    let text = self.read_body(source, url, response).await?;
    decode(source, &text)
  }

  /// POST `body` as JSON to `url`, returning the raw response text
  #[instrument(skip(self, body), fields(url = %url))]
  pub async fn post_json<B>(&self, source: &str, url: &Url, body: &B) -> Result<String>
  where
    B: Serialize + ?Sized,
  {
    let response = self
      .client
      .post(url.clone())
      .json(body)
      .send()
      .await
      .map_err(|e| Error::Http(format!("Request to {} failed: {}", source, e)))?;

    self.read_body(source, url, response).await
  }

  async fn read_body(&self, source: &str, url: &Url, response: Response) -> Result<String> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
      warn!("{} rate limited the request", source);
      return Err(Error::RateLimit(source.to_string()));
    }

    if !status.is_success() {
      error!("{} responded with status {}", source, status);
      return Err(Error::Status { status: status.as_u16(), url: url.to_string() });
    }

    let text = response
      .text()
      .await
      .map_err(|e| Error::Http(format!("Failed to read response body: {}", e)))?;

    debug!("{} response body length: {} bytes", source, text.len());
    Ok(text)
  }

  /// Get request timeout duration
  pub fn timeout(&self) -> Duration {
    self.timeout
  }
}

fn decode<T: DeserializeOwned>(source: &str, text: &str) -> Result<T> {
  serde_json::from_str::<T>(text).map_err(|e| {
    let preview: String = text.chars().take(BODY_PREVIEW_LEN).collect();
    error!("Failed to parse {} response: {}", source, e);
    error!("Response text (first {} chars): {}", BODY_PREVIEW_LEN, preview);
    Error::invalid_response(source, format!("{}. Response: {}", e, preview))
  })
}

/// Join `path` onto `base`, keeping any path prefix the base already has
pub fn endpoint_url(base: &str, path: &str) -> Result<Url> {
  let joined = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
  Url::parse(&joined).map_err(|e| Error::Config(format!("Invalid endpoint URL {}: {}", joined, e)))
}

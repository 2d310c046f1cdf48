use thiserror::Error;

/// The main error type for dq-* crates
#[derive(Error, Debug)]
pub enum Error {
  /// Environment variable error
  #[error("Environment variable error: {0}")]
  EnvVar(#[from] std::env::VarError),

  /// Configuration error
  #[error("Configuration error: {0}")]
  Config(String),

  /// Serialization/Deserialization error
  #[error("Serialization error: {0}")]
  Serde(#[from] serde_json::Error),

  /// Missing required field in response
  #[error("Missing required field: {0}")]
  MissingField(String),

  /// Outbound rate limit exceeded
  #[error("Rate limit exceeded: {0}")]
  RateLimit(String),

  /// Invalid response from a feed
  #[error("Invalid response from {source_name}: {message}")]
  InvalidResponse { source_name: String, message: String },

  /// HTTP transport error
  #[error("HTTP error: {0}")]
  Http(String),

  /// Non-success HTTP status
  #[error("HTTP status {status} from {url}")]
  Status { status: u16, url: String },

  /// Parse error for feed values
  #[error("Parse error: {0}")]
  Parse(String),

  /// Unknown asset symbol
  #[error("Unsupported asset symbol: {0}")]
  UnknownAsset(String),
}

impl Error {
  /// Shorthand for an invalid response from a named source
  pub fn invalid_response(source_name: &str, message: impl Into<String>) -> Self {
    Error::InvalidResponse { source_name: source_name.to_string(), message: message.into() }
  }
}

/// Result type alias for dq-* crates
pub type Result<T> = std::result::Result<T, Error>;

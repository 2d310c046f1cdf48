pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, RefreshPolicy, RoundingPolicy};
pub use error::{Error, Result};
pub use types::{AssetSymbol, PriceSource};

/// Base URL for the asset ticker feed (Binance public REST API)
pub const PRICE_FEED_BASE_URL: &str = "https://api.binance.com";

/// Base URL for the reference exchange-rate feed
pub const RATE_FEED_BASE_URL: &str = "https://api.exchangerate-api.com";

/// Reference currency every asset is quoted in
pub const DEFAULT_REFERENCE_CURRENCY: &str = "USD";

/// Currency the applicant deposits in
pub const DEFAULT_LOCAL_CURRENCY: &str = "JPY";

/// Stable quote asset used to build ticker pairs
pub const QUOTE_ASSET: &str = "USDT";

/// Asset price poll cadence in seconds
pub const DEFAULT_PRICE_POLL_SECS: u64 = 10;

/// Derived amounts above this magnitude are shown without decimals
pub const DEFAULT_ROUNDING_THRESHOLD: u32 = 1000;

/// Outbound request budget shared by both feeds (requests per minute)
pub const DEFAULT_RATE_LIMIT: u32 = 120;

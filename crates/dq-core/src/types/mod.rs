//! Common types used across dq-* crates

pub mod asset;

pub use asset::{AssetSymbol, PriceSource};

//! # dq-models
//!
//! Wire models for the deposit quote workspace: the two pricing feeds the
//! tracker polls, and the application form it quotes for.

pub mod application;
pub mod rates;
pub mod submission;
pub mod ticker;

pub use application::{ApplicationForm, FieldError, Plan, ValidationErrors};
pub use rates::ExchangeRates;
pub use submission::{ApplicationSubmission, SubmissionReceipt};
pub use ticker::TickerPrice;

//! Data models for the bot core.
//!
//! This module contains strongly-typed representations of currencies and
//! their rates, the per-chat navigation state, the parsed conversion
//! request, and the wire models of the daily rate feed.

mod chat;
mod currency;
mod feed;
mod rate_table;
mod request;

pub use chat::{ChatId, ChatState};
pub use currency::{CurrencyCode, CurrencyInfo};
pub use feed::{DailyRates, QuoteEntry};
pub use rate_table::RateTable;
pub use request::ConversionRequest;

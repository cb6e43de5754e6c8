//! Conversational currency-conversion bot core.
//!
//! This crate implements the message-driven pipeline of a currency
//! converter bot: a per-chat navigation state machine, free-text command
//! dispatch, acquisition and normalization of the
//! [CBR daily rate feed](https://www.cbr-xml-daily.ru/), and the
//! conversion arithmetic with its reply formatting.
//!
//! The messaging transport stays external: the controller talks to it
//! through the [`dialog::Messenger`] trait and an abstract menu
//! specification, never through transport-specific payloads.

pub mod convert;
#[cfg(feature = "async")]
pub mod dialog;
pub mod error;
#[cfg(any(feature = "async", feature = "blocking"))]
pub mod feed;
pub mod models;
#[cfg(feature = "async")]
pub mod rates;
pub mod state;

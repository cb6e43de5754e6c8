//! Error types for the kursbot library.

use crate::models::{ChatId, CurrencyCode};

/// Convenience alias for results produced by this crate.
pub type Result<T> = core::result::Result<T, KursBotError>;

/// All errors that can occur inside the bot core.
#[derive(Debug, thiserror::Error)]
pub enum KursBotError {
    /// Underlying HTTP transport failed (connection refused, timeout, ...).
    #[cfg(any(feature = "async", feature = "blocking"))]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The rate feed answered with a non-success status.
    #[error("rate feed error: status {status}: {message}")]
    RateFeed {
        /// HTTP status code returned by the feed.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A currency code from user input is not present in the rate table.
    #[error("currency {currency} is not found")]
    CurrencyNotFound {
        /// The offending code, exactly as the user entered it (uppercased).
        currency: CurrencyCode,
    },

    /// The free-text command has fewer than the three required tokens.
    #[error("wrong message format: expected `BASE QUOTE AMOUNT`")]
    MissingTokens,

    /// The amount token could not be parsed as a floating-point number.
    #[error("amount has a wrong format: {token:?}")]
    InvalidAmount {
        /// The token that failed to parse.
        token: String,
    },

    /// A chat was referenced where a recorded state is required but none
    /// exists.
    #[error("no recorded state for chat {chat}")]
    UnknownChatState {
        /// The chat without a recorded state.
        chat: ChatId,
    },

    /// Chat state storage backend failed.
    #[error("state store error: {0}")]
    StateStore(Box<dyn core::error::Error + Send + Sync>),

    /// The outbound messaging capability failed.
    #[error("transport error: {0}")]
    Transport(Box<dyn core::error::Error + Send + Sync>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_from_serde_json() {
        let serde_err = serde_json::from_str::<String>("not json").unwrap_err();
        let err = KursBotError::from(serde_err);
        assert!(matches!(err, KursBotError::Serialization(_)));
        let msg = err.to_string();
        assert!(msg.contains("serialization error"));
    }

    #[test]
    fn error_rate_feed_display() {
        let err = KursBotError::RateFeed {
            status: 503,
            message: "maintenance".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("maintenance"));
    }

    #[test]
    fn error_currency_not_found_display() {
        let err = KursBotError::CurrencyNotFound {
            currency: CurrencyCode::new("XYZ"),
        };
        assert!(err.to_string().contains("XYZ"));
    }

    #[test]
    fn error_invalid_amount_display() {
        let err = KursBotError::InvalidAmount {
            token: "abc".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("wrong format"));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn error_unknown_chat_state_display() {
        let err = KursBotError::UnknownChatState {
            chat: ChatId::new(7),
        };
        assert!(err.to_string().contains('7'));
    }

    #[test]
    fn error_state_store_display() {
        let inner = std::io::Error::other("poisoned");
        let err = KursBotError::StateStore(Box::new(inner));
        assert!(err.to_string().contains("state store error"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<KursBotError>();
    }
}

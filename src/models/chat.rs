//! Chat identifier and per-chat navigation state.

use serde::{Deserialize, Serialize};

/// Unique identifier for a chat, as assigned by the messaging transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(i64);

impl ChatId {
    /// Creates a new identifier from the given value.
    #[inline]
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns a reference to the inner value.
    #[inline]
    #[must_use]
    pub const fn as_inner(&self) -> &i64 {
        &self.0
    }

    /// Consumes the wrapper and returns the inner value.
    #[inline]
    #[must_use]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for ChatId {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for ChatId {
    #[inline]
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Navigation state of one chat.
///
/// A chat with no recorded state at all is implicitly "unknown" — it has
/// never been greeted with `/start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChatState {
    /// The chat received the welcome message and sees the main menu.
    Started,
    /// The chat pressed the start button; free text is treated as a
    /// conversion request.
    Entered,
}

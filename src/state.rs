//! Per-chat navigation state storage.
//!
//! The controller never touches a map directly — it goes through the
//! [`ChatStateStore`] trait, so tests can substitute their own store and
//! the backing structure stays swappable.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{KursBotError, Result};
use crate::models::{ChatId, ChatState};

/// Associative store of per-chat navigation states.
///
/// All methods take `&self` — implementations should use interior
/// mutability (e.g. `Mutex`) for thread-safe mutation, which also
/// serializes accesses to any single chat's state.
pub trait ChatStateStore: core::fmt::Debug + Send + Sync {
    /// Returns the recorded state for the chat, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to read.
    fn get(&self, chat: ChatId) -> Result<Option<ChatState>>;

    /// Records the state for the chat, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to write.
    fn set(&self, chat: ChatId, state: ChatState) -> Result<()>;

    /// Returns the recorded state, failing when none exists.
    ///
    /// # Errors
    ///
    /// Returns [`KursBotError::UnknownChatState`] for a chat with no
    /// recorded state, or the backend's own read error.
    #[inline]
    fn require(&self, chat: ChatId) -> Result<ChatState> {
        self.get(chat)?
            .ok_or(KursBotError::UnknownChatState { chat })
    }
}

/// In-memory store backed by a mutex-guarded map.
///
/// No eviction: chat-id cardinality is small and bounded by the number of
/// concurrent users, and states live for the process lifetime.
#[derive(Debug, Default)]
pub struct InMemoryChatStateStore {
    /// All state behind a single mutex for thread-safe interior mutability.
    states: Mutex<HashMap<ChatId, ChatState>>,
}

impl InMemoryChatStateStore {
    /// Creates an empty store.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock and applies a closure.
    fn with_lock<R>(&self, f: impl FnOnce(&mut HashMap<ChatId, ChatState>) -> R) -> Result<R> {
        let mut states = self.states.lock().map_err(|err| lock_error(&err))?;
        Ok(f(&mut states))
    }
}

impl ChatStateStore for InMemoryChatStateStore {
    #[inline]
    fn get(&self, chat: ChatId) -> Result<Option<ChatState>> {
        self.with_lock(|states| states.get(&chat).copied())
    }

    #[inline]
    fn set(&self, chat: ChatId, state: ChatState) -> Result<()> {
        self.with_lock(|states| {
            let _previous = states.insert(chat, state);
        })
    }
}

/// Wraps a mutex poison error.
fn lock_error<T>(err: &std::sync::PoisonError<T>) -> KursBotError {
    KursBotError::StateStore(err.to_string().into())
}

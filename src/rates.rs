//! Rate-table provider with an explicit refresh policy.
//!
//! The historical behavior — refetch the feed on every single operation —
//! is preserved as the default policy, but callers can opt into a
//! time-based cache instead of hammering the feed on every keystroke.

use core::time::Duration;
use std::sync::Mutex;
use std::time::Instant;

use crate::error::Result;
use crate::feed::RateFeedClient;
use crate::models::RateTable;

/// Decides when a cached rate table may be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    /// Refetch the feed on every query.
    #[default]
    AlwaysFresh,
    /// Serve a cached table until it is older than the given duration.
    Ttl(Duration),
}

/// A fetched table together with the moment it was fetched.
#[derive(Debug, Clone)]
struct CachedTable {
    /// When the table was fetched.
    fetched_at: Instant,
    /// The normalized table.
    table: RateTable,
}

/// Serves rate tables according to a [`RefreshPolicy`].
///
/// The cache lock is only held across the check or the store, never across
/// the fetch itself, so unrelated chats are free to query concurrently.
#[derive(Debug)]
pub struct RateTableProvider {
    /// Feed client used for refetches.
    client: RateFeedClient,
    /// Cache policy.
    policy: RefreshPolicy,
    /// Last fetched table, if the policy caches at all.
    cache: Mutex<Option<CachedTable>>,
}

impl RateTableProvider {
    /// Creates a provider with the given client and policy.
    #[inline]
    #[must_use]
    pub const fn new(client: RateFeedClient, policy: RefreshPolicy) -> Self {
        Self {
            client,
            policy,
            cache: Mutex::new(None),
        }
    }

    /// Creates a provider that refetches on every query.
    #[inline]
    #[must_use]
    pub const fn always_fresh(client: RateFeedClient) -> Self {
        Self::new(client, RefreshPolicy::AlwaysFresh)
    }

    /// Returns a rate table, fetching from the feed when the policy
    /// requires it.
    ///
    /// # Errors
    ///
    /// Propagates feed errors ([`crate::error::KursBotError::RateFeed`],
    /// [`crate::error::KursBotError::Http`],
    /// [`crate::error::KursBotError::Serialization`]). A failed refresh
    /// never replaces an existing cached table.
    #[tracing::instrument(skip_all)]
    pub async fn table(&self) -> Result<RateTable> {
        if let RefreshPolicy::Ttl(ttl) = self.policy {
            if let Some(table) = self.cached_within(ttl) {
                tracing::trace!("serving cached rate table");
                return Ok(table);
            }
        }

        let table = self.client.fetch().await?;
        if matches!(self.policy, RefreshPolicy::Ttl(_)) {
            self.store(table.clone());
        }
        Ok(table)
    }

    /// Returns the cached table if it is younger than `ttl`.
    ///
    /// A poisoned cache lock counts as a cache miss.
    fn cached_within(&self, ttl: Duration) -> Option<RateTable> {
        let guard = self.cache.lock().ok()?;
        guard
            .as_ref()
            .filter(|cached| cached.fetched_at.elapsed() <= ttl)
            .map(|cached| cached.table.clone())
    }

    /// Replaces the cached table with a freshly fetched one.
    fn store(&self, table: RateTable) {
        if let Ok(mut guard) = self.cache.lock() {
            *guard = Some(CachedTable {
                fetched_at: Instant::now(),
                table,
            });
        }
    }
}

//! Currency code and per-currency rate information.

use serde::{Deserialize, Serialize};

/// Short uppercase currency identifier (e.g. "USD", "RUB").
///
/// Codes are normalized to ASCII uppercase on construction, so user input
/// like `usd` keys the same table entry as the feed's `USD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Creates a code from the given string, uppercasing it.
    #[inline]
    #[must_use]
    pub fn new<T: Into<String>>(code: T) -> Self {
        Self(code.into().to_ascii_uppercase())
    }

    /// Returns a reference to the inner string.
    #[inline]
    #[must_use]
    pub fn as_inner(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner string.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for CurrencyCode {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<&str> for CurrencyCode {
    #[inline]
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CurrencyCode {
    #[inline]
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Display name and per-unit rate of one currency.
///
/// `is_base` marks the table's base currency (the ruble). The rate of a
/// base entry is kept at `0.0` and is never read — conversion branches on
/// the tag, not on the rate value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyInfo {
    /// Human-readable name (e.g. "US Dollar").
    pub name: String,
    /// Value of one unit of this currency in rubles.
    pub units_per_rub: f64,
    /// Whether this entry is the base currency of the table.
    pub is_base: bool,
}

impl CurrencyInfo {
    /// Creates a quoted (non-base) currency entry.
    #[inline]
    #[must_use]
    pub fn quoted<T: Into<String>>(name: T, units_per_rub: f64) -> Self {
        Self {
            name: name.into(),
            units_per_rub,
            is_base: false,
        }
    }

    /// Creates the base-currency entry for the Russian ruble.
    #[inline]
    #[must_use]
    pub fn ruble() -> Self {
        Self {
            name: "Russian Ruble".to_owned(),
            units_per_rub: 0.0,
            is_base: true,
        }
    }
}

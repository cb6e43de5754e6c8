//! Normalized rate table keyed by currency code.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{CurrencyCode, CurrencyInfo, DailyRates};

/// Mapping of currency codes to display names and per-unit rates.
///
/// The ruble entry is always present and tagged as the base currency;
/// iteration order is sorted by code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    /// Entries keyed by uppercase code.
    entries: BTreeMap<CurrencyCode, CurrencyInfo>,
}

impl RateTable {
    /// Creates a table containing only the ruble base entry.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        let _previous = entries.insert(CurrencyCode::new("RUB"), CurrencyInfo::ruble());
        Self { entries }
    }

    /// Normalizes a feed payload into a table.
    ///
    /// Each entry's per-unit rate is its quoted value divided by its
    /// nominal lot size; entries with a nonpositive nominal are skipped.
    /// The ruble base entry is injected afterwards, replacing any feed
    /// entry under the same code.
    #[must_use]
    pub fn from_daily(daily: DailyRates) -> Self {
        let mut table = Self::new();
        for entry in daily.valute.into_values() {
            if entry.nominal <= 0.0 {
                tracing::warn!(code = %entry.char_code, "skipping entry with nonpositive nominal");
                continue;
            }
            let rate = entry.value / entry.nominal;
            table.insert(
                CurrencyCode::new(entry.char_code),
                CurrencyInfo::quoted(entry.name, rate),
            );
        }
        // Reassert the base entry in case the feed ever quotes RUB itself.
        table.insert(CurrencyCode::new("RUB"), CurrencyInfo::ruble());
        table
    }

    /// Inserts or replaces an entry.
    #[inline]
    pub fn insert(&mut self, code: CurrencyCode, info: CurrencyInfo) {
        let _previous = self.entries.insert(code, info);
    }

    /// Returns the entry for the given code, if present.
    #[inline]
    #[must_use]
    pub fn get(&self, code: &CurrencyCode) -> Option<&CurrencyInfo> {
        self.entries.get(code)
    }

    /// Returns `true` if the code has an entry.
    #[inline]
    #[must_use]
    pub fn contains(&self, code: &CurrencyCode) -> bool {
        self.entries.contains_key(code)
    }

    /// Iterates over entries in code order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&CurrencyCode, &CurrencyInfo)> {
        self.entries.iter()
    }

    /// Returns the number of entries (the base entry included).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table holds no entries at all.
    ///
    /// Only reachable through deserialization — constructed tables always
    /// contain the base entry.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RateTable {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuoteEntry;
    use std::collections::HashMap;

    fn daily(entries: &[(&str, &str, f64, f64)]) -> DailyRates {
        let valute: HashMap<String, QuoteEntry> = entries
            .iter()
            .map(|&(code, name, value, nominal)| {
                (
                    code.to_owned(),
                    QuoteEntry {
                        char_code: code.to_owned(),
                        name: name.to_owned(),
                        value,
                        nominal,
                    },
                )
            })
            .collect();
        DailyRates { valute }
    }

    #[test]
    fn new_table_contains_only_ruble() {
        let table = RateTable::new();
        assert_eq!(table.len(), 1);
        let rub = table.get(&CurrencyCode::new("RUB")).unwrap();
        assert!(rub.is_base);
        assert_eq!(rub.name, "Russian Ruble");
    }

    #[test]
    fn from_daily_divides_by_nominal() {
        let table = RateTable::from_daily(daily(&[
            ("USD", "US Dollar", 90.0, 1.0),
            ("HUF", "Hungarian Forint", 25.0, 100.0),
        ]));
        let usd = table.get(&CurrencyCode::new("USD")).unwrap();
        assert!((usd.units_per_rub - 90.0).abs() < f64::EPSILON);
        let huf = table.get(&CurrencyCode::new("HUF")).unwrap();
        assert!((huf.units_per_rub - 0.25).abs() < f64::EPSILON);
        assert!(!usd.is_base);
    }

    #[test]
    fn from_daily_injects_ruble() {
        let table = RateTable::from_daily(daily(&[("USD", "US Dollar", 90.0, 1.0)]));
        assert!(table.contains(&CurrencyCode::new("RUB")));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn from_daily_ruble_entry_wins_over_feed() {
        let table = RateTable::from_daily(daily(&[("RUB", "Fake Ruble", 2.0, 1.0)]));
        let rub = table.get(&CurrencyCode::new("RUB")).unwrap();
        assert!(rub.is_base);
        assert_eq!(rub.name, "Russian Ruble");
    }

    #[test]
    fn from_daily_skips_nonpositive_nominal() {
        let table = RateTable::from_daily(daily(&[("BAD", "Broken", 10.0, 0.0)]));
        assert!(!table.contains(&CurrencyCode::new("BAD")));
    }

    #[test]
    fn iteration_is_sorted_by_code() {
        let table = RateTable::from_daily(daily(&[
            ("USD", "US Dollar", 90.0, 1.0),
            ("EUR", "Euro", 98.0, 1.0),
        ]));
        let codes: Vec<&str> = table.iter().map(|(code, _)| code.as_inner()).collect();
        assert_eq!(codes, vec!["EUR", "RUB", "USD"]);
    }
}

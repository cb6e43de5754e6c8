//! Wire models for the CBR daily JSON feed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One currency entry from the feed's `Valute` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteEntry {
    /// ISO-style character code (e.g. "USD").
    #[serde(rename = "CharCode")]
    pub char_code: String,
    /// Human-readable currency name.
    #[serde(rename = "Name")]
    pub name: String,
    /// Ruble value of one lot of the currency.
    #[serde(rename = "Value")]
    pub value: f64,
    /// Lot size the value applies to (e.g. rate quoted per 10 units).
    #[serde(rename = "Nominal")]
    pub nominal: f64,
}

/// Root payload of the daily feed: feed-specific codes mapped to entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRates {
    /// Currency entries keyed by the feed's own code.
    #[serde(rename = "Valute")]
    pub valute: HashMap<String, QuoteEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_daily_rates() {
        let json = r#"{
            "Valute": {
                "USD": {
                    "CharCode": "USD",
                    "Name": "US Dollar",
                    "Value": 90.5,
                    "Nominal": 1
                },
                "HUF": {
                    "CharCode": "HUF",
                    "Name": "Hungarian Forint",
                    "Value": 25.0,
                    "Nominal": 100
                }
            }
        }"#;
        let daily: DailyRates = serde_json::from_str(json).unwrap();
        assert_eq!(daily.valute.len(), 2);
        let usd = daily.valute.get("USD").unwrap();
        assert_eq!(usd.char_code, "USD");
        assert_eq!(usd.name, "US Dollar");
        assert!((usd.value - 90.5).abs() < f64::EPSILON);
        assert!((usd.nominal - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn deserialize_ignores_extra_fields() {
        let json = r#"{
            "Date": "2024-01-01T11:30:00+03:00",
            "Valute": {
                "EUR": {
                    "ID": "R01239",
                    "CharCode": "EUR",
                    "Name": "Euro",
                    "Value": 98.7,
                    "Nominal": 1,
                    "Previous": 98.1
                }
            }
        }"#;
        let daily: DailyRates = serde_json::from_str(json).unwrap();
        assert!(daily.valute.contains_key("EUR"));
    }

    #[test]
    fn missing_valute_is_an_error() {
        let result = serde_json::from_str::<DailyRates>(r#"{"Date": "2024-01-01"}"#);
        assert!(result.is_err());
    }
}

//! Parsed conversion request.

use super::CurrencyCode;

/// One parsed `BASE QUOTE AMOUNT` command.
///
/// Ephemeral: produced by the parser, consumed by the converter, never
/// stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    /// Currency being converted from.
    pub base: CurrencyCode,
    /// Currency being converted to.
    pub quote: CurrencyCode,
    /// Quantity of the base currency.
    pub amount: f64,
}

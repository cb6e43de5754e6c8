//! Free-text command parsing and conversion arithmetic.
//!
//! Both halves are stateless free functions: [`parse`] extracts a
//! [`ConversionRequest`] from one line of text, [`convert`] turns it into a
//! reply line against a given [`RateTable`]. Neither sends messages — all
//! user-facing messaging lives in the dialog controller.

use crate::error::{KursBotError, Result};
use crate::models::{ConversionRequest, CurrencyCode, CurrencyInfo, RateTable};

/// Parses a `BASE QUOTE AMOUNT` line into a [`ConversionRequest`].
///
/// The input is split on whitespace; currency tokens are uppercased, and
/// tokens beyond the third are ignored.
///
/// # Errors
///
/// Returns [`KursBotError::MissingTokens`] when fewer than three tokens are
/// present, and [`KursBotError::InvalidAmount`] when the third token is not
/// a floating-point number.
#[inline]
pub fn parse(text: &str) -> Result<ConversionRequest> {
    let mut tokens = text.split_whitespace();
    let (Some(base), Some(quote), Some(amount_token)) =
        (tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(KursBotError::MissingTokens);
    };
    let Ok(amount) = amount_token.parse::<f64>() else {
        return Err(KursBotError::InvalidAmount {
            token: amount_token.to_owned(),
        });
    };
    Ok(ConversionRequest {
        base: CurrencyCode::new(base),
        quote: CurrencyCode::new(quote),
        amount,
    })
}

/// Computes the converted amount, rounded to two decimal places.
///
/// Branches on the base-currency tag of each side:
/// ruble → ruble is the identity; converting to rubles multiplies by the
/// base rate; converting from rubles divides by the quote rate; anything
/// else goes through the cross rate.
///
/// Rounding is half-away-from-zero ([`f64::round`] semantics).
///
/// # Errors
///
/// Returns [`KursBotError::CurrencyNotFound`] naming whichever code is
/// absent from the table, the base checked first.
#[inline]
pub fn convert_value(table: &RateTable, request: &ConversionRequest) -> Result<f64> {
    let base = lookup(table, &request.base)?;
    let quote = lookup(table, &request.quote)?;

    let raw = if base.is_base && quote.is_base {
        request.amount
    } else if quote.is_base {
        request.amount * base.units_per_rub
    } else if base.is_base {
        request.amount / quote.units_per_rub
    } else {
        request.amount * base.units_per_rub / quote.units_per_rub
    };
    Ok(round2(raw))
}

/// Converts the request and renders the reply line, e.g.
/// `2.0 US Dollar = 180.0 Rubles`.
///
/// Ruble sides are labeled `Rubles`; other sides use the table's display
/// name for the currency.
///
/// # Errors
///
/// Returns [`KursBotError::CurrencyNotFound`] naming whichever code is
/// absent from the table, the base checked first.
#[inline]
pub fn convert(table: &RateTable, request: &ConversionRequest) -> Result<String> {
    let value = convert_value(table, request)?;
    let base = lookup(table, &request.base)?;
    let quote = lookup(table, &request.quote)?;

    Ok(format!(
        "{} {} = {} {}",
        format_number(request.amount),
        side_label(base),
        format_number(value),
        side_label(quote),
    ))
}

/// Looks up a code, producing the user-input error on a miss.
fn lookup<'table>(table: &'table RateTable, code: &CurrencyCode) -> Result<&'table CurrencyInfo> {
    table.get(code).ok_or_else(|| KursBotError::CurrencyNotFound {
        currency: code.clone(),
    })
}

/// Reply label for one side of the conversion.
fn side_label(info: &CurrencyInfo) -> &str {
    if info.is_base { "Rubles" } else { &info.name }
}

/// Rounds half-away-from-zero to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Renders a number with at least one and at most two decimal digits:
/// `180` → `"180.0"`, `1.25` → `"1.25"`.
fn format_number(value: f64) -> String {
    let cents = (value * 100.0).round();
    if (cents % 10.0).abs() < f64::EPSILON {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    }
}

//! Field-by-field parsing of product request bodies.
//!
//! Works on the raw JSON object so that an absent field, an explicit `null`
//! and a value of the wrong type each get their own message. Rule checks
//! from [`crate::validation`] run afterwards, only on fields that parsed.

use axum_helpers::FieldErrors;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

pub const NAME_MAX_CHARS: usize = 50;
pub const PRICE_MAX_DIGITS: u32 = 10;
pub const PRICE_DECIMAL_PLACES: u32 = 2;

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";
const NOT_BLANK: &str = "This field may not be blank.";
const NOT_A_STRING: &str = "Not a valid string.";
const NOT_A_NUMBER: &str = "A valid number is required.";

/// Whether fields that are required on create must be present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Create and PUT
    Full,
    /// PATCH
    Partial,
}

/// Parsed body; fields that were absent or failed to parse are `None`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductInput {
    pub name: Option<String>,
    /// `Some(None)` is an explicit `null`
    pub description: Option<Option<String>>,
    pub price: Option<Decimal>,
}

/// Parse a request body, collecting every field error.
///
/// Unknown and read-only keys (`id`, `created_at`, `updated_at`) are ignored.
pub fn parse_product(payload: &Map<String, Value>, requirement: Requirement) -> (ProductInput, FieldErrors) {
    let mut errors = FieldErrors::new();
    let mut input = ProductInput::default();

    match payload.get("name") {
        Some(value) => match parse_name(value) {
            Ok(name) => input.name = Some(name),
            Err(message) => errors.add("name", message),
        },
        None if requirement == Requirement::Full => errors.add("name", REQUIRED),
        None => {}
    }

    if let Some(value) = payload.get("description") {
        match parse_description(value) {
            Ok(description) => input.description = Some(description),
            Err(message) => errors.add("description", message),
        }
    }

    match payload.get("price") {
        Some(value) => match parse_price(value) {
            Ok(price) => input.price = Some(price),
            Err(message) => errors.add("price", message),
        },
        None if requirement == Requirement::Full => errors.add("price", REQUIRED),
        None => {}
    }

    (input, errors)
}

/// Scalars are coerced to text; containers and booleans are rejected
fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_name(value: &Value) -> Result<String, String> {
    if value.is_null() {
        return Err(NOT_NULL.to_string());
    }
    let name = coerce_string(value).ok_or_else(|| NOT_A_STRING.to_string())?;
    if name.is_empty() {
        return Err(NOT_BLANK.to_string());
    }
    if name.chars().count() > NAME_MAX_CHARS {
        return Err(format!(
            "Ensure this field has no more than {NAME_MAX_CHARS} characters."
        ));
    }
    Ok(name)
}

fn parse_description(value: &Value) -> Result<Option<String>, String> {
    if value.is_null() {
        return Ok(None);
    }
    coerce_string(value)
        .map(Some)
        .ok_or_else(|| NOT_A_STRING.to_string())
}

fn parse_price(value: &Value) -> Result<Decimal, String> {
    let raw = match value {
        Value::Null => return Err(NOT_NULL.to_string()),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(NOT_A_NUMBER.to_string()),
    };
    let Some(mut price) = parse_decimal(&raw) else {
        // Well-formed but wider than `Decimal` can hold: report the digit limit
        return match literal_precision(&raw) {
            Some((digits, scale)) => check_precision(digits, scale).and(Err(NOT_A_NUMBER.to_string())),
            None => Err(NOT_A_NUMBER.to_string()),
        };
    };
    let digits = price.mantissa().unsigned_abs().to_string().len() as u64;
    check_precision(digits, u64::from(price.scale()))?;
    price.rescale(PRICE_DECIMAL_PLACES);
    Ok(price)
}

/// Plain or scientific notation
pub(crate) fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Significant digits and scale of a decimal literal such as `-0012.50e3`.
///
/// Leading zeros are not significant; trailing zeros are. A non-negative
/// exponent folds into the digits with scale 0.
fn literal_precision(raw: &str) -> Option<(u64, u64)> {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    let (number, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((number, exponent)) => (number, exponent.parse::<i64>().ok()?),
        None => (unsigned, 0),
    };
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }

    let significant = format!("{whole}{fraction}");
    let significant = significant.trim_start_matches('0');
    let digits = significant.len().max(1) as i64;
    let exponent = exponent.saturating_sub(fraction.len() as i64);

    if exponent >= 0 {
        Some((digits.saturating_add(exponent) as u64, 0))
    } else {
        Some((digits as u64, exponent.unsigned_abs()))
    }
}

/// Digit limits of a `NUMERIC(10, 2)` column, checked in order
fn check_precision(digits: u64, scale: u64) -> Result<(), String> {
    let (total, whole) = if digits > scale {
        (digits, digits - scale)
    } else {
        (scale, 0)
    };

    if total > u64::from(PRICE_MAX_DIGITS) {
        return Err(format!(
            "Ensure that there are no more than {PRICE_MAX_DIGITS} digits in total."
        ));
    }
    if scale > u64::from(PRICE_DECIMAL_PLACES) {
        return Err(format!(
            "Ensure that there are no more than {PRICE_DECIMAL_PLACES} decimal places."
        ));
    }
    let max_whole = PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES;
    if whole > u64::from(max_whole) {
        return Err(format!(
            "Ensure that there are no more than {max_whole} digits before the decimal point."
        ));
    }
    Ok(())
}

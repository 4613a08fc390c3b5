//! Value conversions between Porkbun wire data and adapter types

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Lower-cased, trimmed fully-qualified name
pub fn normalize_domain(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Registration cost in minor currency units (cents)
///
/// Computes `price * 100 * years` on the exact decimal value of `price`
/// and rounds half-up to a whole number. Returns `None` when `price` is not
/// a plain decimal number or the result does not fit in an `i64`.
pub fn cost_in_pennies(price: &str, years: u32) -> Option<i64> {
    let price = price.trim();
    let (negative, digits) = match price.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, price.strip_prefix('+').unwrap_or(price)),
    };

    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // price == mantissa / 10^scale
    let mantissa: i128 = format!("{}{}", whole, fraction).parse().ok()?;
    let divisor = 10i128.checked_pow(u32::try_from(fraction.len()).ok()?)?;
    let scaled = mantissa.checked_mul(100)?.checked_mul(i128::from(years))?;

    let mut cents = scaled / divisor;
    if (scaled % divisor) * 2 >= divisor {
        cents += 1;
    }
    if negative {
        cents = -cents;
    }

    i64::try_from(cents).ok()
}

/// Whole number of years from a wire value such as `"2"`, `2` or `"2.0"`
pub fn parse_years(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if let Ok(years) = raw.parse::<u32>() {
        return Some(years);
    }
    let years = raw.parse::<f64>().ok()?;
    if years.fract() == 0.0 && years >= 0.0 && years <= f64::from(u32::MAX) {
        Some(years as u32)
    } else {
        None
    }
}

/// Parse a Porkbun timestamp, interpreted as UTC
///
/// Accepts `YYYY-MM-DD HH:MM:SS` (what the API sends), RFC 3339, and a bare
/// `YYYY-MM-DD`. Blank or unrecognised input yields `None`.
pub fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Text of a loosely-typed scalar (`"1"`, `1` and `true` all become `"1"`)
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(if *flag { "1" } else { "0" }.to_string()),
        _ => None,
    }
}

/// Serde adapter for fields Porkbun sends as either strings or numbers
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_text))
}

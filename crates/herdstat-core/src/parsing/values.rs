use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Parse a quantity string from an upstream record into a Decimal.
///
/// Handles formats like:
/// - "1520" -> 1520
/// - "1520.5" -> 1520.5
/// - "1520,5" -> 1520.5 (decimal comma)
/// - "1.5e3" -> 1500
///
/// Returns None for empty or non-numeric text.
pub fn parse_quantity(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let normalized = if s.contains(',') && !s.contains('.') {
        s.replace(',', ".")
    } else {
        s.replace(',', "")
    };
    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .ok()
}

fn quantity_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_quantity(&n.to_string()),
        Value::String(s) => parse_quantity(s),
        _ => None,
    }
}

/// Serde adapter: JSON number or numeric string -> Decimal. Anything else is zero.
pub fn deserialize_quantity<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let parsed = raw.as_ref().and_then(quantity_from_value);
    if parsed.is_none() {
        if let Some(v) = raw.as_ref().filter(|v| !v.is_null()) {
            tracing::warn!(value = %v, "unparseable quantity treated as zero");
        }
    }
    Ok(parsed.unwrap_or(Decimal::ZERO))
}

/// Serde adapter: string, number or bool -> trimmed text. Empty text becomes None.
pub fn deserialize_loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let text = match raw {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => return Ok(None),
    };
    Ok(if text.is_empty() { None } else { Some(text) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_integer() {
        assert_eq!(parse_quantity("1520"), Some(dec!(1520)));
    }

    #[test]
    fn test_decimal() {
        assert_eq!(parse_quantity("1520.5"), Some(dec!(1520.5)));
    }

    #[test]
    fn test_decimal_comma() {
        assert_eq!(parse_quantity("12,5"), Some(dec!(12.5)));
    }

    #[test]
    fn test_thousands_separator_with_point() {
        assert_eq!(parse_quantity("1,520.5"), Some(dec!(1520.5)));
    }

    #[test]
    fn test_scientific() {
        assert_eq!(parse_quantity("1.5e3"), Some(dec!(1500)));
    }

    #[test]
    fn test_whitespace_trimming() {
        assert_eq!(parse_quantity("  68  "), Some(dec!(68)));
    }

    #[test]
    fn test_empty_and_garbage() {
        assert!(parse_quantity("").is_none());
        assert!(parse_quantity("n/a").is_none());
    }

    #[test]
    fn test_json_number_is_exact() {
        assert_eq!(
            quantity_from_value(&serde_json::json!(0.1)),
            Some(dec!(0.1))
        );
    }
}

// Display formatting helpers.
// Number rendering, currency, price ranges, version comparison and discount display.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Render a number the way it is written into storage and query strings:
/// integral values without a fraction, non-finite values by name.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let name = if n > 0.0 { "Infinity" } else { "-Infinity" };
        name.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        format!("{}", n)
    }
}

/// Render a JSON node as flat text (strings unquoted, arrays comma-joined).
pub fn json_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n
            .as_f64()
            .map(number_to_string)
            .unwrap_or_else(|| n.to_string()),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(json_to_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Format an amount held in minor units, e.g. cents to yuan with two decimals.
pub fn currency(v: f64, division: f64, precision: usize) -> String {
    format!("{:.*}", precision, v / division)
}

/// Format an amount in cents with two decimals.
pub fn currency_cents(v: i64) -> String {
    currency(v as f64, 100.0, 2)
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Render the range; a single price when both bounds match.
    /// `${min}` and `${max}` in `format` are substituted (default `${min}~${max}`).
    pub fn display(&self, format: Option<&str>) -> String {
        if self.min == self.max {
            return number_to_string(self.min);
        }
        format
            .unwrap_or("${min}~${max}")
            .replace("${min}", &number_to_string(self.min))
            .replace("${max}", &number_to_string(self.max))
    }
}

/// Compare dotted version strings segment by segment.
/// Missing or non-numeric segments count as zero.
pub fn compare_version(v1: &str, v2: &str) -> Ordering {
    let left: Vec<&str> = v1.split('.').collect();
    let right: Vec<&str> = v2.split('.').collect();
    let len = left.len().max(right.len());

    for i in 0..len {
        let a = left.get(i).map_or(0, |s| parse_segment(s));
        let b = right.get(i).map_or(0, |s| parse_segment(s));
        match a.cmp(&b) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

fn parse_segment(segment: &str) -> u64 {
    segment.trim().parse().unwrap_or(0)
}

/// Truncate (not round) to `digit` decimal places.
pub fn format_float(num: f64, digit: i32) -> f64 {
    let m = 10f64.powi(digit);
    (num * m).trunc() / m
}

/// Parse the leading numeric part of a discount such as `"8.5折"`.
pub fn parse_discount(v: &str) -> Option<f64> {
    let v = v.trim_start();
    let end = v
        .char_indices()
        .take_while(|&(i, c)| c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+')))
        .map(|(i, c)| i + c.len_utf8())
        .last()?;

    // Allow a trailing dot or a second dot by backing off to the longest valid prefix.
    (1..=end)
        .rev()
        .filter(|&i| v.is_char_boundary(i))
        .find_map(|i| v[..i].parse::<f64>().ok())
}

/// Turn a ten-point discount ("85" meaning 8.5) into a two-decimal rate string.
pub fn computed_discount(v: &str) -> String {
    let trimmed = v.trim();
    let n = if trimmed.is_empty() {
        0.0
    } else {
        trimmed.parse::<f64>().unwrap_or(f64::NAN)
    };
    format!("{:.2}", format_float(n / 10.0, 2))
}

/// Stable key for a parameter map: values ordered by sorted key, joined with `_`.
pub fn map_key(obj: &Map<String, Value>) -> String {
    let mut keys: Vec<&String> = obj.keys().collect();
    keys.sort();
    keys.into_iter()
        .map(|key| json_to_text(&obj[key.as_str()]))
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_to_string() {
        assert_eq!(number_to_string(5.0), "5");
        assert_eq!(number_to_string(-0.0), "0");
        assert_eq!(number_to_string(1.5), "1.5");
        assert_eq!(number_to_string(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(number_to_string(f64::NAN), "NaN");
        assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_currency() {
        assert_eq!(currency_cents(12345), "123.45");
        assert_eq!(currency_cents(5), "0.05");
        assert_eq!(currency(1500.0, 1000.0, 1), "1.5");
    }

    #[test]
    fn test_price_range() {
        assert_eq!(PriceRange::new(10.0, 10.0).display(None), "10");
        assert_eq!(PriceRange::new(10.0, 20.5).display(None), "10~20.5");
        assert_eq!(
            PriceRange::new(1.0, 2.0).display(Some("from ${min} to ${max}, min ${min}")),
            "from 1 to 2, min 1"
        );
    }

    #[test]
    fn test_compare_version() {
        assert_eq!(compare_version("1.2.3", "1.2.3"), Ordering::Equal);
        assert_eq!(compare_version("1.10.0", "1.9.9"), Ordering::Greater);
        assert_eq!(compare_version("2.0", "2.0.1"), Ordering::Less);
        assert_eq!(compare_version("2.0.0", "2"), Ordering::Equal);
    }

    #[test]
    fn test_format_float_truncates() {
        assert_eq!(format_float(1.239, 2), 1.23);
        assert_eq!(format_float(-1.239, 2), -1.23);
        assert_eq!(format_float(8.5, 0), 8.0);
    }

    #[test]
    fn test_parse_discount() {
        assert_eq!(parse_discount("8.5"), Some(8.5));
        assert_eq!(parse_discount(" 9折"), Some(9.0));
        assert_eq!(parse_discount("7.5.1"), Some(7.5));
        assert_eq!(parse_discount("abc"), None);
    }

    #[test]
    fn test_computed_discount() {
        assert_eq!(computed_discount("85"), "8.50");
        assert_eq!(computed_discount("9"), "0.90");
        assert_eq!(computed_discount(""), "0.00");
        assert_eq!(computed_discount("x"), "NaN");
    }

    #[test]
    fn test_map_key() {
        let obj = json!({ "size": 2, "color": "red", "tags": ["a", "b"], "gift": null });
        let Value::Object(map) = obj else {
            unreachable!()
        };
        assert_eq!(map_key(&map), "red__2_a,b");
    }
}

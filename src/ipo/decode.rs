//! Lenient field decoders for IPO records.
//!
//! Upstream IPO documents are loosely typed: numbers arrive as strings,
//! objects arrive as `null` or as the wrong shape. Every decoder here maps a
//! value it cannot use to `None` instead of failing the whole record.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Decode a nested object or scalar, or `None` if the value has the wrong
/// shape. Arrays are always the wrong shape: derived structs would
/// otherwise accept them positionally.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() || value.is_array() {
        return Ok(None);
    }
    Ok(T::deserialize(value).ok())
}

/// Decode a sequence, skipping elements that don't decode as `T`.
/// A non-array value decodes as `None`.
pub fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| T::deserialize(item).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}

/// Decode a sequence of records, skipping elements that are not JSON
/// objects or don't decode as `T`. A non-array value decodes as `None`.
pub fn lenient_object_seq<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter(Value::is_object)
                .filter_map(|item| T::deserialize(item).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}

/// Decode a finite number from a JSON number or a numeric string.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_from_value(&Value::deserialize(deserializer)?))
}

/// Decode an integer from an integral JSON number or an integer string.
pub fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match &value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

// `2024.0` is a year; `2023.5` is not.
fn integral(n: f64) -> Option<i64> {
    let fits = n >= i64::MIN as f64 && n < i64::MAX as f64;
    (n.fract() == 0.0 && fits).then_some(n as i64)
}

pub fn number_from_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "lenient_number")]
        n: Option<f64>,
        #[serde(default, deserialize_with = "lenient_integer")]
        i: Option<i64>,
        #[serde(default, deserialize_with = "lenient_seq")]
        items: Option<Vec<u32>>,
        #[serde(default, deserialize_with = "lenient")]
        point: Option<Point>,
        #[serde(default, deserialize_with = "lenient_object_seq")]
        points: Option<Vec<Point>>,
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Point {
        #[serde(default, deserialize_with = "lenient_number")]
        x: Option<f64>,
    }

    fn probe(value: Value) -> Probe {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_number_accepts_numbers_and_numeric_strings() {
        assert_eq!(probe(json!({"n": 60})).n, Some(60.0));
        assert_eq!(probe(json!({"n": 12.5})).n, Some(12.5));
        assert_eq!(probe(json!({"n": " 42 "})).n, Some(42.0));
    }

    #[test]
    fn test_number_rejects_garbage() {
        assert_eq!(probe(json!({"n": "abc"})).n, None);
        assert_eq!(probe(json!({"n": "NaN"})).n, None);
        assert_eq!(probe(json!({"n": "inf"})).n, None);
        assert_eq!(probe(json!({"n": true})).n, None);
        assert_eq!(probe(json!({"n": null})).n, None);
        assert_eq!(probe(json!({})).n, None);
    }

    #[test]
    fn test_integer() {
        assert_eq!(probe(json!({"i": 2024})).i, Some(2024));
        assert_eq!(probe(json!({"i": "2023"})).i, Some(2023));
        assert_eq!(probe(json!({"i": 2024.0})).i, Some(2024));
        assert_eq!(probe(json!({"i": 2023.5})).i, None);
        assert_eq!(probe(json!({"i": 1e300})).i, None);
        assert_eq!(probe(json!({"i": "FY24"})).i, None);
    }

    #[test]
    fn test_seq_skips_bad_elements() {
        assert_eq!(probe(json!({"items": [1, "x", 3]})).items, Some(vec![1, 3]));
        assert_eq!(probe(json!({"items": "nope"})).items, None);
    }

    #[test]
    fn test_object_rejects_arrays() {
        assert_eq!(probe(json!({"point": {"x": 1}})).point, Some(Point { x: Some(1.0) }));
        assert_eq!(probe(json!({"point": [1]})).point, None);
        assert_eq!(probe(json!({"point": "1"})).point, None);
    }

    #[test]
    fn test_object_seq_skips_non_objects() {
        let points = probe(json!({"points": [{"x": 1}, [2], 3, null, {"x": "4"}]})).points;
        assert_eq!(points, Some(vec![Point { x: Some(1.0) }, Point { x: Some(4.0) }]));
        assert_eq!(probe(json!({"points": {"x": 1}})).points, None);
    }
}

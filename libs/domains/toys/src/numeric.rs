//! Serde helpers for the numeric listing fields.
//!
//! Clients send `quantity`, `price` and `ratings` either as JSON numbers or as
//! numeric strings (`"25"`, `"4.5"`). Both are accepted and stored as numbers;
//! anything else is rejected.

use serde::{
    Deserialize, Deserializer,
    de::{Error, IgnoredAny},
};

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl Raw {
    fn is_blank(&self) -> bool {
        matches!(self, Raw::Text(s) if s.trim().is_empty())
    }

    fn to_i64(&self) -> Option<i64> {
        match self {
            Raw::Int(i) => Some(*i),
            Raw::Float(f) => whole(*f),
            Raw::Text(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(whole))
            }
            Raw::Other(_) => None,
        }
    }

    fn to_f64(&self) -> Option<f64> {
        match self {
            Raw::Int(i) => Some(*i as f64),
            Raw::Float(f) => Some(*f).filter(|f| f.is_finite()),
            Raw::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            Raw::Other(_) => None,
        }
    }
}

fn whole(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64)
        .then_some(f as i64)
}

/// Whole number or numeric string. `null`, a missing field or a blank string is `None`.
pub fn strict_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.is_blank() => Ok(None),
        Some(raw) => raw
            .to_i64()
            .map(Some)
            .ok_or_else(|| D::Error::custom("expected a whole number or a numeric string")),
    }
}

/// Finite number or numeric string. `null`, a missing field or a blank string is `None`.
pub fn strict_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.is_blank() => Ok(None),
        Some(raw) => raw
            .to_f64()
            .map(Some)
            .ok_or_else(|| D::Error::custom("expected a number or a numeric string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Strict {
        #[serde(default, deserialize_with = "strict_i64")]
        quantity: Option<i64>,
        #[serde(default, deserialize_with = "strict_f64")]
        price: Option<f64>,
    }

    fn strict(value: serde_json::Value) -> Result<Strict, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn strict_accepts_numbers_and_numeric_strings() {
        let parsed = strict(json!({ "quantity": "10", "price": "25" })).unwrap();
        assert_eq!(parsed.quantity, Some(10));
        assert_eq!(parsed.price, Some(25.0));

        let parsed = strict(json!({ "quantity": 3, "price": 4.5 })).unwrap();
        assert_eq!(parsed.quantity, Some(3));
        assert_eq!(parsed.price, Some(4.5));

        let parsed = strict(json!({ "quantity": " 7.0 ", "price": "0.99" })).unwrap();
        assert_eq!(parsed.quantity, Some(7));
        assert_eq!(parsed.price, Some(0.99));
    }

    #[test]
    fn strict_treats_missing_null_and_blank_as_absent() {
        let parsed = strict(json!({ "quantity": null, "price": "  " })).unwrap();
        assert_eq!(parsed.quantity, None);
        assert_eq!(parsed.price, None);

        let parsed = strict(json!({})).unwrap();
        assert_eq!(parsed.quantity, None);
        assert_eq!(parsed.price, None);
    }

    #[test]
    fn strict_rejects_non_numeric_values() {
        assert!(strict(json!({ "price": "cheap" })).is_err());
        assert!(strict(json!({ "price": true })).is_err());
        assert!(strict(json!({ "price": "inf" })).is_err());
        assert!(strict(json!({ "quantity": 2.5 })).is_err());
        assert!(strict(json!({ "quantity": [1] })).is_err());
    }
}

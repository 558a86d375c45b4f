//! Tolerant decoding of loosely-typed wire payloads.
//!
//! Payloads are parsed into [`serde_json::Value`] first and then decoded into
//! typed records. Scalar fields go through the `deserialize_with` helpers in
//! [`weak`], which accept the coercions the server emits in practice: numeric
//! strings for integers, `0`/`1` for booleans, numbers for strings and `null`
//! for the zero value.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde_json::Map;
use serde_json::Value;

use crate::DecodeError;

/// Decodes a generic value into `T`.
pub fn decode<T: DeserializeOwned>(value: Value) -> std::result::Result<T, DecodeError> {
    Ok(serde_json::from_value(value)?)
}

/// Decodes every entry of an object keyed by stringified integer ids.
///
/// All entries are decoded before anything is returned, so a single bad
/// entry fails the whole map.
pub fn decode_map<V: DeserializeOwned>(data: &Map<String, Value>) -> std::result::Result<BTreeMap<i64, V>, DecodeError> {
    let mut out = BTreeMap::new();
    for (key, value) in data {
        let id = i64::from_str(key.trim()).map_err(|_| DecodeError::InvalidKey(key.clone()))?;
        out.insert(id, decode(value.clone())?);
    }
    Ok(out)
}

/// Decodes every element of an array.
pub fn decode_slice<V: DeserializeOwned>(data: &[Value]) -> std::result::Result<Vec<V>, DecodeError> {
    data.iter().map(|v| decode(v.clone())).collect()
}

/// Short name of a value's JSON type, used in shape mismatch errors.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub mod weak {
    use serde::Deserialize;
    use serde::Deserializer;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Bool(bool),
        Int(i64),
        Float(f64),
        Str(String),
        Unit(()),
    }

    fn loose_to_int<E: serde::de::Error>(loose: Loose) -> Result<Option<i64>, E> {
        match loose {
            Loose::Unit(()) => Ok(None),
            Loose::Bool(b) => Ok(Some(b as i64)),
            Loose::Int(i) => Ok(Some(i)),
            Loose::Float(f) => Ok(Some(f as i64)),
            Loose::Str(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Ok(Some(0));
                }
                if let Ok(i) = s.parse::<i64>() {
                    return Ok(Some(i));
                }
                s.parse::<f64>()
                    .map(|f| Some(f as i64))
                    .map_err(|_| E::custom(format!("cannot parse '{s}' as int")))
            }
        }
    }

    fn loose_to_bool<E: serde::de::Error>(loose: Loose) -> Result<Option<bool>, E> {
        match loose {
            Loose::Unit(()) => Ok(None),
            Loose::Bool(b) => Ok(Some(b)),
            Loose::Int(i) => Ok(Some(i != 0)),
            Loose::Float(f) => Ok(Some(f != 0.0)),
            Loose::Str(s) => match s.trim() {
                "" => Ok(Some(false)),
                "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(Some(true)),
                "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(Some(false)),
                other => Err(E::custom(format!("cannot parse '{other}' as bool"))),
            },
        }
    }

    fn loose_to_string(loose: Loose) -> Option<String> {
        match loose {
            Loose::Unit(()) => None,
            Loose::Bool(b) => Some(if b { "1".to_string() } else { "0".to_string() }),
            Loose::Int(i) => Some(i.to_string()),
            Loose::Float(f) => Some(f.to_string()),
            Loose::Str(s) => Some(s),
        }
    }

    pub fn int<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        loose_to_int(Loose::deserialize(d)?).map(Option::unwrap_or_default)
    }

    pub fn opt_int<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        loose_to_int(Loose::deserialize(d)?)
    }

    pub fn bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        loose_to_bool(Loose::deserialize(d)?).map(Option::unwrap_or_default)
    }

    pub fn opt_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        loose_to_bool(Loose::deserialize(d)?)
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(loose_to_string(Loose::deserialize(d)?).unwrap_or_default())
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(loose_to_string(Loose::deserialize(d)?))
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<Loose>),
        One(Loose),
    }

    impl OneOrMany {
        fn into_vec(self) -> Vec<Loose> {
            match self {
                OneOrMany::Many(items) => items,
                OneOrMany::One(Loose::Unit(())) => Vec::new(),
                OneOrMany::One(item) => vec![item],
            }
        }
    }

    /// Sequence of strings. `null` decodes to an empty list and a lone scalar
    /// to a single-element list.
    pub fn strings<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        let raw = OneOrMany::deserialize(d)?;
        Ok(raw.into_vec().into_iter().filter_map(loose_to_string).collect())
    }

    /// Sequence of integers, with the same shape rules as [`strings`].
    pub fn ints<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<i64>, D::Error> {
        let raw = OneOrMany::deserialize(d)?;
        raw.into_vec()
            .into_iter()
            .filter_map(|l| loose_to_int::<D::Error>(l).transpose())
            .collect()
    }
}

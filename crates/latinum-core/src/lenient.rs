//! Forgiving `serde` field decoders for persisted values.
//!
//! Stored blobs may come from older versions, hand edits, or a browser that
//! serialized a `Set` as `{}`. Every helper here accepts any JSON shape and
//! maps what it cannot use to the documented default instead of failing the
//! whole record. Use them with `#[serde(default, deserialize_with = "...")]`.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Date format used for every stored calendar date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Interpret a JSON value as a non-negative counter.
///
/// Negative numbers clamp to 0, fractions are floored, numeric strings are
/// parsed. Anything else yields `None`.
pub fn count_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                Some(u32::try_from(v).unwrap_or(u32::MAX))
            } else if n.as_i64().is_some() {
                Some(0)
            } else {
                n.as_f64().map(float_to_count)
            }
        }
        Value::String(s) => s.trim().parse::<f64>().ok().map(float_to_count),
        _ => None,
    }
}

fn float_to_count(f: f64) -> u32 {
    if !f.is_finite() || f <= 0.0 {
        0
    } else if f >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        // In range and non-negative after the checks above.
        f.floor() as u32
    }
}

/// Interpret a JSON value as a rule number (a positive integer).
fn number_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|n| *n > 0)
}

/// Interpret a JSON value as a calendar date.
///
/// Accepts `YYYY-MM-DD` and full ISO-8601 timestamps (only the date part is
/// kept).
pub fn date_value(value: &Value) -> Option<NaiveDate> {
    let s = value.as_str()?.trim();
    let day = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(day, DATE_FORMAT).ok()
}

/// Decode a counter, defaulting to 0.
pub fn count<'de, D: Deserializer<'de>>(de: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(de)?;
    Ok(count_value(&value).unwrap_or(0))
}

/// Decode a boolean flag; anything but `true` is `false`.
pub fn flag<'de, D: Deserializer<'de>>(de: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(de)?;
    Ok(value.as_bool().unwrap_or(false))
}

/// Decode a required calendar date, accepting the same shapes as [`date_value`].
pub fn date<'de, D: Deserializer<'de>>(de: D) -> Result<NaiveDate, D::Error> {
    let value = Value::deserialize(de)?;
    date_value(&value).ok_or_else(|| D::Error::custom(format!("invalid date: {value}")))
}

/// Decode an optional calendar date; unparseable values become `None`.
pub fn optional_date<'de, D: Deserializer<'de>>(de: D) -> Result<Option<NaiveDate>, D::Error> {
    let value = Value::deserialize(de)?;
    Ok(date_value(&value))
}

/// Decode a set of rule numbers.
///
/// Arrays keep their valid members; objects (a serialized `Set`) and scalars
/// decode to the empty set.
pub fn number_set<'de, D: Deserializer<'de>>(de: D) -> Result<BTreeSet<u32>, D::Error> {
    let value = Value::deserialize(de)?;
    Ok(match value {
        Value::Array(items) => items.iter().filter_map(number_value).collect(),
        _ => BTreeSet::new(),
    })
}

/// Decode an ordered list of distinct rule numbers, keeping first occurrence.
pub fn number_list<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<u32>, D::Error> {
    let value = Value::deserialize(de)?;
    let mut out = Vec::new();
    if let Value::Array(items) = value {
        for n in items.iter().filter_map(number_value) {
            if !out.contains(&n) {
                out.push(n);
            }
        }
    }
    Ok(out)
}

/// Decode a map of name to score; entries with unusable scores are dropped.
pub fn score_map<'de, D: Deserializer<'de>>(de: D) -> Result<BTreeMap<String, u32>, D::Error> {
    let value = Value::deserialize(de)?;
    Ok(match value {
        Value::Object(map) => map
            .iter()
            .filter_map(|(k, v)| count_value(v).map(|score| (k.clone(), score)))
            .collect(),
        _ => BTreeMap::new(),
    })
}

/// Decode a set of string ids; arrays keep their string members.
pub fn id_set<'de, D: Deserializer<'de>>(de: D) -> Result<BTreeSet<String>, D::Error> {
    let value = Value::deserialize(de)?;
    Ok(match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => BTreeSet::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "count")]
        n: u32,
        #[serde(deserialize_with = "flag")]
        f: bool,
        #[serde(deserialize_with = "optional_date")]
        d: Option<NaiveDate>,
        #[serde(deserialize_with = "number_set")]
        set: BTreeSet<u32>,
        #[serde(deserialize_with = "number_list")]
        list: Vec<u32>,
        #[serde(deserialize_with = "score_map")]
        scores: BTreeMap<String, u32>,
        #[serde(deserialize_with = "id_set")]
        ids: BTreeSet<String>,
    }

    fn decode(value: serde_json::Value) -> Sample {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn counts_tolerate_odd_numbers() {
        assert_eq!(decode(json!({"n": 7})).n, 7);
        assert_eq!(decode(json!({"n": -3})).n, 0);
        assert_eq!(decode(json!({"n": 4.9})).n, 4);
        assert_eq!(decode(json!({"n": "12"})).n, 12);
        assert_eq!(decode(json!({"n": null})).n, 0);
        assert_eq!(decode(json!({"n": [1, 2]})).n, 0);
    }

    #[test]
    fn flag_only_accepts_true() {
        assert!(decode(json!({"f": true})).f);
        assert!(!decode(json!({"f": "yes"})).f);
        assert!(!decode(json!({"f": 1})).f);
    }

    #[test]
    fn dates_accept_plain_and_iso() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 3);
        assert_eq!(decode(json!({"d": "2024-01-03"})).d, expected);
        assert_eq!(decode(json!({"d": "2024-01-03T09:15:00.000Z"})).d, expected);
        assert_eq!(decode(json!({"d": "yesterday"})).d, None);
        assert_eq!(decode(json!({"d": 20240103})).d, None);
    }

    #[test]
    fn required_date_rejects_garbage() {
        #[derive(Deserialize)]
        struct Dated {
            #[serde(deserialize_with = "date")]
            day: NaiveDate,
        }
        let ok: Dated = serde_json::from_value(json!({"day": "2024-02-29T23:00:00Z"})).unwrap();
        assert_eq!(ok.day, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!(serde_json::from_value::<Dated>(json!({"day": "2024-02-30"})).is_err());
    }

    #[test]
    fn set_from_array_or_serialized_set() {
        let p = decode(json!({"set": [3, 1, 3, "7", -2, 0, "x"]}));
        assert_eq!(p.set.into_iter().collect::<Vec<_>>(), vec![1, 3, 7]);
        assert!(decode(json!({"set": {}})).set.is_empty());
        assert!(decode(json!({"set": 5})).set.is_empty());
    }

    #[test]
    fn list_deduplicates_in_order() {
        let p = decode(json!({"list": [9, 2, 9, 4]}));
        assert_eq!(p.list, vec![9, 2, 4]);
    }

    #[test]
    fn score_map_drops_garbage() {
        let p = decode(json!({"scores": {"trivia": 120, "memory": "oops", "matching": 40.5}}));
        assert_eq!(p.scores.len(), 2);
        assert_eq!(p.scores["trivia"], 120);
        assert_eq!(p.scores["matching"], 40);
    }

    #[test]
    fn id_set_keeps_strings() {
        let p = decode(json!({"ids": ["first-rule", 4, "game-starter"]}));
        assert_eq!(p.ids.len(), 2);
        assert!(p.ids.contains("first-rule"));
    }

    #[test]
    fn missing_fields_default() {
        let p = decode(json!({}));
        assert_eq!(p.n, 0);
        assert!(p.set.is_empty());
        assert!(p.d.is_none());
    }
}

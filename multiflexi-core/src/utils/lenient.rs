//! Tolerant serde deserializers for records emitted by the CLI.
//!
//! The tool is not strict about its JSON: numeric columns sometimes arrive as
//! strings, text columns as numbers, and any column may be `null`.
//! - `string`: string, number, bool or `null` -> `String`
//! - `int`: number, numeric string, bool or `null` -> `i64`

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes any scalar into a `String`; `null` becomes empty.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    })
}

/// Deserializes a number or numeric string into `i64`; `null` and blanks become 0.
pub fn int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Bool(b) => Ok(i64::from(b)),
        Value::Number(n) => n
            .as_i64()
            // Floats are truncated, the CLI emits counters as 3.0 occasionally
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or_else(|| Error::custom(format!("Invalid integer: {n}"))),
        Value::String(s) if s.trim().is_empty() => Ok(0),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|e| Error::custom(format!("Invalid integer {s:?}: {e}"))),
        other => Err(Error::custom(format!("Invalid integer: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "super::int")]
        id: i64,
        #[serde(default, deserialize_with = "super::string")]
        name: String,
    }

    #[test]
    fn accepts_mixed_scalars() {
        let row: Row = serde_json::from_str(r#"{"id":"42","name":7}"#).unwrap();
        assert_eq!(row.id, 42);
        assert_eq!(row.name, "7");

        let row: Row = serde_json::from_str(r#"{"id":null,"name":null}"#).unwrap();
        assert_eq!(row.id, 0);
        assert_eq!(row.name, "");
    }

    #[test]
    fn missing_fields_use_defaults() {
        let row: Row = serde_json::from_str("{}").unwrap();
        assert_eq!(row.id, 0);
        assert!(row.name.is_empty());
    }

    #[test]
    fn rejects_garbage_integers() {
        assert!(serde_json::from_str::<Row>(r#"{"id":"abc"}"#).is_err());
        assert!(serde_json::from_str::<Row>(r#"{"id":[1]}"#).is_err());
    }
}

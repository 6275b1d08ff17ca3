use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::text_utils::parse_date_time;

pub type RawRecord = BTreeMap<String, RawValue>;

/// Untyped front matter value, as handed over by whatever parsed the header.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Date(NaiveDateTime),
    List(Vec<RawValue>),
    Map(RawRecord),
}

impl RawValue {
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Integer(value)
    }
}

impl From<NaiveDateTime> for RawValue {
    fn from(value: NaiveDateTime) -> Self {
        RawValue::Date(value)
    }
}

impl<T: Into<RawValue>> From<Vec<T>> for RawValue {
    fn from(value: Vec<T>) -> Self {
        RawValue::List(value.into_iter().map(Into::into).collect())
    }
}

fn from_number(integer: Option<i64>, float: Option<f64>) -> RawValue {
    match (integer, float) {
        (Some(i), _) => RawValue::Integer(i),
        (None, Some(f)) => RawValue::Float(f),
        // Every number has an f64 form
        (None, None) => RawValue::Null,
    }
}

impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => RawValue::Null,
            Value::Bool(b) => RawValue::Bool(b),
            Value::Number(n) => from_number(n.as_i64(), n.as_f64()),
            Value::String(s) => RawValue::Text(s),
            Value::Array(items) => RawValue::List(items.into_iter().map(RawValue::from).collect()),
            Value::Object(map) => RawValue::Map(
                map.into_iter().map(|(k, v)| (k, RawValue::from(v))).collect()
            ),
        }
    }
}

impl From<serde_yaml::Value> for RawValue {
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;
        match value {
            Value::Null => RawValue::Null,
            Value::Bool(b) => RawValue::Bool(b),
            Value::Number(n) => from_number(n.as_i64(), n.as_f64()),
            Value::String(s) => RawValue::Text(s),
            Value::Sequence(items) => RawValue::List(items.into_iter().map(RawValue::from).collect()),
            Value::Mapping(map) => RawValue::Map(
                map.into_iter()
                    .filter_map(|(k, v)| yaml_key(k).map(|k| (k, RawValue::from(v))))
                    .collect()
            ),
            Value::Tagged(tagged) => RawValue::from(tagged.value),
        }
    }
}

fn yaml_key(key: serde_yaml::Value) -> Option<String> {
    use serde_yaml::Value;
    match key {
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl From<toml::Value> for RawValue {
    fn from(value: toml::Value) -> Self {
        use toml::Value;
        match value {
            Value::String(s) => RawValue::Text(s),
            Value::Integer(i) => RawValue::Integer(i),
            Value::Float(f) => RawValue::Float(f),
            Value::Boolean(b) => RawValue::Bool(b),
            // Time-only values stay text so validation reports them as malformed dates
            Value::Datetime(dt) => {
                let buf = dt.to_string();
                match parse_date_time(&buf) {
                    Ok(date) => RawValue::Date(date),
                    Err(_) => RawValue::Text(buf),
                }
            }
            Value::Array(items) => RawValue::List(items.into_iter().map(RawValue::from).collect()),
            Value::Table(table) => RawValue::Map(
                table.into_iter().map(|(k, v)| (k, RawValue::from(v))).collect()
            ),
        }
    }
}

/// Converts a parsed mapping into a record. Anything that is not a mapping
/// yields `None`.
pub fn into_record(value: RawValue) -> Option<RawRecord> {
    match value {
        RawValue::Map(map) => Some(map),
        RawValue::Null => Some(RawRecord::new()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let json = serde_json::json!({
            "title": "Hello",
            "count": 3,
            "ratio": 0.5,
            "tags": ["a", 1],
            "draft": false,
            "nothing": null,
        });
        let record = into_record(RawValue::from(json)).unwrap();
        assert_eq!(record["title"], RawValue::from("Hello"));
        assert_eq!(record["count"], RawValue::Integer(3));
        assert_eq!(record["ratio"], RawValue::Float(0.5));
        assert_eq!(record["tags"], RawValue::List(vec![RawValue::from("a"), RawValue::Integer(1)]));
        assert_eq!(record["draft"], RawValue::Bool(false));
        assert!(record["nothing"].is_null());
    }

    #[test]
    fn test_from_yaml_keeps_dates_as_text() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("pubDate: 2024-03-15\ntags: [astro]\n").unwrap();
        let record = into_record(RawValue::from(yaml)).unwrap();
        assert_eq!(record["pubDate"], RawValue::from("2024-03-15"));
        assert_eq!(record["tags"], RawValue::from(vec!["astro"]));
    }

    #[test]
    fn test_from_toml_native_dates() {
        let table: toml::Table = toml::from_str(r#"
pubDate = 2024-03-15
updatedDate = 2024-03-20T10:30:00Z
lunch = 12:30:00
"#).unwrap();
        let record = into_record(RawValue::from(toml::Value::Table(table))).unwrap();
        assert_eq!(record["pubDate"], RawValue::Date(parse_date_time("2024-03-15").unwrap()));
        assert_eq!(record["updatedDate"], RawValue::Date(parse_date_time("2024-03-20T10:30:00Z").unwrap()));
        assert_eq!(record["lunch"], RawValue::from("12:30:00"));
    }

    #[test]
    fn test_into_record_rejects_scalars() {
        assert!(into_record(RawValue::from("just text")).is_none());
        assert!(into_record(RawValue::List(vec![])).is_none());
        assert_eq!(into_record(RawValue::Null), Some(RawRecord::new()));
    }
}

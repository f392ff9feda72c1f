use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A typed value produced by coercing a command-line token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<ConfigValue>),
    Map(BTreeMap<String, ConfigValue>),
}

impl ConfigValue {
    pub fn as_map(&self) -> Option<&BTreeMap<String, ConfigValue>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }
}

/// Renders the literal spelling accepted on the command line, so that
/// top-level scalars coerce back to themselves.
impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "None"),
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            Self::Int(i) => write!(f, "{i}"),
            // Debug keeps the decimal point on integral floats.
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Str(s) => write!(f, "'{s}'"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "'{key}': {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<serde_json::Value> for ConfigValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::Str(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for ConfigValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl<T: Into<ConfigValue>> From<Vec<T>> for ConfigValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_render_as_literals() {
        assert_eq!(ConfigValue::Null.to_string(), "None");
        assert_eq!(ConfigValue::Bool(true).to_string(), "True");
        assert_eq!(ConfigValue::Int(-3).to_string(), "-3");
        assert_eq!(ConfigValue::Float(1.0).to_string(), "1.0");
        assert_eq!(ConfigValue::from("bob").to_string(), "'bob'");
    }

    #[test]
    fn compounds_render_nested() {
        let value = ConfigValue::Map(BTreeMap::from([
            ("a".to_string(), ConfigValue::from(vec![1i64, 2])),
            ("b".to_string(), ConfigValue::Bool(false)),
        ]));
        assert_eq!(value.to_string(), "{'a': [1, 2], 'b': False}");
    }

    #[test]
    fn json_numbers_keep_integer_kind() {
        let json: serde_json::Value = serde_json::from_str("[1, 2.0, 1e3]").unwrap();
        assert_eq!(
            ConfigValue::from(json),
            ConfigValue::List(vec![
                ConfigValue::Int(1),
                ConfigValue::Float(2.0),
                ConfigValue::Float(1000.0),
            ])
        );
    }

    #[test]
    fn serializes_as_plain_json() {
        let value = ConfigValue::Map(BTreeMap::from([
            ("n".to_string(), ConfigValue::Null),
            ("xs".to_string(), ConfigValue::from(vec!["a", "b"])),
        ]));
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"n":null,"xs":["a","b"]}"#
        );
    }
}

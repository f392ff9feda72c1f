use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ArgError, ArgResult};
use crate::value::ConfigValue;

static INT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+$").expect("static regex must compile"));
static FLOAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.\d*|\.\d+|\d+)(?:[eE][+-]?\d+)?$")
        .expect("static regex must compile")
});

type Rule = fn(&str) -> Option<ConfigValue>;

const RULES: &[(&str, Rule)] = &[
    ("keyword", keyword),
    ("integer", integer),
    ("float", float),
    ("list", list_literal),
    ("object", object_literal),
    ("quoted", quoted),
];

fn keyword(token: &str) -> Option<ConfigValue> {
    match token {
        "None" | "none" => Some(ConfigValue::Null),
        "True" | "true" => Some(ConfigValue::Bool(true)),
        "False" | "false" => Some(ConfigValue::Bool(false)),
        _ => None,
    }
}

fn integer(token: &str) -> Option<ConfigValue> {
    if !INT_RE.is_match(token) {
        return None;
    }
    match token.parse::<i64>() {
        Ok(i) => Some(ConfigValue::Int(i)),
        // Too wide for i64; the float rule picks it up.
        Err(_) => None,
    }
}

fn float(token: &str) -> Option<ConfigValue> {
    if !FLOAT_RE.is_match(token) {
        return None;
    }
    // Overflowing literals like `1e400` stay raw strings; JSON has no infinity.
    token
        .parse::<f64>()
        .ok()
        .filter(|x| x.is_finite())
        .map(ConfigValue::Float)
}

fn list_literal(token: &str) -> Option<ConfigValue> {
    if !(token.starts_with('[') && token.ends_with(']')) {
        return None;
    }
    match serde_json::from_str(token) {
        Ok(value @ serde_json::Value::Array(_)) => Some(value.into()),
        _ => None,
    }
}

fn object_literal(token: &str) -> Option<ConfigValue> {
    if !(token.starts_with('{') && token.ends_with('}')) {
        return None;
    }
    match serde_json::from_str(token) {
        Ok(value @ serde_json::Value::Object(_)) => Some(value.into()),
        _ => None,
    }
}

fn quoted(token: &str) -> Option<ConfigValue> {
    ['\'', '"'].into_iter().find_map(|quote| {
        token
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
            .map(ConfigValue::from)
    })
}

/// Coerces raw command-line tokens into [`ConfigValue`]s.
///
/// Rules are tried in order and the first one that matches wins. List and
/// object literals go through a strict JSON reader only, so Python-style
/// spellings inside them (`1.`, `.1`, `True`, `None`, bare keys) do not match
/// and the whole token falls back to a raw string. With `strict` set, that
/// fallback is an error instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueConverter {
    pub strict: bool,
}

impl ValueConverter {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    pub fn try_convert(&self, token: &str) -> ArgResult<ConfigValue> {
        let token = token.trim();
        for (name, rule) in RULES {
            if let Some(value) = rule(token) {
                tracing::trace!(token, rule = *name, "Coerced value");
                return Ok(value);
            }
        }
        if self.strict {
            return Err(ArgError::UnparsableValue(token.to_string()));
        }
        tracing::trace!(token, "No rule matched; keeping raw string");
        Ok(ConfigValue::Str(token.to_string()))
    }
}

/// Lenient coercion: anything no rule recognizes comes back as a string.
pub fn convert_value(token: &str) -> ConfigValue {
    ValueConverter::default()
        .try_convert(token)
        .unwrap_or_else(|_| ConfigValue::Str(token.trim().to_string()))
}

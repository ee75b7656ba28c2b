use std::{collections::HashMap, fmt};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Option lists by name, referenced by `select` and `list` schema nodes.
pub type OptionsCatalog = HashMap<String, Vec<TemplateOption>>;

/// One entry of an option list.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TemplateOption {
    pub key: OptionKey,
    /// Text shown in the spreadsheet and submitted back for selects.
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Key of an option.
///
/// The string form (see [`fmt::Display`]) is what takes part in combined keys.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(untagged)]
pub enum OptionKey {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Kind of an option key. Integer and float keys are both numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Boolean,
    Number,
    String,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            KeyKind::Boolean => "boolean",
            KeyKind::Number => "number",
            KeyKind::String => "string",
        };
        f.write_str(s)
    }
}

impl OptionKey {
    pub fn kind(&self) -> KeyKind {
        match self {
            OptionKey::Boolean(_) => KeyKind::Boolean,
            OptionKey::Integer(_) | OptionKey::Float(_) => KeyKind::Number,
            OptionKey::Text(_) => KeyKind::String,
        }
    }

    /// Convert the key into the JSON value placed in rebuilt answers.
    pub fn as_json(&self) -> Value {
        match self {
            OptionKey::Boolean(b) => Value::Bool(*b),
            OptionKey::Integer(i) => Value::from(*i),
            OptionKey::Float(f) => Value::from(*f),
            OptionKey::Text(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKey::Boolean(b) => write!(f, "{b}"),
            OptionKey::Integer(i) => write!(f, "{i}"),
            OptionKey::Float(v) => f.write_str(&number_string(*v)),
            OptionKey::Text(s) => f.write_str(s),
        }
    }
}

/// String form of a number as JavaScript's `String(n)` renders it.
///
/// Integral values print without a fraction, magnitudes from `1e21` up and
/// below `1e-6` switch to exponent notation with an explicit sign.
pub fn number_string(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }

    let abs = v.abs();
    if !(1e-6..1e21).contains(&abs) {
        let s = format!("{v:e}");
        return match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => s,
        };
    }
    format!("{v}")
}

impl From<&str> for OptionKey {
    fn from(value: &str) -> Self {
        OptionKey::Text(value.to_string())
    }
}

impl From<i64> for OptionKey {
    fn from(value: i64) -> Self {
        OptionKey::Integer(value)
    }
}

impl From<bool> for OptionKey {
    fn from(value: bool) -> Self {
        OptionKey::Boolean(value)
    }
}

impl TemplateOption {
    /// Build an option without description.
    pub fn new(key: impl Into<OptionKey>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            description: None,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Look up a property by name, as referenced from `<ins>` placeholders.
    pub fn property(&self, name: &str) -> Option<String> {
        match name {
            "key" => Some(self.key.to_string()),
            "label" => Some(self.label.clone()),
            "description" => self.description.clone(),
            _ => None,
        }
    }
}

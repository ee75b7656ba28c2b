//! Value post-processing rules.
//!
//! Spreadsheet answers sometimes need touching up before they fit the form:
//! links typed without a scheme, bullet lists typed with `*`. A rule picks the
//! fields it handles by combined key and rewrites their raw value. The
//! [`Unflattener`](crate::Unflattener) applies the first rule that matches an
//! `input` field.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Rewrites the raw value of matching input fields.
pub trait ValueRule: Send + Sync {
    /// Whether the rule handles the field with this combined key.
    fn matches(&self, field: &str) -> bool;

    /// Rewrite a raw answer.
    fn apply(&self, value: Value) -> Value;
}

/// Prefixes links that were entered without a scheme.
#[derive(Debug, Clone)]
pub struct UrlPrefixRule {
    fields: Vec<String>,
    prefix: String,
}

impl UrlPrefixRule {
    pub fn new(fields: impl IntoIterator<Item = impl Into<String>>, prefix: impl Into<String>) -> Self {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            prefix: prefix.into(),
        }
    }
}

impl ValueRule for UrlPrefixRule {
    fn matches(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    fn apply(&self, value: Value) -> Value {
        match value {
            Value::String(s) if !s.is_empty() && !s.contains("://") => {
                Value::String(format!("{}{s}", self.prefix))
            }
            other => other,
        }
    }
}

/// Bullet that replaces a line-leading `*`.
pub const BULLET: char = '•';

static LINE_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[^\S\n]*\*").expect("valid bullet pattern"));

static PLANNED_INTERVENTION_DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^planned_interventions__[^_]+(?:_[^_]+)*__description$")
        .expect("valid field pattern")
});

/// Turns `*` list markers into bullets in fields matching a pattern.
///
/// Leading horizontal whitespace before the marker is dropped, the rest of
/// each line is kept.
#[derive(Debug, Clone)]
pub struct BulletRule {
    pattern: Regex,
}

impl BulletRule {
    pub fn new(pattern: Regex) -> Self {
        Self { pattern }
    }
}

impl ValueRule for BulletRule {
    fn matches(&self, field: &str) -> bool {
        self.pattern.is_match(field)
    }

    fn apply(&self, value: Value) -> Value {
        match value {
            Value::String(s) => {
                Value::String(LINE_STAR.replace_all(&s, BULLET.to_string()).into_owned())
            }
            other => other,
        }
    }
}

/// Source link fields of the DREF application form.
pub fn source_link_fields() -> Vec<String> {
    (0..5)
        .map(|i| format!("source_information__source__{i}__source_link"))
        .collect()
}

/// Rules used by the DREF import templates.
pub fn dref_rules() -> Vec<Box<dyn ValueRule>> {
    vec![
        Box::new(UrlPrefixRule::new(source_link_fields(), "https://")),
        Box::new(BulletRule::new(PLANNED_INTERVENTION_DESCRIPTION.clone())),
    ]
}

/// Apply the first matching rule, or return `value` untouched.
pub fn apply_first(rules: &[Box<dyn ValueRule>], field: &str, value: Value) -> Value {
    match rules.iter().find(|r| r.matches(field)) {
        Some(rule) => rule.apply(value),
        None => value,
    }
}

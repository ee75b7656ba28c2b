use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One node of a template schema.
///
/// Serialized with a `type` tag, e.g. `{"type": "input", ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TemplateSchema {
    /// Structural node with named children.
    Object(ObjectField),
    /// Free-form scalar leaf.
    Input(InputField),
    /// Scalar leaf chosen from an option list.
    Select(SelectField),
    /// Child schema repeated once per option of an option list.
    List(ListField),
}

/// Scalar kind a leaf value is expected to have.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Validation {
    String,
    Date,
    TextArea,
    Integer,
    Number,
    Boolean,
}

/// Object node.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ObjectField {
    /// Child schemas in declaration order. `None` children are skipped.
    pub fields: IndexMap<String, Option<TemplateSchema>>,
}

/// Input leaf.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InputField {
    /// Label, may contain pseudo-HTML.
    pub label: String,
    /// Description, may contain pseudo-HTML.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Heading emitted right before this field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_before: Option<String>,
    pub validation: Validation,
}

/// Select leaf.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SelectField {
    /// Label, may contain pseudo-HTML.
    pub label: String,
    /// Description, may contain pseudo-HTML.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Heading emitted right before this field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_before: Option<String>,
    pub validation: Validation,
    /// Name of the option list the value is chosen from.
    pub options_key: String,
}

/// List node.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListField {
    /// Heading label. Not templated.
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Heading emitted right before this field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_before: Option<String>,
    /// Name of the option list the children are repeated over.
    pub options_key: String,
    /// When set, every rebuilt row carries the option key under this name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_field_name: Option<String>,
    /// Suppress the list's own heading.
    #[serde(default)]
    pub hidden_label: bool,
    /// Schema instantiated for every option.
    pub children: Box<TemplateSchema>,
}

impl TemplateSchema {
    /// Heading to emit before the node, if any. Object nodes have none.
    pub fn heading_before(&self) -> Option<&str> {
        match self {
            TemplateSchema::Object(_) => None,
            TemplateSchema::Input(f) => f.heading_before.as_deref(),
            TemplateSchema::Select(f) => f.heading_before.as_deref(),
            TemplateSchema::List(f) => f.heading_before.as_deref(),
        }
    }

    /// Option list referenced by `select` and `list` nodes.
    pub fn options_key(&self) -> Option<&str> {
        match self {
            TemplateSchema::Select(f) => Some(&f.options_key),
            TemplateSchema::List(f) => Some(&f.options_key),
            _ => None,
        }
    }
}

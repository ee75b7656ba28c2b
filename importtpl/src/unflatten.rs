//! Flat answers to nested value.
//!
//! Answers read from a filled template arrive as a flat map from combined key
//! to cell value. [`Unflattener`] walks the same schema the template was
//! generated from and reassembles the nested form value:
//!
//! - `select` cells hold option labels and are mapped back to option keys.
//! - `list` rows without any answer are dropped; a list without rows is
//!   absent rather than empty.
//! - `input` cells go through the configured [`ValueRule`]s.

use std::{collections::HashMap, sync::Arc};

use log::debug;
use serde_json::{Map, Value};

use crate::{
    data::{OptionsCatalog, TemplateSchema, error::Result, options::number_string},
    flatten::options_for,
    key::combine,
    rules::{ValueRule, apply_first, dref_rules},
};

/// Flat answers by combined key.
pub type FlatValues = HashMap<String, Value>;

/// Transform applied to every rebuilt list row.
pub type ListItemTransform = Arc<dyn Fn(Map<String, Value>) -> Map<String, Value> + Send + Sync>;

/// Name of the identifier attached by [`add_client_id`].
pub const CLIENT_ID: &str = "client_id";

/// Attach a fresh random `client_id` to a list row.
pub fn add_client_id(mut item: Map<String, Value>) -> Map<String, Value> {
    item.insert(
        CLIENT_ID.to_string(),
        Value::String(uuid::Uuid::new_v4().to_string()),
    );
    item
}

/// Whether a rebuilt value carries any answer.
///
/// `null`, empty strings and empty arrays carry nothing; objects carry an
/// answer when any member does.
pub fn has_some_defined_value(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => map.values().any(has_some_defined_value),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

/// Text of a cell as compared against option labels.
///
/// Numbers render as in JavaScript, so a float cell `2024.0` reads `2024`.
fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(u)) => u.to_string(),
            (None, None) => number_string(n.as_f64().unwrap_or(f64::NAN)),
        }),
        other => Some(other.to_string()),
    }
}

/// Rebuilds nested values from flat answers.
#[derive(Clone)]
pub struct Unflattener {
    rules: Arc<Vec<Box<dyn ValueRule>>>,
    list_item_transform: ListItemTransform,
}

impl Default for Unflattener {
    /// DREF value rules and a random `client_id` on every list row.
    fn default() -> Self {
        Self {
            rules: Arc::new(dref_rules()),
            list_item_transform: Arc::new(add_client_id),
        }
    }
}

impl Unflattener {
    /// An unflattener without rules that leaves list rows untouched.
    pub fn plain() -> Self {
        Self {
            rules: Arc::new(Vec::new()),
            list_item_transform: Arc::new(|item: Map<String, Value>| item),
        }
    }

    /// Replace the value rules.
    pub fn with_rules(mut self, rules: Vec<Box<dyn ValueRule>>) -> Self {
        self.rules = Arc::new(rules);
        self
    }

    /// Replace the list row transform.
    pub fn with_list_item_transform(
        mut self,
        transform: impl Fn(Map<String, Value>) -> Map<String, Value> + Send + Sync + 'static,
    ) -> Self {
        self.list_item_transform = Arc::new(transform);
        self
    }

    /// Rebuild the value described by `schema` from `values`.
    ///
    /// Returns `None` when the schema addresses nothing (a bare leaf at the
    /// root) or the answers hold nothing for it.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::UnknownOptions`](crate::TemplateError::UnknownOptions)
    /// when a `select` or `list` node references an option list missing from
    /// `catalog`.
    pub fn unflatten(
        &self,
        schema: &TemplateSchema,
        catalog: &OptionsCatalog,
        values: &FlatValues,
    ) -> Result<Option<Value>> {
        self.walk(schema, catalog, values, None)
    }

    /// Rebuild the value for `schema` positioned at `field_name`.
    pub fn walk(
        &self,
        schema: &TemplateSchema,
        catalog: &OptionsCatalog,
        values: &FlatValues,
        field_name: Option<&str>,
    ) -> Result<Option<Value>> {
        if let TemplateSchema::Object(obj) = schema {
            let mut map = Map::new();
            for (key, child) in &obj.fields {
                let Some(child) = child else {
                    continue;
                };
                let name = combine(key, field_name);
                if let Some(value) = self.walk(child, catalog, values, Some(&name))? {
                    map.insert(key.clone(), value);
                }
            }
            return Ok(Some(Value::Object(map)));
        }

        let Some(field_name) = field_name else {
            return Ok(None);
        };

        match schema {
            TemplateSchema::Object(_) => Ok(None),
            TemplateSchema::Input(_) => Ok(values
                .get(field_name)
                .cloned()
                .map(|value| apply_first(&self.rules, field_name, value))),
            TemplateSchema::Select(select) => {
                let options = options_for(catalog, &select.options_key, field_name)?;
                let Some(label) = values.get(field_name).and_then(cell_text) else {
                    return Ok(None);
                };
                // Duplicate labels resolve to the last option.
                let key = options
                    .iter()
                    .rev()
                    .find(|o| o.label == label)
                    .map(|o| o.key.as_json());
                if key.is_none() {
                    debug!("`{field_name}`: no option labelled `{label}`");
                }
                Ok(key)
            }
            TemplateSchema::List(list) => {
                let options = options_for(catalog, &list.options_key, field_name)?;

                let mut rows = Vec::new();
                for option in options {
                    let option_name = combine(&option.key, Some(field_name));
                    let value = self.walk(&list.children, catalog, values, Some(&option_name))?;

                    let Some(Value::Object(item)) = value else {
                        continue;
                    };
                    if !item.values().any(has_some_defined_value) {
                        continue;
                    }

                    let item = (self.list_item_transform)(item);
                    let row = match &list.key_field_name {
                        Some(key_field) => {
                            let mut row = Map::new();
                            row.insert(key_field.clone(), option.key.as_json());
                            row.extend(item);
                            row
                        }
                        None => item,
                    };
                    rows.push(Value::Object(row));
                }

                if rows.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(Value::Array(rows)))
                }
            }
        }
    }
}

/// Rebuild a value with the default [`Unflattener`].
pub fn get_value_from_import_template(
    schema: &TemplateSchema,
    catalog: &OptionsCatalog,
    values: &FlatValues,
) -> Result<Option<Value>> {
    Unflattener::default().unflatten(schema, catalog, values)
}

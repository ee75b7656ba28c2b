use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::data::{
    error::TemplateError,
    options::OptionsCatalog,
    schema::TemplateSchema,
};

/// A self-contained import template: schema, option catalog and metadata.
///
/// Stored as JSON or TOML; the format is chosen by file extension.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDescription {
    /// Application that owns the template.
    pub application: String,
    /// Template identifier, e.g. `dref-application`.
    pub template_name: String,
    /// Free-form metadata carried alongside the template.
    #[serde(default)]
    pub meta: serde_json::Map<String, serde_json::Value>,
    pub schema: TemplateSchema,
    pub options_map: OptionsCatalog,
    /// Spreadsheet tab for each top-level field.
    #[serde(default)]
    pub field_name_to_tab_name_map: HashMap<String, String>,
}

/// Derive the default answers path for a description path.
///
/// `dref.json` becomes `dref-answers.json`.
pub fn default_answers_by_description(description: &Path) -> PathBuf {
    let stem = description
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let ext = description
        .extension()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "json".to_string());

    let name = format!("{stem}-answers.{ext}");
    match description.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

/// Parse `content` as JSON or TOML according to `ext`.
pub fn parse_by_ext<T: DeserializeOwned>(content: &str, ext: &str) -> anyhow::Result<T> {
    let value = match ext {
        "json" => serde_json::from_str(content)?,
        "toml" => toml::from_str(content)?,
        _ => bail!("Unsupported file extension: {ext:?}"),
    };
    Ok(value)
}

/// File extension of `path`, or an empty string.
pub fn extension_of(path: &Path) -> &str {
    path.extension().and_then(|s| s.to_str()).unwrap_or("")
}

impl TemplateDescription {
    /// Load a description from a `.json` or `.toml` file.
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            bail!("Template description does not exist: {}", path.display());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_str_with_ext(&content, extension_of(path))
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse a description already loaded into memory.
    pub fn from_str_with_ext(content: &str, ext: &str) -> anyhow::Result<Self> {
        let desc: Self = parse_by_ext(content, ext)?;
        debug!(
            "loaded template `{}` with {} option lists",
            desc.template_name,
            desc.options_map.len()
        );
        Ok(desc)
    }

    /// Check the catalog, the schema against it, and the tab mapping.
    pub fn validate(&self) -> Result<(), TemplateError> {
        crate::validate::validate_catalog(&self.options_map)?;
        crate::validate::validate_schema(&self.schema, &self.options_map)?;

        if let TemplateSchema::Object(obj) = &self.schema {
            let mut tab_fields: Vec<_> = self.field_name_to_tab_name_map.keys().collect();
            tab_fields.sort();
            for field in tab_fields {
                if !obj.fields.contains_key(field) {
                    return Err(TemplateError::UnknownTabField {
                        field: field.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Tab a top-level field belongs to.
    ///
    /// `name` may be any combined key; its first segment picks the tab.
    pub fn tab_of(&self, name: &str) -> Option<&str> {
        let root = name.split(crate::key::KEY_SEPARATOR).next()?;
        self.field_name_to_tab_name_map.get(root).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const DESC_JSON: &str = r#"{
        "application": "ifrc-go",
        "templateName": "dref-application",
        "meta": { "version": 2 },
        "schema": {
            "type": "object",
            "fields": {
                "title": { "type": "input", "label": "Title", "validation": "string" },
                "is_man_made_event": {
                    "type": "select",
                    "label": "Man made?",
                    "validation": "boolean",
                    "optionsKey": "__boolean"
                }
            }
        },
        "optionsMap": {
            "__boolean": [ { "key": true, "label": "Yes" }, { "key": false, "label": "No" } ]
        },
        "fieldNameToTabNameMap": { "title": "Overview", "is_man_made_event": "Event" }
    }"#;

    const DESC_TOML: &str = r#"
application = "ifrc-go"
templateName = "dref-application"

[schema]
type = "object"

[schema.fields.title]
type = "input"
label = "Title"
validation = "string"

[[optionsMap.__boolean]]
key = true
label = "Yes"

[[optionsMap.__boolean]]
key = false
label = "No"
"#;

    #[test]
    fn test_answers_default() {
        let path = default_answers_by_description(Path::new("dref.json"));
        assert_eq!(path, PathBuf::from("dref-answers.json"));
        let path = default_answers_by_description(Path::new("/tmp/a/dref.toml"));
        assert_eq!(path, PathBuf::from("/tmp/a/dref-answers.toml"));
    }

    #[test]
    fn test_load_json_and_validate() {
        let desc = TemplateDescription::from_str_with_ext(DESC_JSON, "json").unwrap();
        assert_eq!(desc.template_name, "dref-application");
        assert_eq!(desc.options_map["__boolean"].len(), 2);
        assert_eq!(desc.tab_of("title"), Some("Overview"));
        assert_eq!(desc.tab_of("unknown__x"), None);
        desc.validate().unwrap();
    }

    #[test]
    fn test_load_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(DESC_TOML.as_bytes()).unwrap();

        let desc = TemplateDescription::from_path(file.path()).unwrap();
        assert!(desc.meta.is_empty());
        assert!(desc.field_name_to_tab_name_map.is_empty());
        desc.validate().unwrap();
    }

    #[test]
    fn test_unsupported_extension() {
        let err = TemplateDescription::from_str_with_ext(DESC_JSON, "yaml").unwrap_err();
        assert!(err.to_string().contains("yaml"));
        assert!(TemplateDescription::from_path("/nonexistent/desc.json").is_err());
    }

    #[test]
    fn test_unknown_tab_field() {
        let mut desc = TemplateDescription::from_str_with_ext(DESC_JSON, "json").unwrap();
        desc.field_name_to_tab_name_map
            .insert("missing".into(), "Overview".into());
        assert_eq!(
            desc.validate(),
            Err(TemplateError::UnknownTabField {
                field: "missing".into()
            })
        );
    }
}

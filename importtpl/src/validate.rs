//! Schema and catalog consistency checks.
//!
//! The walkers trust their inputs: a bad `optionsKey` only surfaces when the
//! walk reaches it, and a field name containing the key separator silently
//! aliases another position. Running these checks once, when a template is
//! loaded, rejects such templates up front.

use std::collections::HashSet;

use log::debug;

use crate::{
    data::{
        OptionsCatalog, TemplateSchema,
        error::{Result, TemplateError},
    },
    flatten::create_import_template,
    key::{KEY_SEPARATOR, combine},
};

/// Check that every option list is non-empty and uses one key kind.
pub fn validate_catalog(catalog: &OptionsCatalog) -> Result<()> {
    let mut names: Vec<_> = catalog.keys().collect();
    names.sort();

    for name in names {
        let options = &catalog[name];
        let Some(first) = options.first() else {
            return Err(TemplateError::EmptyOptions {
                options_key: name.clone(),
            });
        };
        let expected = first.key.kind();
        if let Some(bad) = options.iter().find(|o| o.key.kind() != expected) {
            return Err(TemplateError::MixedOptionKeys {
                options_key: name.clone(),
                key: bad.key.to_string(),
                expected,
                actual: bad.key.kind(),
            });
        }
    }
    Ok(())
}

fn check_node(schema: &TemplateSchema, catalog: &OptionsCatalog, path: Option<&str>) -> Result<()> {
    let here = path.unwrap_or("<root>");
    match schema {
        TemplateSchema::Object(obj) => {
            for (key, child) in &obj.fields {
                if key.contains(KEY_SEPARATOR) {
                    return Err(TemplateError::SeparatorInFieldName {
                        path: here.to_string(),
                        field: key.clone(),
                    });
                }
                if let Some(child) = child {
                    check_node(child, catalog, Some(&combine(key, path)))?;
                }
            }
            Ok(())
        }
        TemplateSchema::Input(_) => Ok(()),
        TemplateSchema::Select(select) => {
            if catalog.contains_key(&select.options_key) {
                Ok(())
            } else {
                Err(TemplateError::UnknownOptions {
                    path: here.to_string(),
                    options_key: select.options_key.clone(),
                })
            }
        }
        TemplateSchema::List(list) => {
            if !catalog.contains_key(&list.options_key) {
                return Err(TemplateError::UnknownOptions {
                    path: here.to_string(),
                    options_key: list.options_key.clone(),
                });
            }
            // One representative walk suffices: children are identical per option.
            check_node(&list.children, catalog, path)
        }
    }
}

/// Check `schema` against `catalog`.
///
/// Rejects references to unknown option lists, field names containing the
/// key separator, and schemas in which two rows share an address. Option
/// keys may contain the separator.
pub fn validate_schema(schema: &TemplateSchema, catalog: &OptionsCatalog) -> Result<()> {
    check_node(schema, catalog, None)?;

    let fields = create_import_template(schema, catalog)?;
    let mut seen = HashSet::new();
    for field in &fields {
        // A list's option sub-heading shares its name with the option's
        // own rows; only equal-kind rows collide.
        if !seen.insert((field.is_heading(), field.name())) {
            return Err(TemplateError::DuplicateAddress {
                name: field.name().to_string(),
            });
        }
    }
    debug!("schema ok: {} template rows", fields.len());
    Ok(())
}

//! Schema to template fields.
//!
//! The walk is pre-order: a node's own rows come before its descendants',
//! and object children follow declaration order. Spreadsheet generators lay
//! rows out in exactly this order.

use log::trace;

use crate::{
    data::{
        ContextEntry, DataValidation, HeadingField, InputTemplateField, OptionsCatalog,
        TemplateField, TemplateOption, TemplateSchema, Validation, error::Result,
        error::TemplateError,
    },
    key::combine,
    rich_text::{InsPlugin, parse_pseudo_html},
};

/// Name segment of the heading emitted for `headingBefore`.
pub const HEADING_BEFORE: &str = "heading_before";

/// Flatten `schema` into template fields.
///
/// # Errors
///
/// Returns [`TemplateError::UnknownOptions`] when a `select` or `list` node
/// references an option list missing from `catalog`.
pub fn create_import_template(
    schema: &TemplateSchema,
    catalog: &OptionsCatalog,
) -> Result<Vec<TemplateField>> {
    flatten(schema, catalog, None, -1, &[])
}

pub(crate) fn options_for<'c>(
    catalog: &'c OptionsCatalog,
    options_key: &str,
    path: &str,
) -> Result<&'c [TemplateOption]> {
    catalog
        .get(options_key)
        .map(Vec::as_slice)
        .ok_or_else(|| TemplateError::UnknownOptions {
            path: path.to_string(),
            options_key: options_key.to_string(),
        })
}

fn data_validation(validation: Validation) -> Option<DataValidation> {
    match validation {
        Validation::Number => Some(DataValidation::Number),
        Validation::Date => Some(DataValidation::Date),
        Validation::Integer => Some(DataValidation::Integer),
        Validation::TextArea => Some(DataValidation::TextArea),
        Validation::String | Validation::Boolean => None,
    }
}

/// Recursive walk behind [`create_import_template`].
///
/// `outline_level` is the depth of the rows emitted for this node; object
/// nodes pass it through unchanged, list nodes emit their options one level
/// deeper. `context` holds the option selected at each enclosing list.
pub fn flatten(
    schema: &TemplateSchema,
    catalog: &OptionsCatalog,
    field_name: Option<&str>,
    outline_level: i32,
    context: &[ContextEntry],
) -> Result<Vec<TemplateField>> {
    if let TemplateSchema::Object(obj) = schema {
        let mut fields = Vec::new();
        for (key, child) in &obj.fields {
            let Some(child) = child else {
                continue;
            };
            let name = combine(key, field_name);
            fields.extend(flatten(child, catalog, Some(&name), outline_level, context)?);
        }
        return Ok(fields);
    }

    let Some(field_name) = field_name else {
        return Ok(Vec::new());
    };

    let mut fields = Vec::new();

    if let Some(heading) = schema.heading_before() {
        fields.push(TemplateField::Heading(HeadingField {
            name: combine(HEADING_BEFORE, Some(field_name)),
            label: heading.to_string(),
            outline_level,
            description: None,
            context: context.to_vec(),
        }));
    }

    let ins = InsPlugin::new(catalog, context);

    match schema {
        TemplateSchema::Object(_) => {}
        TemplateSchema::Input(input) => {
            fields.push(TemplateField::Input(InputTemplateField {
                name: field_name.to_string(),
                label: parse_pseudo_html(&input.label, &[&ins]),
                description: input
                    .description
                    .as_deref()
                    .map(|d| parse_pseudo_html(d, &[&ins])),
                outline_level,
                data_validation: data_validation(input.validation),
                context: context.to_vec(),
            }));
        }
        TemplateSchema::Select(select) => {
            fields.push(TemplateField::Input(InputTemplateField {
                name: field_name.to_string(),
                label: parse_pseudo_html(&select.label, &[&ins]),
                description: select
                    .description
                    .as_deref()
                    .map(|d| parse_pseudo_html(d, &[&ins])),
                outline_level,
                data_validation: Some(DataValidation::List {
                    options_key: select.options_key.clone(),
                }),
                context: context.to_vec(),
            }));
        }
        TemplateSchema::List(list) => {
            let options = options_for(catalog, &list.options_key, field_name)?;

            if !list.hidden_label {
                fields.push(TemplateField::Heading(HeadingField {
                    name: field_name.to_string(),
                    label: list.label.clone(),
                    outline_level,
                    description: list.description.clone(),
                    context: context.to_vec(),
                }));
            }

            for option in options {
                let option_name = combine(&option.key, Some(field_name));
                trace!("expanding `{option_name}`");

                fields.push(TemplateField::Heading(HeadingField {
                    name: option_name.clone(),
                    label: option.label.clone(),
                    outline_level: outline_level + 1,
                    description: None,
                    context: context.to_vec(),
                }));

                let mut child_context = context.to_vec();
                child_context.push(ContextEntry::new(
                    list.options_key.clone(),
                    option.key.to_string(),
                ));

                fields.extend(flatten(
                    &list.children,
                    catalog,
                    Some(&option_name),
                    outline_level + 1,
                    &child_context,
                )?);
            }
        }
    }

    Ok(fields)
}

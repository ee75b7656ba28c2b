//! Indented outline rendering of template rows.

use colored::Colorize;
use importtpl::{
    TemplateField,
    data::{DataValidation, InputTemplateField},
};

const INDENT: &str = "  ";

fn indent(outline_level: i32) -> String {
    // Top-level rows sit at -1.
    INDENT.repeat((outline_level + 1).max(0) as usize)
}

fn validation_tag(input: &InputTemplateField) -> Option<String> {
    let tag = match input.data_validation.as_ref()? {
        DataValidation::Number => "number".to_string(),
        DataValidation::Integer => "integer".to_string(),
        DataValidation::Date => "date".to_string(),
        DataValidation::TextArea => "textArea".to_string(),
        DataValidation::List { options_key } => format!("list:{options_key}"),
    };
    Some(tag)
}

/// Renders one row per line, headings in bold, inputs with their key and
/// validation.
///
/// With `show_context` the option context of each row is appended.
pub fn render(fields: &[TemplateField], show_context: bool) -> String {
    let mut out = String::new();
    for field in fields {
        let mut line = indent(field.outline_level());
        match field {
            TemplateField::Heading(heading) => {
                line += &format!("{}", heading.label.bold().cyan());
                line += &format!(" {}", format!("[{}]", heading.name).dimmed());
            }
            TemplateField::Input(input) => {
                line += &field.plain_label();
                line += &format!(" {}", input.name.as_str().yellow());
                if let Some(tag) = validation_tag(input) {
                    line += &format!(" {}", format!("<{tag}>").purple());
                }
            }
        }

        if show_context {
            let context = match field {
                TemplateField::Heading(h) => &h.context,
                TemplateField::Input(i) => &i.context,
            };
            for entry in context {
                line += &format!(" {}", format!("{}={}", entry.field, entry.key).dimmed());
            }
        }

        out += &line;
        out.push('\n');
    }
    out
}

/// Prints the outline to stdout.
pub fn print(fields: &[TemplateField], show_context: bool) {
    print!("{}", render(fields, show_context));
}

#[cfg(test)]
mod tests {
    use importtpl::{TemplateSchema, create_import_template, data::TemplateOption};
    use serde_json::json;

    use super::*;

    #[test]
    fn test_render_outline() {
        colored::control::set_override(false);

        let schema: TemplateSchema = serde_json::from_value(json!({
            "type": "object",
            "fields": {
                "title": { "type": "input", "label": "Title", "validation": "string" },
                "sources": {
                    "type": "list",
                    "label": "Sources",
                    "optionsKey": "src",
                    "children": {
                        "type": "object",
                        "fields": {
                            "link": { "type": "input", "label": "Link", "validation": "date" }
                        }
                    }
                }
            }
        }))
        .unwrap();
        let catalog: importtpl::OptionsCatalog = [("src".to_string(), vec![TemplateOption::new("s0", "Source #1")])]
            .into_iter()
            .collect();
        let fields = create_import_template(&schema, &catalog).unwrap();

        assert_eq!(
            render(&fields, false),
            "Title title\n\
             Sources [sources]\n\
             \x20 Source #1 [sources__s0]\n\
             \x20 Link sources__s0__link <date>\n"
        );
        assert!(render(&fields, true).contains("sources__s0__link <date> src=s0"));
    }
}

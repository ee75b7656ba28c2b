use serde::{Deserialize, Serialize};

/// Option selected at one enclosing `list` level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContextEntry {
    /// Options key of the list.
    pub field: String,
    /// String form of the selected option key.
    pub key: String,
}

impl ContextEntry {
    pub fn new(field: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            key: key.into(),
        }
    }
}

/// Font flags of a rich text run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Font {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub underline: bool,
}

impl Font {
    pub fn is_plain(&self) -> bool {
        !(self.bold || self.italic || self.underline)
    }
}

/// A piece of text sharing one font.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RichTextRun {
    pub text: String,
    #[serde(default, skip_serializing_if = "Font::is_plain")]
    pub font: Font,
}

impl RichTextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: Font::default(),
        }
    }
}

/// Cell content: plain text, or rich text when markup was present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CellText {
    Plain(String),
    Rich {
        #[serde(rename = "richText")]
        rich_text: Vec<RichTextRun>,
    },
}

impl CellText {
    /// Concatenated text without formatting.
    pub fn to_plain(&self) -> String {
        match self {
            CellText::Plain(s) => s.clone(),
            CellText::Rich { rich_text } => rich_text.iter().map(|r| r.text.as_str()).collect(),
        }
    }

    /// Whether the cell would show nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            CellText::Plain(s) => s.is_empty(),
            CellText::Rich { rich_text } => rich_text.is_empty(),
        }
    }
}

/// Data validation a spreadsheet generator attaches to an input cell.
///
/// Plain string inputs carry no validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "dataValidation", rename_all = "camelCase")]
pub enum DataValidation {
    Number,
    Integer,
    Date,
    TextArea,
    /// Value must be one of the labels of the referenced option list.
    List {
        #[serde(rename = "optionsKey")]
        options_key: String,
    },
}

/// Decorative heading row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HeadingField {
    pub name: String,
    pub label: String,
    pub outline_level: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub context: Vec<ContextEntry>,
}

/// Input row addressed by its combined key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InputTemplateField {
    pub name: String,
    pub label: CellText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<CellText>,
    pub outline_level: i32,
    #[serde(default, flatten, skip_serializing_if = "Option::is_none")]
    pub data_validation: Option<DataValidation>,
    pub context: Vec<ContextEntry>,
}

/// One row of a flattened template, in pre-order of the schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TemplateField {
    Heading(HeadingField),
    Input(InputTemplateField),
}

impl TemplateField {
    /// Combined key of the row.
    pub fn name(&self) -> &str {
        match self {
            TemplateField::Heading(h) => &h.name,
            TemplateField::Input(i) => &i.name,
        }
    }

    pub fn outline_level(&self) -> i32 {
        match self {
            TemplateField::Heading(h) => h.outline_level,
            TemplateField::Input(i) => i.outline_level,
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(self, TemplateField::Heading(_))
    }

    /// Label without formatting.
    pub fn plain_label(&self) -> String {
        match self {
            TemplateField::Heading(h) => h.label.clone(),
            TemplateField::Input(i) => i.label.to_plain(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_input_field_json_shape() {
        let field = TemplateField::Input(InputTemplateField {
            name: "country".into(),
            label: CellText::Rich {
                rich_text: vec![RichTextRun {
                    text: "Country".into(),
                    font: Font {
                        bold: true,
                        ..Default::default()
                    },
                }],
            },
            description: None,
            outline_level: 0,
            data_validation: Some(DataValidation::List {
                options_key: "country".into(),
            }),
            context: vec![],
        });

        assert_eq!(
            serde_json::to_value(&field).unwrap(),
            json!({
                "type": "input",
                "name": "country",
                "label": { "richText": [{ "text": "Country", "font": { "bold": true } }] },
                "outlineLevel": 0,
                "dataValidation": "list",
                "optionsKey": "country",
                "context": []
            })
        );
    }

    #[test]
    fn test_plain_label() {
        let label = CellText::Rich {
            rich_text: vec![RichTextRun::new("a "), RichTextRun::new("b")],
        };
        assert_eq!(label.to_plain(), "a b");
        assert!(!label.is_empty());
        assert!(CellText::Plain(String::new()).is_empty());
    }
}

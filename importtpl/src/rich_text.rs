//! Pseudo-HTML labels.
//!
//! Template labels may carry a small set of tags: `<b>`, `<i>`, `<u>`, plus
//! any tag contributed by a [`ParsePlugin`], such as `<ins>` which splices in
//! a property of the option selected by an enclosing list.
//!
//! ```rust
//! use importtpl::rich_text::parse_pseudo_html;
//! use importtpl::data::CellText;
//!
//! let text = parse_pseudo_html("Select <b>Yes</b> or <b>No</b>", &[]);
//! let CellText::Rich { rich_text } = text else { panic!() };
//! assert_eq!(rich_text.len(), 4);
//! assert!(rich_text[1].font.bold);
//! ```

use std::sync::LazyLock;

use log::warn;
use regex::Regex;

use crate::data::{CellText, ContextEntry, OptionsCatalog, RichTextRun};

/// Transforms the text runs enclosed by one tag.
pub trait ParsePlugin {
    /// Tag name without brackets, e.g. `b`.
    fn tag(&self) -> &str;

    /// Transform a run. `token` is the raw text between the tags.
    fn transform(&self, token: &str, run: RichTextRun) -> RichTextRun;
}

/// Built-in font tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontPlugin {
    Bold,
    Italic,
    Underline,
}

impl ParsePlugin for FontPlugin {
    fn tag(&self) -> &str {
        match self {
            FontPlugin::Bold => "b",
            FontPlugin::Italic => "i",
            FontPlugin::Underline => "u",
        }
    }

    fn transform(&self, _token: &str, mut run: RichTextRun) -> RichTextRun {
        match self {
            FontPlugin::Bold => run.font.bold = true,
            FontPlugin::Italic => run.font.italic = true,
            FontPlugin::Underline => run.font.underline = true,
        }
        run
    }
}

/// `<ins>optionField.valueField</ins>` placeholder.
///
/// Resolves to the `valueField` property of the option selected for
/// `optionField` by the closest enclosing list, or to nothing.
pub struct InsPlugin<'a> {
    catalog: &'a OptionsCatalog,
    context: &'a [ContextEntry],
}

impl<'a> InsPlugin<'a> {
    pub fn new(catalog: &'a OptionsCatalog, context: &'a [ContextEntry]) -> Self {
        Self { catalog, context }
    }

    fn resolve(&self, token: &str) -> Option<String> {
        let mut parts = token.split('.');
        let option_field = parts.next()?;
        let value_field = parts.next()?;

        let selected = self.context.iter().rev().find(|c| c.field == option_field)?;
        let option = self
            .catalog
            .get(option_field)?
            .iter()
            .find(|o| o.key.to_string() == selected.key)?;
        option.property(value_field)
    }
}

impl ParsePlugin for InsPlugin<'_> {
    fn tag(&self) -> &str {
        "ins"
    }

    fn transform(&self, token: &str, mut run: RichTextRun) -> RichTextRun {
        run.text = self.resolve(token).unwrap_or_default();
        run
    }
}

static FONT_PLUGINS: [FontPlugin; 3] = [FontPlugin::Bold, FontPlugin::Italic, FontPlugin::Underline];

fn tag_pattern(plugins: &[&dyn ParsePlugin]) -> Result<Regex, regex::Error> {
    let supported = plugins
        .iter()
        .map(|p| regex::escape(p.tag()))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("</?(?:{supported})>"))
}

static FONT_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("</?(?:b|i|u)>").expect("valid tag pattern"));

static FONT_AND_INS_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("</?(?:b|i|u|ins)>").expect("valid tag pattern"));

enum Token<'s> {
    Open(&'s str),
    Close,
    Text(&'s str),
}

fn tokenize<'s>(value: &'s str, tag_regex: &Regex) -> Vec<Token<'s>> {
    let mut tokens = Vec::new();
    let mut last = 0;
    for m in tag_regex.find_iter(value) {
        tokens.push(Token::Text(&value[last..m.start()]));
        let tag = m.as_str();
        if tag.starts_with("</") {
            tokens.push(Token::Close);
        } else {
            tokens.push(Token::Open(&tag[1..tag.len() - 1]));
        }
        last = m.end();
    }
    tokens.push(Token::Text(&value[last..]));
    tokens
}

/// Convert a pseudo-HTML string into cell text.
///
/// Strings without any known tag stay plain. Closing tags pop the most
/// recent open tag regardless of name. Empty runs are dropped.
pub fn parse_pseudo_html(value: &str, extra_plugins: &[&dyn ParsePlugin]) -> CellText {
    let plugins: Vec<&dyn ParsePlugin> = FONT_PLUGINS
        .iter()
        .map(|p| p as &dyn ParsePlugin)
        .chain(extra_plugins.iter().copied())
        .collect();

    let extra_tags: Vec<&str> = extra_plugins.iter().map(|p| p.tag()).collect();
    let built;
    let tag_regex: &Regex = match extra_tags.as_slice() {
        [] => &*FONT_TAGS,
        ["ins"] => &*FONT_AND_INS_TAGS,
        _ => match tag_pattern(&plugins) {
            Ok(re) => {
                built = re;
                &built
            }
            Err(e) => {
                warn!("cannot build tag pattern, keeping `{value}` as plain text: {e}");
                return CellText::Plain(value.to_string());
            }
        },
    };

    if !tag_regex.is_match(value) {
        return CellText::Plain(value.to_string());
    }

    let mut stack: Vec<&str> = Vec::new();
    let mut rich_text = Vec::new();
    for token in tokenize(value, tag_regex) {
        match token {
            Token::Open(tag) => stack.push(tag),
            Token::Close => {
                stack.pop();
            }
            Token::Text(text) => {
                let run = plugins
                    .iter()
                    .filter(|p| stack.iter().any(|t| *t == p.tag()))
                    .fold(RichTextRun::new(text), |run, p| p.transform(text, run));
                if !run.text.is_empty() {
                    rich_text.push(run);
                }
            }
        }
    }

    CellText::Rich { rich_text }
}

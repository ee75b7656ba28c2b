use thiserror::Error;

use super::options::KeyKind;

/// Errors raised by template walkers and consistency checks.
///
/// All of these are configuration errors: a schema and catalog that pass
/// [`crate::validate::validate_schema`] never produce them at runtime.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("options `{options_key}` referenced at `{path}` are missing from the catalog")]
    UnknownOptions { path: String, options_key: String },

    #[error("option list `{options_key}` is empty")]
    EmptyOptions { options_key: String },

    #[error(
        "option list `{options_key}` mixes key kinds: expected {expected}, found {actual} for `{key}`"
    )]
    MixedOptionKeys {
        options_key: String,
        key: String,
        expected: KeyKind,
        actual: KeyKind,
    },

    #[error("field name `{field}` at `{path}` contains the key separator `__`")]
    SeparatorInFieldName { path: String, field: String },

    #[error("address `{name}` is produced more than once")]
    DuplicateAddress { name: String },

    #[error("tab mapping names `{field}`, which is not a top-level schema field")]
    UnknownTabField { field: String },
}

/// Result alias for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

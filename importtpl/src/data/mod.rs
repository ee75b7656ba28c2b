//! Template data structures.
//!
//! This module provides the types the two template walkers operate on:
//!
//! - The template schema describing the shape of the form value
//! - The options catalog referenced by `select` and `list` nodes
//! - The flat field descriptors produced for spreadsheet generation
//! - The template description document bundling schema and catalog
//!
//! ## Architecture
//!
//! - [`schema`] - Template schema nodes
//! - [`options`] - Options catalog and option keys
//! - [`field`] - Flat template field descriptors
//! - [`description`] - Template description loading
//! - [`error`] - Error types

/// Template description document and file loading.
pub mod description;

/// Error types for template operations.
pub mod error;

/// Flat template field descriptors.
pub mod field;

/// Options catalog and option keys.
pub mod options;

/// Template schema node definitions.
pub mod schema;

pub use description::TemplateDescription;
pub use error::TemplateError;
pub use field::{
    CellText, ContextEntry, DataValidation, Font, HeadingField, InputTemplateField,
    RichTextRun, TemplateField,
};
pub use options::{KeyKind, OptionKey, OptionsCatalog, TemplateOption};
pub use schema::{InputField, ListField, ObjectField, SelectField, TemplateSchema, Validation};

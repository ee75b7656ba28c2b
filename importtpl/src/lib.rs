//! # importtpl
//!
//! Schema-driven spreadsheet import templates.
//!
//! A template schema describes the shape of a nested form value. `importtpl`
//! walks that schema in two directions:
//!
//! - **flatten**: derive the ordered list of template fields (headings and
//!   inputs) a spreadsheet generator lays out as rows.
//! - **unflatten**: rebuild the nested form value from the flat answers read
//!   back out of a filled spreadsheet.
//!
//! Both directions address leaves with the same combined key, so every key
//! produced by [`create_import_template`] is exactly the key consumed by
//! [`Unflattener`].
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use importtpl::{create_import_template, data::TemplateSchema, Unflattener};
//!
//! let schema: TemplateSchema = serde_json::from_value(serde_json::json!({
//!     "type": "object",
//!     "fields": {
//!         "title": { "type": "input", "label": "Title", "validation": "string" }
//!     }
//! }))
//! .unwrap();
//! let catalog = HashMap::new();
//!
//! let fields = create_import_template(&schema, &catalog).unwrap();
//! assert_eq!(fields[0].name(), "title");
//!
//! let answers = HashMap::from([("title".to_string(), serde_json::json!("Floods"))]);
//! let value = Unflattener::default()
//!     .unflatten(&schema, &catalog, &answers)
//!     .unwrap();
//! assert_eq!(value, Some(serde_json::json!({ "title": "Floods" })));
//! ```
//!
//! ## Modules
//!
//! - [`data`] - Schema, option catalog, field descriptor and description types
//! - [`key`] - Combined key addressing
//! - [`rich_text`] - Pseudo-HTML label parsing
//! - [`flatten`] - Schema to template fields
//! - [`unflatten`] - Flat answers to nested value
//! - [`rules`] - Per-field value post-processing
//! - [`validate`] - Schema and catalog consistency checks

/// Schema, options catalog and template field types.
pub mod data;

/// Schema to template field flattening.
pub mod flatten;

/// Combined key addressing shared by both walkers.
pub mod key;

/// Pseudo-HTML to rich text conversion for labels and descriptions.
pub mod rich_text;

/// Value post-processing rules applied while rebuilding answers.
pub mod rules;

/// Flat answers to nested value reconstruction.
pub mod unflatten;

/// Schema and catalog consistency checks.
pub mod validate;

pub use data::{
    OptionsCatalog, TemplateDescription, TemplateError, TemplateField, TemplateSchema,
};
pub use flatten::create_import_template;
pub use key::{KEY_SEPARATOR, combine};
pub use unflatten::{Unflattener, get_value_from_import_template};
pub use serde_json::Value;

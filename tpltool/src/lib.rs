//! # tpltool
//!
//! Command-line driver for spreadsheet import templates.
//!
//! `tpltool` loads a template description (schema plus option catalog) and
//! runs the `importtpl` walkers over it.
//!
//! ## Features
//!
//! - **Fields**: flatten a description into template rows, as JSON or as an
//!   indented outline
//! - **Values**: rebuild the nested form value from a flat answers file
//! - **Check**: validate a description before it is used
//! - **Schema**: print the JSON Schema of the description format
//!
//! ## Modules
//!
//! - [`ctx`] - Application context and file loading
//! - [`outline`] - Outline rendering of template rows

/// Application context and state management.
pub mod ctx;

/// Outline rendering of template rows.
pub mod outline;

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

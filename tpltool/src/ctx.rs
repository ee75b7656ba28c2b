//! Application context and state management.
//!
//! This module provides the [`AppContext`] type which holds the state of a
//! `tpltool` invocation: the file paths it works on and the template
//! description once loaded.

use std::path::{Path, PathBuf};

use anyhow::Context;
use colored::Colorize;
use importtpl::{
    TemplateDescription, TemplateField, Value, create_import_template,
    data::description::{default_answers_by_description, extension_of, parse_by_ext},
    unflatten::{FlatValues, Unflattener},
};
use tokio::fs;

/// Path configuration grouping all path-related fields.
#[derive(Default, Clone)]
pub struct PathConfig {
    /// Template description file.
    pub description: PathBuf,
    /// Answers file; derived from the description path when unset.
    pub answers: Option<PathBuf>,
}

impl PathConfig {
    /// Gets the answers file.
    ///
    /// Returns the configured path, or `<description>-answers.<ext>` next to
    /// the description.
    pub fn answers(&self) -> PathBuf {
        self.answers
            .clone()
            .unwrap_or_else(|| default_answers_by_description(&self.description))
    }
}

/// The main application context holding all state.
#[derive(Default, Clone)]
pub struct AppContext {
    /// Paths of the files the command works on.
    pub paths: PathConfig,
    /// Whether debug mode is enabled.
    pub debug: bool,
    /// Loaded template description.
    pub description: Option<TemplateDescription>,
}

impl AppContext {
    pub fn new(description: PathBuf, debug: bool) -> Self {
        Self {
            paths: PathConfig {
                description,
                answers: None,
            },
            debug,
            description: None,
        }
    }

    /// Loads the template description and checks it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or the
    /// description fails validation.
    pub async fn load_description(&mut self) -> anyhow::Result<&TemplateDescription> {
        let path = self.paths.description.clone();
        let content = read_file(&path).await?;
        let desc = TemplateDescription::from_str_with_ext(&content, extension_of(&path))
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        desc.validate()
            .with_context(|| format!("Invalid template description {}", path.display()))?;
        info!(
            "Loaded template `{}` of `{}`",
            desc.template_name, desc.application
        );

        Ok(&*self.description.insert(desc))
    }

    /// Loads the flat answers map.
    pub async fn load_answers(&self) -> anyhow::Result<FlatValues> {
        let path = self.paths.answers();
        let content = read_file(&path).await?;
        let values: FlatValues = parse_by_ext(&content, extension_of(&path))
            .with_context(|| format!("Failed to parse answers {}", path.display()))?;
        debug!("{} answers read from {}", values.len(), path.display());
        Ok(values)
    }

    fn loaded(&self) -> anyhow::Result<&TemplateDescription> {
        self.description
            .as_ref()
            .ok_or(anyhow!("template description not loaded"))
    }

    /// Flattens the loaded description into template rows.
    pub fn fields(&self) -> anyhow::Result<Vec<TemplateField>> {
        let desc = self.loaded()?;
        Ok(create_import_template(&desc.schema, &desc.options_map)?)
    }

    /// Rebuilds the nested value from the answers file.
    ///
    /// `client_id` controls whether rebuilt list rows receive a random
    /// `client_id`.
    pub async fn values(&self, client_id: bool) -> anyhow::Result<Option<Value>> {
        let answers = self.load_answers().await?;
        let desc = self.loaded()?;

        let unflattener = if client_id {
            Unflattener::default()
        } else {
            Unflattener::default().with_list_item_transform(|item| item)
        };
        Ok(unflattener.unflatten(&desc.schema, &desc.options_map, &answers)?)
    }

    /// Prints a one-line summary of the loaded description.
    pub fn print_summary(&self) -> anyhow::Result<()> {
        let desc = self.loaded()?;
        let fields = self.fields()?;
        let inputs = fields.iter().filter(|f| !f.is_heading()).count();
        println!(
            "{}",
            format!(
                "{} ok: {} rows, {} inputs, {} option lists",
                self.paths.description.display(),
                fields.len(),
                inputs,
                desc.options_map.len()
            )
            .green()
            .bold()
        );
        Ok(())
    }
}

async fn read_file(path: &Path) -> anyhow::Result<String> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        bail!("File does not exist: {}", path.display());
    }
    fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

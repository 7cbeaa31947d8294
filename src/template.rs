//! Metadata templates and the collaborator traits around them.
//!
//! The document core never reads a template. Templates exist for whoever
//! creates new items: they supply the ordered field names, with defaults,
//! that a fresh [`Item`](crate::model::Item) starts out with.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::InselectError;

/// File-dialog filter for template files.
pub const TEMPLATE_FILE_FILTER: &str = "Inselect user templates (*.inselect_template)";

/// Anything that can list metadata fields with their default values.
pub trait FieldSchema {
    /// Ordered `(field name, default value)` pairs.
    fn fields(&self) -> Vec<(String, String)>;
}

/// Asks the user for a file. `None` means the user cancelled.
pub trait PathChooser {
    fn choose(&mut self, title: &str, filter: &str) -> Option<PathBuf>;
}

impl<F> PathChooser for F
where
    F: FnMut(&str, &str) -> Option<PathBuf>,
{
    fn choose(&mut self, title: &str, filter: &str) -> Option<PathBuf> {
        self(title, filter)
    }
}

/// A named, ordered list of metadata fields.
///
/// Stored as YAML:
///
/// ```yaml
/// name: Test user template
/// fields:
///   - name: catalogNumber
///   - name: country
///     default: Netherlands
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserTemplate {
    pub name: String,

    #[serde(default)]
    pub fields: Vec<TemplateField>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TemplateField {
    pub name: String,

    #[serde(default)]
    pub default: String,
}

impl TemplateField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: String::new(),
        }
    }
}

impl UserTemplate {
    /// Reads a template from a YAML file.
    pub fn load(path: &Path) -> Result<Self, InselectError> {
        let text = fs::read_to_string(path)?;
        let template = Self::from_yaml_str(&text).map_err(|source| {
            InselectError::TemplateParse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        debug!("loaded template '{}' from {}", template.name, path.display());
        Ok(template)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}

impl Default for UserTemplate {
    /// The built-in template of common Darwin Core terms.
    fn default() -> Self {
        let fields = [
            "catalogNumber",
            "recordedBy",
            "scientificName",
            "taxonRank",
            "country",
            "locality",
            "eventDate",
            "individualCount",
        ];
        Self {
            name: "Simple Darwin Core terms".to_string(),
            fields: fields.into_iter().map(TemplateField::new).collect(),
        }
    }
}

impl FieldSchema for UserTemplate {
    fn fields(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.default.clone()))
            .collect()
    }
}

/// Lets the user pick a template file and loads it.
///
/// Returns `Ok(None)` if the user cancelled.
pub fn choose_template(
    chooser: &mut impl PathChooser,
) -> Result<Option<UserTemplate>, InselectError> {
    match chooser.choose("Choose template", TEMPLATE_FILE_FILTER) {
        Some(path) => UserTemplate::load(&path).map(Some),
        None => Ok(None),
    }
}

//! JSON persistence for document metadata.
//!
//! A metadata file is a single JSON object holding an ordered `items` array:
//!
//! ```json
//! {
//!   "items": [
//!     { "rect": [0.1, 0.2, 0.5, 0.5], "catalogNumber": "1234" }
//!   ]
//! }
//! ```
//!
//! Other top-level keys, and every item field other than `rect`, are kept
//! verbatim and in file order.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use crate::error::InselectError;
use crate::model::Item;

/// Parsed content of a metadata file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Annotated regions, in file order.
    pub items: Vec<Item>,

    /// Top-level keys other than `items`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reads metadata from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_metadata(path: &Path) -> Result<Metadata, InselectError> {
    let file = File::open(path).map_err(InselectError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| InselectError::MetadataParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes metadata to a JSON file, replacing any existing content.
///
/// The JSON goes to a temporary file next to `path` which is then renamed
/// over it, so readers see either the old file or the new one. An existing
/// file's permissions carry over to the replacement.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_metadata(path: &Path, metadata: &Metadata) -> Result<(), InselectError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)?;

    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, metadata).map_err(|source| {
            InselectError::MetadataWrite {
                path: path.to_path_buf(),
                source,
            }
        })?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }

    if let Ok(existing) = fs::metadata(path) {
        temp.as_file().set_permissions(existing.permissions())?;
    }
    temp.persist(path).map_err(|e| InselectError::Io(e.error))?;
    Ok(())
}

/// Parses metadata from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_json_str(json: &str) -> Result<Metadata, serde_json::Error> {
    serde_json::from_str(json)
}

/// Renders metadata as the pretty-printed JSON that [`write_metadata`] writes.
pub fn to_json_string(metadata: &Metadata) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(metadata).map(|json| json + "\n")
}

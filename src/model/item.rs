//! Annotated regions of a scanned image.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::rect::Rect;
use super::space::Normalized;
use crate::template::FieldSchema;

/// One annotated region: a normalised rect plus opaque metadata.
///
/// Every field other than `rect` is carried through load and save untouched
/// and in its original order. The core never interprets those values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Bounding box of the region in normalised space.
    pub rect: Rect<Normalized>,

    /// All other fields of the record, in file order.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Item {
    /// Creates an item with no metadata fields.
    pub fn new(rect: Rect<Normalized>) -> Self {
        Self {
            rect,
            fields: Map::new(),
        }
    }

    /// Creates an item holding every field of `schema` at its default value.
    pub fn from_template(rect: Rect<Normalized>, schema: &impl FieldSchema) -> Self {
        let fields = schema
            .fields()
            .into_iter()
            .map(|(name, default)| (name, Value::String(default)))
            .collect();
        Self { rect, fields }
    }

    /// Adds or replaces a metadata field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Returns the value of a metadata field, if present.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

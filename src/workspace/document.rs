use crate::ast::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A serialized workspace, in the host editor's JSON layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkspaceDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<BlockSection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<DocumentVariable>,
}

impl WorkspaceDocument {
    /// Parses a document. Every `next` link nests two levels deeper, so long
    /// statement chains exceed serde_json's default recursion limit; the limit
    /// is lifted and the stack grown on demand instead.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        deserializer.disable_recursion_limit();
        let document = Self::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
        deserializer.end()?;
        Ok(document)
    }
}

/// The `"blocks"` section of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSection {
    #[serde(rename = "languageVersion", default)]
    pub language_version: u32,
    #[serde(default)]
    pub blocks: Vec<DocumentBlock>,
}

/// An entry of the `"variables"` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentVariable {
    pub name: String,
    pub id: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub var_type: Option<String>,
}

/// A serialized block and everything it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, FieldValue>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub inputs: BTreeMap<String, DocumentConnection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<DocumentConnection>,
    /// Keys this crate does not interpret, kept for round-trips.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The content of an input or of a `next` connection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentConnection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<Box<DocumentBlock>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Box<DocumentBlock>>,
}

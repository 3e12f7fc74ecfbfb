use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_HEADER: &str = "#!/usr/bin/env python3\n\
# Generated Python code from Blockly\n\
# You can copy this code and run it in any Python environment";

/// Options controlling how a whole workspace is assembled into a Python document.
///
/// Every field has a default, so a partial JSON object such as
/// `{"header": null}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Comment block placed at the top of the document. `None` omits it.
    pub header: Option<String>,
    /// Emit `from module import name` lines for the imports the blocks require.
    pub include_imports: bool,
    /// Emit `name = None` for every workspace variable before the body.
    pub declare_variables: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            header: Some(DEFAULT_HEADER.to_string()),
            include_imports: true,
            declare_variables: true,
        }
    }
}

impl GeneratorOptions {
    /// Options producing only the emitted statements.
    pub fn bare() -> Self {
        Self {
            header: None,
            include_imports: false,
            declare_variables: false,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }
}

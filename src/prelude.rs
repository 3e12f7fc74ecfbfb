//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the kumiki crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use kumiki::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let registry = BlockRegistry::standard()?;
//! let json = std::fs::read_to_string("path/to/workspace.json")?;
//! let workspace = json.as_str().into_workspace(&registry)?;
//!
//! let code = Generator::new(&registry).workspace_to_code(&workspace)?;
//! println!("{}", code);
//! # Ok(())
//! # }
//! ```

// Registry
pub use crate::schema::{BlockKind, BlockRegistry, BlockType, Category};

// Workspace model and conversion
pub use crate::workspace::storage::{KeyValueStore, MemoryStore};
pub use crate::workspace::{Block, DisplayBlock, IntoWorkspace, Workspace, WorkspaceDocument};

// Generation
pub use crate::ast::{Emission, FieldValue, Order, VariableRef};
pub use crate::config::GeneratorOptions;
pub use crate::generator::Generator;
pub use crate::session::{ChangeEvent, EditorSession};

// Error types
pub use crate::error::{EmitError, RegistryError, SessionError, WorkspaceError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

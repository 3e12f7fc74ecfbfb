//! # Kumiki - Block Workspace to Python Transpiler
//!
//! **Kumiki** turns a block workspace built in a visual block editor into Python
//! source. The blocks cover text and I/O, dictionaries and the construction of
//! LangChain-style LLM chains; the generated program is plain Python that can be
//! copied out and run anywhere.
//!
//! ## Core Workflow
//!
//! 1.  **Build the Registry**: `BlockRegistry::standard()` describes every block type:
//!     its display template, sockets, fields, connection checks and the defaults
//!     substituted for unconnected inputs. Use `BlockRegistry::builder()` to override
//!     definitions or accept foreign type names.
//! 2.  **Load a Workspace**: Convert the editor's JSON document with the `IntoWorkspace`
//!     trait. Every block is validated against the registry at this boundary.
//! 3.  **Generate**: A `Generator` folds each block tree into Python text, placing
//!     parentheses only where operator precedence requires them, and assembles the
//!     header, imports, variable declarations and body into one document.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kumiki::prelude::*;
//!
//! fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     let registry = BlockRegistry::standard()?;
//!
//!     let json = std::fs::read_to_string("workspace.json")?;
//!     let workspace = json.as_str().into_workspace(&registry)?;
//!
//!     let generator = Generator::builder(&registry)
//!         .with_header(None)
//!         .build();
//!     println!("{}", generator.workspace_to_code(&workspace)?);
//!
//!     // Single blocks can be emitted directly.
//!     let print = Block::new(BlockKind::Print).with_input("VALUE", Block::text("hello"));
//!     assert_eq!(generator.emit_block(&print)?.into_statement(), "print('hello')\n");
//!     Ok(())
//! }
//! ```

pub mod ast;
pub mod config;
pub mod error;
pub mod generator;
pub mod prelude;
pub mod schema;
pub mod session;
pub mod workspace;

#[cfg(feature = "python-bindings")]
mod python;

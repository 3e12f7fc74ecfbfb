//! The block schema registry.
//!
//! A [`BlockRegistry`] is built once, validated as a whole, and then shared by
//! reference with everything that needs block metadata: document conversion,
//! the code generator and the editor session.

use crate::error::RegistryError;
use ahash::AHashMap;
use tracing::debug;

pub mod catalog;
mod definition;
mod kind;

pub use definition::*;
pub use kind::*;

/// Immutable registry of every block type.
#[derive(Debug, Clone)]
pub struct BlockRegistry {
    /// Indexed by [`BlockKind::index`]; complete by construction.
    types: Vec<BlockType>,
    aliases: AHashMap<String, BlockKind>,
}

impl BlockRegistry {
    /// The registry with all built-in definitions and no aliases.
    pub fn standard() -> Result<Self, RegistryError> {
        Self::builder().build()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The definition of `kind`.
    pub fn get(&self, kind: BlockKind) -> &BlockType {
        &self.types[kind.index()]
    }

    /// Resolves a type name from a document: canonical names first, then aliases.
    pub fn resolve(&self, type_name: &str) -> Option<BlockKind> {
        BlockKind::from_type_name(type_name).or_else(|| self.aliases.get(type_name).copied())
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockType> {
        self.types.iter()
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &BlockType> {
        self.types.iter().filter(move |t| t.category == category)
    }

    /// The documented default for an unconnected socket.
    pub fn socket_default(&self, kind: BlockKind, socket: &str) -> Option<&'static str> {
        self.get(kind).socket_def(socket).and_then(|s| s.default)
    }
}

/// Assembles a [`BlockRegistry`], starting from the built-in catalogue.
pub struct RegistryBuilder {
    definitions: AHashMap<BlockKind, BlockType>,
    aliases: Vec<(String, String)>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        let mut definitions = AHashMap::new();
        catalog::register_default_blocks(&mut definitions);
        Self {
            definitions,
            aliases: Vec::new(),
        }
    }

    /// Replaces the definition for `definition.kind`.
    pub fn with_definition(mut self, definition: BlockType) -> Self {
        self.definitions.insert(definition.kind, definition);
        self
    }

    /// Accepts `alias` as another name for the block type `canonical` when loading documents.
    pub fn with_type_alias(mut self, alias: &str, canonical: &str) -> Self {
        self.aliases.push((alias.to_string(), canonical.to_string()));
        self
    }

    /// Drops the definition of `kind`. The build will fail unless it is re-added.
    pub fn without(mut self, kind: BlockKind) -> Self {
        self.definitions.remove(&kind);
        self
    }

    /// Checks that every kind is defined and every definition is well-formed.
    pub fn build(mut self) -> Result<BlockRegistry, RegistryError> {
        let mut types = Vec::with_capacity(BlockKind::ALL.len());
        for kind in BlockKind::ALL {
            let mut definition =
                self.definitions
                    .remove(kind)
                    .ok_or_else(|| RegistryError::MissingDefinition {
                        type_name: kind.type_name().to_string(),
                    })?;
            definition.prepare()?;
            types.push(definition);
        }

        let mut aliases = AHashMap::new();
        for (alias, target) in self.aliases {
            if BlockKind::from_type_name(&alias).is_some() {
                return Err(RegistryError::AliasConflict { alias });
            }
            let kind = BlockKind::from_type_name(&target)
                .ok_or_else(|| RegistryError::UnknownAliasTarget {
                    alias: alias.clone(),
                    target: target.clone(),
                })?;
            aliases.insert(alias, kind);
        }

        debug!(
            "block registry built with {} types and {} aliases",
            types.len(),
            aliases.len()
        );
        Ok(BlockRegistry { types, aliases })
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

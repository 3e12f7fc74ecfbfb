//! The canonical in-memory block graph.
//!
//! Documents are parsed into the raw [`document`] structs, then converted and
//! validated against a [`BlockRegistry`](crate::schema::BlockRegistry) into a
//! [`Workspace`]. The generator only ever sees validated workspaces, or trees
//! assembled with the [`Block`] builder methods.

pub mod conversion;
pub mod display;
pub mod document;
pub mod storage;

pub use conversion::*;
pub use display::*;
pub use document::*;

use crate::ast::{FieldValue, VariableRef};
use crate::schema::BlockKind;
use std::collections::BTreeMap;

/// A complete workspace: top-level blocks and the variable table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workspace {
    pub top_blocks: Vec<Block>,
    pub variables: Vec<Variable>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.top_blocks.is_empty() && self.variables.is_empty()
    }

    pub fn clear(&mut self) {
        self.top_blocks.clear();
        self.variables.clear();
    }

    pub fn with_block(mut self, block: Block) -> Self {
        self.top_blocks.push(block);
        self
    }

    pub fn with_variable(mut self, id: &str, name: &str) -> Self {
        self.variables.push(Variable::new(id, name));
        self
    }

    pub fn variable(&self, id: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.id == id)
    }

    /// Top-level blocks in reading order: by canvas row, then column.
    /// Blocks without a position sort as if placed at the origin.
    pub fn ordered_top_blocks(&self) -> Vec<&Block> {
        let mut blocks: Vec<&Block> = self.top_blocks.iter().collect();
        blocks.sort_by(|a, b| {
            let (ax, ay) = a.position.map_or((0.0, 0.0), |p| (p.x, p.y));
            let (bx, by) = b.position.map_or((0.0, 0.0), |p| (p.x, p.y));
            ay.total_cmp(&by).then(ax.total_cmp(&bx))
        });
        blocks
    }

    /// Total number of blocks, including nested and chained ones.
    pub fn block_count(&self) -> usize {
        self.top_blocks
            .iter()
            .flat_map(|b| b.chain())
            .map(Block::subtree_size)
            .sum()
    }
}

/// An entry of the workspace variable table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub id: String,
    pub name: String,
    pub var_type: Option<String>,
}

impl Variable {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            var_type: None,
        }
    }
}

/// Canvas coordinates of a top-level block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// What occupies one socket of a block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Input {
    pub block: Option<Box<Block>>,
    pub shadow: Option<Box<Block>>,
}

impl Input {
    /// The block that provides this socket's code: the real block, else the shadow.
    pub fn connected(&self) -> Option<&Block> {
        self.block.as_deref().or(self.shadow.as_deref())
    }
}

/// A block instance. A block owns its inputs and the rest of its statement chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: String,
    pub kind: BlockKind,
    pub position: Option<Position>,
    pub enabled: bool,
    pub fields: BTreeMap<String, FieldValue>,
    pub inputs: BTreeMap<String, Input>,
    pub next: Option<Box<Block>>,
    /// Editor state with no meaning for emission (collapsed, inline, extraState, ...).
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            id: String::new(),
            kind,
            position: None,
            enabled: true,
            fields: BTreeMap::new(),
            inputs: BTreeMap::new(),
            next: None,
            extra: serde_json::Map::new(),
        }
    }

    /// A `text` block holding `value`.
    pub fn text(value: &str) -> Self {
        Self::new(BlockKind::Text).with_field("TEXT", value)
    }

    /// A `math_number` block holding `value`.
    pub fn number(value: f64) -> Self {
        Self::new(BlockKind::Number).with_field("NUM", value)
    }

    /// A `variables_get` block reading the variable with id `variable_id`.
    pub fn variable(variable_id: &str) -> Self {
        Self::new(BlockKind::VariableGet).with_field("VAR", VariableRef::new(variable_id))
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn with_field(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// Connects `block` to the socket `name` (a value, or the head of a statement chain).
    pub fn with_input(mut self, name: &str, block: Block) -> Self {
        self.inputs.entry(name.to_string()).or_default().block = Some(Box::new(block));
        self
    }

    pub fn with_shadow(mut self, name: &str, block: Block) -> Self {
        self.inputs.entry(name.to_string()).or_default().shadow = Some(Box::new(block));
        self
    }

    /// Appends `block` at the end of this block's statement chain.
    pub fn with_next(mut self, block: Block) -> Self {
        let mut slot = &mut self.next;
        while let Some(existing) = slot {
            slot = &mut existing.next;
        }
        *slot = Some(Box::new(block));
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Position { x, y });
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn input(&self, name: &str) -> Option<&Block> {
        self.inputs.get(name).and_then(Input::connected)
    }

    /// This block followed by every block linked through `next`.
    pub fn chain(&self) -> Chain<'_> {
        Chain {
            current: Some(self),
        }
    }

    /// Number of blocks in this block's inputs, counted recursively, plus one.
    /// Does not follow `next`.
    pub fn subtree_size(&self) -> usize {
        1 + self
            .inputs
            .values()
            .flat_map(|input| input.block.iter().chain(input.shadow.iter()))
            .flat_map(|child| child.chain())
            .map(Block::subtree_size)
            .sum::<usize>()
    }
}

/// Iterator over a statement chain.
pub struct Chain<'a> {
    current: Option<&'a Block>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Block;

    fn next(&mut self) -> Option<Self::Item> {
        let block = self.current?;
        self.current = block.next.as_deref();
        Some(block)
    }
}

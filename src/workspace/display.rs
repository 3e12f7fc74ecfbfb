use super::{Block, Input};
use itertools::Itertools;
use std::fmt;

/// Renders a block, its inputs and the rest of its statement chain as a tree.
///
/// ```text
/// └── print_block #p1
///     └── VALUE
///         └── text #t1 TEXT="hello"
/// ```
pub struct DisplayBlock<'a> {
    block: &'a Block,
}

impl<'a> DisplayBlock<'a> {
    pub fn new(block: &'a Block) -> Self {
        Self { block }
    }

    fn fmt_chain(&self, head: &Block, f: &mut fmt::Formatter<'_>, prefix: &str) -> fmt::Result {
        let blocks: Vec<&Block> = head.chain().collect();
        let count = blocks.len();
        for (i, block) in blocks.into_iter().enumerate() {
            self.fmt_block(block, f, prefix, i + 1 == count)?;
        }
        Ok(())
    }

    fn fmt_block(
        &self,
        block: &Block,
        f: &mut fmt::Formatter<'_>,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        let node_marker = if is_last { "└── " } else { "├── " };
        write!(f, "{}{}{}", prefix, node_marker, block.kind)?;
        if !block.id.is_empty() {
            write!(f, " #{}", block.id)?;
        }
        if !block.fields.is_empty() {
            let fields = block
                .fields
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .join(" ");
            write!(f, " {}", fields)?;
        }
        if !block.enabled {
            write!(f, " (disabled)")?;
        }
        writeln!(f)?;

        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        let count = block.inputs.len();
        for (i, (name, input)) in block.inputs.iter().enumerate() {
            self.fmt_input(name, input, f, &child_prefix, i + 1 == count)?;
        }
        Ok(())
    }

    fn fmt_input(
        &self,
        name: &str,
        input: &Input,
        f: &mut fmt::Formatter<'_>,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        let node_marker = if is_last { "└── " } else { "├── " };
        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        match (&input.block, &input.shadow) {
            (Some(block), _) => {
                writeln!(f, "{}{}{}", prefix, node_marker, name)?;
                self.fmt_chain(block, f, &child_prefix)
            }
            (None, Some(shadow)) => {
                writeln!(f, "{}{}{} (shadow)", prefix, node_marker, name)?;
                self.fmt_chain(shadow, f, &child_prefix)
            }
            (None, None) => writeln!(f, "{}{}{} <empty>", prefix, node_marker, name),
        }
    }
}

impl fmt::Display for DisplayBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_chain(self.block, f, "")
    }
}

//! Python code generation.
//!
//! A [`Generator`] borrows a built [`BlockRegistry`] and turns blocks or whole
//! workspaces into Python source. Each run gets a fresh [`EmitContext`]; the
//! block tree is never modified.

use crate::ast::Emission;
use crate::config::GeneratorOptions;
use crate::error::EmitError;
use crate::schema::BlockRegistry;
use crate::workspace::{Block, Workspace};
use itertools::Itertools;
use tracing::debug;

mod context;
pub mod names;
mod python;

pub use context::EmitContext;

pub struct Generator<'r> {
    registry: &'r BlockRegistry,
    options: GeneratorOptions,
}

pub struct GeneratorBuilder<'r> {
    registry: &'r BlockRegistry,
    options: GeneratorOptions,
}

impl<'r> GeneratorBuilder<'r> {
    pub fn new(registry: &'r BlockRegistry) -> Self {
        Self {
            registry,
            options: GeneratorOptions::default(),
        }
    }

    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_header(mut self, header: Option<&str>) -> Self {
        self.options.header = header.map(str::to_string);
        self
    }

    pub fn with_imports(mut self, include: bool) -> Self {
        self.options.include_imports = include;
        self
    }

    pub fn with_variable_declarations(mut self, declare: bool) -> Self {
        self.options.declare_variables = declare;
        self
    }

    pub fn build(self) -> Generator<'r> {
        Generator {
            registry: self.registry,
            options: self.options,
        }
    }
}

impl<'r> Generator<'r> {
    /// A generator with default options.
    pub fn new(registry: &'r BlockRegistry) -> Self {
        GeneratorBuilder::new(registry).build()
    }

    pub fn builder(registry: &'r BlockRegistry) -> GeneratorBuilder<'r> {
        GeneratorBuilder::new(registry)
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn registry(&self) -> &'r BlockRegistry {
        self.registry
    }

    /// Emits a single block and its inputs, without following `next`.
    ///
    /// Variable references resolve through the names they carry, since there
    /// is no workspace variable table.
    pub fn emit_block(&self, block: &Block) -> Result<Emission, EmitError> {
        EmitContext::new(self.registry, &[]).emit(block)
    }

    /// Emits every block of a statement chain as statement text, skipping disabled blocks.
    fn chain_to_code(ctx: &mut EmitContext<'_>, head: &Block) -> Result<String, EmitError> {
        let mut code = String::new();
        for block in head.chain().filter(|b| b.enabled) {
            code.push_str(&ctx.emit(block)?.into_statement());
        }
        Ok(code)
    }

    /// Assembles the complete Python document for `workspace`.
    pub fn workspace_to_code(&self, workspace: &Workspace) -> Result<String, EmitError> {
        let mut ctx = EmitContext::new(self.registry, &workspace.variables);

        let mut chains = Vec::new();
        for head in workspace.ordered_top_blocks() {
            let code = Self::chain_to_code(&mut ctx, head)?;
            if !code.trim().is_empty() {
                chains.push(code);
            }
        }
        let body = chains.join("\n");

        let mut sections: Vec<String> = Vec::new();
        if let Some(header) = &self.options.header {
            sections.push(header.clone());
        }
        if self.options.include_imports && !ctx.imports().is_empty() {
            let imports = ctx
                .imports()
                .iter()
                .chunk_by(|import| import.module)
                .into_iter()
                .map(|(module, group)| {
                    format!("from {} import {}", module, group.map(|i| i.name).join(", "))
                })
                .join("\n");
            sections.push(imports);
        }
        if self.options.declare_variables && !workspace.variables.is_empty() {
            let declarations = workspace
                .variables
                .iter()
                .filter_map(|v| ctx.name_of(&v.id))
                .map(|name| format!("{} = None", name))
                .join("\n");
            sections.push(declarations);
        }
        sections.push(body);

        let document = sections
            .iter()
            .map(|section| section.trim_end())
            .filter(|section| !section.is_empty())
            .join("\n\n");
        if document.is_empty() {
            return Ok(String::new());
        }

        let code = document.lines().map(str::trim_end).join("\n") + "\n";
        debug!(
            "generated {} lines from {} blocks",
            code.lines().count(),
            workspace.block_count()
        );
        Ok(code)
    }
}

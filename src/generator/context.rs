use super::names::NameDb;
use super::python;
use crate::ast::{Emission, FieldValue, Order};
use crate::error::EmitError;
use crate::schema::{BlockRegistry, FieldDef, PyImport};
use crate::workspace::{Block, Variable};
use std::collections::BTreeSet;

/// Per-run emission state: the variable name table and the imports collected so far.
///
/// A context is created for every generation run and never touches the block tree.
pub struct EmitContext<'r> {
    registry: &'r BlockRegistry,
    names: NameDb,
    imports: BTreeSet<PyImport>,
}

impl<'r> EmitContext<'r> {
    /// A context whose name table is seeded, in order, from `variables`.
    pub fn new(registry: &'r BlockRegistry, variables: &[Variable]) -> Self {
        let imported = registry
            .iter()
            .flat_map(|t| {
                t.imports
                    .iter()
                    .copied()
                    .chain(t.sockets().filter_map(|s| s.default_import))
            })
            .map(|import| import.name);
        let mut names = NameDb::new(imported);
        for variable in variables {
            names.declare(&variable.id, &variable.name);
        }
        Self {
            registry,
            names,
            imports: BTreeSet::new(),
        }
    }

    pub fn registry(&self) -> &'r BlockRegistry {
        self.registry
    }

    /// Emits `block` and records the imports its type declares.
    pub fn emit(&mut self, block: &Block) -> Result<Emission, EmitError> {
        self.imports.extend(self.registry.get(block.kind).imports.iter().copied());
        python::emit_block(self, block)
    }

    /// The code of the block connected to `socket`, parenthesized if it binds
    /// looser than `required`. An unconnected socket yields its registered
    /// default, or an empty string when the socket declares none.
    pub fn value_to_code(
        &mut self,
        block: &Block,
        socket: &str,
        required: Order,
    ) -> Result<String, EmitError> {
        match connected(block, socket) {
            Some(child) => {
                let emission = self.emit(child)?;
                let order = emission.order();
                Ok(order.wrap(emission.into_value(), required))
            }
            None => {
                let order = self
                    .registry
                    .get(block.kind)
                    .socket_def(socket)
                    .map_or(Order::Atomic, |def| def.default_order);
                Ok(order.wrap(self.socket_default(block, socket), required))
            }
        }
    }

    /// One item per enabled block in the statement chain of `socket`, in chain order.
    ///
    /// Plain statements contribute each of their non-blank, non-comment lines.
    pub fn statement_items(&mut self, block: &Block, socket: &str) -> Result<Vec<String>, EmitError> {
        let mut items = Vec::new();
        let Some(head) = block.inputs.get(socket).and_then(|input| input.connected()) else {
            return Ok(items);
        };
        for child in head.chain().filter(|b| b.enabled) {
            match self.emit(child)? {
                Emission::Item(text) => items.push(text),
                Emission::Expression { code, .. } => items.push(code),
                Emission::Statement(code) => items.extend(
                    code.lines()
                        .map(str::trim)
                        .filter(|line| !line.is_empty() && !line.starts_with('#'))
                        .map(str::to_string),
                ),
            }
        }
        Ok(items)
    }

    /// The default of an unconnected socket, recording the import it needs.
    pub fn socket_default(&mut self, block: &Block, socket: &str) -> String {
        let Some(def) = self.registry.get(block.kind).socket_def(socket) else {
            return String::new();
        };
        if let Some(import) = def.default_import {
            self.imports.insert(import);
        }
        def.default.unwrap_or_default().to_string()
    }

    /// The value of field `name`, falling back to the field's declared default.
    pub fn field(&self, block: &Block, name: &str) -> Option<FieldValue> {
        block.field(name).cloned().or_else(|| {
            self.registry
                .get(block.kind)
                .field_def(name)
                .and_then(FieldDef::default_value)
        })
    }

    /// The text of field `name`.
    pub fn field_text(&self, block: &Block, name: &str) -> Result<String, EmitError> {
        match self.field(block, name) {
            Some(FieldValue::Text(text)) => Ok(text),
            Some(other) => Err(invalid_field(block, name, format!("expected text, found {}", other))),
            None => Err(invalid_field(block, name, "missing value".to_string())),
        }
    }

    /// The number held by field `name`.
    pub fn field_number(&self, block: &Block, name: &str) -> Result<f64, EmitError> {
        let value = self
            .field(block, name)
            .ok_or_else(|| invalid_field(block, name, "missing value".to_string()))?;
        value
            .as_number()
            .ok_or_else(|| invalid_field(block, name, format!("expected a number, found {}", value)))
    }

    /// The Python identifier of the variable referenced by field `name`.
    ///
    /// A reference missing from the variable table is declared on the fly
    /// when it carries a display name.
    pub fn variable_name(&mut self, block: &Block, name: &str) -> Result<String, EmitError> {
        let Some(FieldValue::Variable(reference)) = block.field(name) else {
            return Err(invalid_field(block, name, "expected a variable reference".to_string()));
        };
        if let Some(known) = self.names.get(&reference.id) {
            return Ok(known.to_string());
        }
        match &reference.name {
            Some(display) => Ok(self.names.declare(&reference.id, display).to_string()),
            None => Err(EmitError::UnknownVariable {
                block_id: block.id.clone(),
                variable_id: reference.id.clone(),
            }),
        }
    }

    /// The Python identifier assigned to variable `id`, if any.
    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.names.get(id)
    }

    /// Every import recorded during this run, sorted by module then name.
    pub fn imports(&self) -> &BTreeSet<PyImport> {
        &self.imports
    }
}

/// The enabled block occupying `socket`: the real block, else the shadow.
fn connected<'b>(block: &'b Block, socket: &str) -> Option<&'b Block> {
    let input = block.inputs.get(socket)?;
    [input.block.as_deref(), input.shadow.as_deref()]
        .into_iter()
        .flatten()
        .find(|b| b.enabled)
}

fn invalid_field(block: &Block, field: &str, message: String) -> EmitError {
    EmitError::InvalidField {
        block_id: block.id.clone(),
        field: field.to_string(),
        message,
    }
}

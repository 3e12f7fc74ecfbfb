use super::document::{
    BlockSection, DocumentBlock, DocumentConnection, DocumentVariable, WorkspaceDocument,
};
use super::{Block, Input, Position, Variable, Workspace};
use crate::ast::FieldValue;
use crate::error::WorkspaceError;
use crate::schema::{BlockRegistry, BlockType, Check, FieldDef, SocketKind};
use std::collections::BTreeMap;
use tracing::debug;

/// Conversion of a serialized workspace into a validated [`Workspace`].
///
/// Every block is checked against the registry on the way in, so a workspace
/// produced by this trait only contains known block types, declared inputs and
/// fields, type-compatible connections and resolvable variables.
///
/// # Example
///
/// ```rust,no_run
/// use kumiki::prelude::*;
///
/// let registry = BlockRegistry::standard().unwrap();
/// let json = r#"{"blocks": {"languageVersion": 0, "blocks": [
///     {"type": "print_block", "id": "p1", "inputs": {
///         "VALUE": {"block": {"type": "text", "id": "t1", "fields": {"TEXT": "hi"}}}
///     }}
/// ]}}"#;
/// let workspace = json.into_workspace(&registry).unwrap();
/// assert_eq!(workspace.block_count(), 2);
/// ```
pub trait IntoWorkspace {
    /// Consumes the document and converts it into a workspace validated against `registry`.
    fn into_workspace(self, registry: &BlockRegistry) -> Result<Workspace, WorkspaceError>;
}

impl IntoWorkspace for WorkspaceDocument {
    fn into_workspace(self, registry: &BlockRegistry) -> Result<Workspace, WorkspaceError> {
        let mut converter = Converter {
            registry,
            variables: self
                .variables
                .into_iter()
                .map(|v| Variable {
                    id: v.id,
                    name: v.name,
                    var_type: v.var_type,
                })
                .collect(),
        };

        let raw_blocks = self.blocks.map(|section| section.blocks).unwrap_or_default();
        let mut top_blocks = Vec::with_capacity(raw_blocks.len());
        for raw in raw_blocks {
            top_blocks.push(converter.convert(raw)?);
        }

        let workspace = Workspace {
            top_blocks,
            variables: converter.variables,
        };
        debug!(
            "converted workspace with {} blocks and {} variables",
            workspace.block_count(),
            workspace.variables.len()
        );
        Ok(workspace)
    }
}

impl IntoWorkspace for &str {
    fn into_workspace(self, registry: &BlockRegistry) -> Result<Workspace, WorkspaceError> {
        WorkspaceDocument::from_json(self)
            .map_err(|e| WorkspaceError::JsonParseError(e.to_string()))?
            .into_workspace(registry)
    }
}

struct Converter<'r> {
    registry: &'r BlockRegistry,
    variables: Vec<Variable>,
}

impl Converter<'_> {
    fn convert(&mut self, raw: DocumentBlock) -> Result<Block, WorkspaceError> {
        let kind = self.registry.resolve(&raw.block_type).ok_or_else(|| {
            WorkspaceError::UnknownBlockType {
                block_id: raw.id.clone(),
                type_name: raw.block_type.clone(),
            }
        })?;
        let registry = self.registry;
        let definition = registry.get(kind);

        let mut block = Block::new(kind).with_id(&raw.id);
        block.enabled = raw.enabled.unwrap_or(true);
        block.extra = raw.extra;
        if raw.x.is_some() || raw.y.is_some() {
            block.position = Some(Position {
                x: raw.x.unwrap_or(0.0),
                y: raw.y.unwrap_or(0.0),
            });
        }

        for (name, value) in raw.fields {
            self.check_field(&raw.id, definition, &name, &value)?;
            block.fields.insert(name, value);
        }

        for (name, connection) in raw.inputs {
            let socket = definition.socket_def(&name).ok_or_else(|| {
                WorkspaceError::UnknownInput {
                    block_id: raw.id.clone(),
                    type_name: definition.type_name().to_string(),
                    input: name.clone(),
                }
            })?;
            let input = self.convert_connection(&raw.id, &name, connection, |child| {
                check_socket(socket.kind, socket.check, child)
            })?;
            block.inputs.insert(name, input);
        }

        if let Some(connection) = raw.next {
            if connection.shadow.is_some() {
                return Err(WorkspaceError::ConnectionError {
                    block_id: raw.id.clone(),
                    input: "next".to_string(),
                    message: "a next connection cannot hold a shadow block".to_string(),
                });
            }
            let next = self.convert_connection(&raw.id, "next", connection, |child| {
                let Some(ours) = definition.connections.next else {
                    return Err(format!("'{}' has no next connection", definition.type_name()));
                };
                check_socket(SocketKind::Statement, ours, child)
            })?;
            block.next = next.block;
        }

        Ok(block)
    }

    /// Converts the real and shadow blocks of one connection, validating each with `check`.
    fn convert_connection(
        &mut self,
        parent_id: &str,
        socket: &str,
        connection: DocumentConnection,
        check: impl Fn(&BlockType) -> Result<(), String>,
    ) -> Result<Input, WorkspaceError> {
        let mut input = Input::default();
        for (raw, slot) in [
            (connection.block, &mut input.block),
            (connection.shadow, &mut input.shadow),
        ] {
            let Some(raw) = raw else { continue };
            let child = self.convert(*raw)?;
            check(self.registry.get(child.kind)).map_err(|message| {
                WorkspaceError::ConnectionError {
                    block_id: parent_id.to_string(),
                    input: socket.to_string(),
                    message,
                }
            })?;
            *slot = Some(Box::new(child));
        }
        Ok(input)
    }

    fn check_field(
        &mut self,
        block_id: &str,
        definition: &BlockType,
        name: &str,
        value: &FieldValue,
    ) -> Result<(), WorkspaceError> {
        let field = definition
            .field_def(name)
            .ok_or_else(|| WorkspaceError::UnknownField {
                block_id: block_id.to_string(),
                type_name: definition.type_name().to_string(),
                field: name.to_string(),
            })?;
        field
            .validate(value)
            .map_err(|message| WorkspaceError::InvalidFieldValue {
                block_id: block_id.to_string(),
                field: name.to_string(),
                message,
            })?;

        if let (FieldDef::Variable { .. }, FieldValue::Variable(reference)) = (field, value) {
            if self.variables.iter().any(|v| v.id == reference.id) {
                return Ok(());
            }
            let Some(var_name) = &reference.name else {
                return Err(WorkspaceError::UnknownVariable {
                    block_id: block_id.to_string(),
                    variable_id: reference.id.clone(),
                });
            };
            debug!("declaring variable '{}' from block '{}'", var_name, block_id);
            self.variables.push(Variable {
                id: reference.id.clone(),
                name: var_name.clone(),
                var_type: reference.var_type.clone(),
            });
        }
        Ok(())
    }
}

/// Checks that a block of type `child` may occupy a socket of kind `kind` with check `ours`.
fn check_socket(kind: SocketKind, ours: Check, child: &BlockType) -> Result<(), String> {
    let theirs = match kind {
        SocketKind::Value => child
            .connections
            .output
            .ok_or_else(|| format!("'{}' has no output connection", child.type_name()))?,
        SocketKind::Statement | SocketKind::Dummy => child
            .connections
            .previous
            .ok_or_else(|| format!("'{}' has no previous connection", child.type_name()))?,
    };
    if ours.accepts(theirs) {
        Ok(())
    } else {
        Err(format!(
            "'{}' does not satisfy the connection check",
            child.type_name()
        ))
    }
}

impl From<&Workspace> for WorkspaceDocument {
    fn from(workspace: &Workspace) -> Self {
        let blocks = (!workspace.top_blocks.is_empty()).then(|| BlockSection {
            language_version: 0,
            blocks: workspace.top_blocks.iter().map(DocumentBlock::from).collect(),
        });
        let variables = workspace
            .variables
            .iter()
            .map(|v| DocumentVariable {
                name: v.name.clone(),
                id: v.id.clone(),
                var_type: v.var_type.clone(),
            })
            .collect();
        WorkspaceDocument { blocks, variables }
    }
}

impl From<&Block> for DocumentBlock {
    fn from(block: &Block) -> Self {
        let inputs: BTreeMap<String, DocumentConnection> = block
            .inputs
            .iter()
            .map(|(name, input)| (name.clone(), DocumentConnection::from(input)))
            .collect();
        DocumentBlock {
            block_type: block.kind.type_name().to_string(),
            id: block.id.clone(),
            x: block.position.map(|p| p.x),
            y: block.position.map(|p| p.y),
            enabled: (!block.enabled).then_some(false),
            fields: block.fields.clone(),
            inputs,
            next: block.next.as_deref().map(|next| DocumentConnection {
                block: Some(Box::new(DocumentBlock::from(next))),
                shadow: None,
            }),
            extra: block.extra.clone(),
        }
    }
}

impl From<&Input> for DocumentConnection {
    fn from(input: &Input) -> Self {
        DocumentConnection {
            block: input
                .block
                .as_deref()
                .map(|b| Box::new(DocumentBlock::from(b))),
            shadow: input
                .shadow
                .as_deref()
                .map(|b| Box::new(DocumentBlock::from(b))),
        }
    }
}

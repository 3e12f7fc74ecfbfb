use thiserror::Error;

/// Errors raised while assembling the block registry.
///
/// These are configuration errors: a registry that fails to build must never be
/// used for loading or emission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Block type '{type_name}' has no registered definition")]
    MissingDefinition { type_name: String },

    #[error("Block type '{type_name}' declares '{name}' more than once")]
    DuplicateArgument { type_name: String, name: String },

    #[error("Block type '{type_name}' has an invalid display template: {message}")]
    InvalidTemplate { type_name: String, message: String },

    #[error("Block type '{type_name}' cannot have both an output and a previous connection")]
    ConflictingConnections { type_name: String },

    #[error("Alias '{alias}' points to unknown block type '{target}'")]
    UnknownAliasTarget { alias: String, target: String },

    #[error("Alias '{alias}' shadows a built-in block type")]
    AliasConflict { alias: String },
}

/// Errors that can occur while converting or validating a workspace document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkspaceError {
    #[error("Failed to parse workspace JSON: {0}")]
    JsonParseError(String),

    #[error("Block '{block_id}' has an unregistered block type: '{type_name}'")]
    UnknownBlockType { block_id: String, type_name: String },

    #[error("Block '{block_id}' of type '{type_name}' has no input named '{input}'")]
    UnknownInput {
        block_id: String,
        type_name: String,
        input: String,
    },

    #[error("Block '{block_id}' of type '{type_name}' has no field named '{field}'")]
    UnknownField {
        block_id: String,
        type_name: String,
        field: String,
    },

    #[error("Block '{block_id}' has an invalid value for field '{field}': {message}")]
    InvalidFieldValue {
        block_id: String,
        field: String,
        message: String,
    },

    #[error("A connection into block '{block_id}' on '{input}' is invalid: {message}")]
    ConnectionError {
        block_id: String,
        input: String,
        message: String,
    },

    #[error("Block '{block_id}' references undeclared variable '{variable_id}'")]
    UnknownVariable {
        block_id: String,
        variable_id: String,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors that can occur while emitting Python source from a block tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmitError {
    #[error("Block '{block_id}' references undeclared variable '{variable_id}'")]
    UnknownVariable {
        block_id: String,
        variable_id: String,
    },

    #[error("Block '{block_id}' has an invalid value for field '{field}': {message}")]
    InvalidField {
        block_id: String,
        field: String,
        message: String,
    },
}

/// Errors raised by a key-value store backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage I/O failed for '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to serialize workspace: {0}")]
    Serialize(String),
}

/// Errors raised while loading generator options.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read options file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse options: {0}")]
    Parse(String),
}

/// Errors surfaced by an editor session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

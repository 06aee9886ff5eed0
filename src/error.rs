use thiserror::Error;

/// Errors that can occur when converting a custom host format into a `Flow`.
#[derive(Error, Debug, Clone)]
pub enum FlowConversionError {
    #[error("Failed to parse flow JSON: {0}")]
    JsonParseError(String),

    #[error("Flow document has no root: '{0}' is not present in the node set")]
    RootNotFound(String),

    #[error("Invalid flow data: {0}")]
    ValidationError(String),
}

/// Errors that can occur while mutating a flow document through the editor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Node '{0}' not found in the flow")]
    NodeNotFound(String),

    #[error("Node '{node_id}' has no output handle '{handle}'")]
    HandleNotFound { node_id: String, handle: String },

    #[error("Node '{0}' cannot be connected to itself")]
    SelfConnection(String),

    #[error("Node '{node_id}' is a {kind} node and does not accept attachments")]
    AttachmentNotSupported { node_id: String, kind: String },

    #[error("The root node cannot be deleted")]
    RootDeletion,
}

/// Errors that can occur when saving or loading a flow archive.
#[derive(Error, Debug, Clone)]
pub enum ArchiveError {
    #[error("Could not read file '{path}': {message}")]
    Read { path: String, message: String },

    #[error("Could not write file '{path}': {message}")]
    Write { path: String, message: String },

    #[error("Archive serialization failed: {0}")]
    Serialize(String),

    #[error("Archive deserialization failed: {0}")]
    Deserialize(String),
}

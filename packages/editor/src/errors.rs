//! Error types for the editor

use nudge_common::CommonError;
use nudge_model::{InterfaceId, LayerId};
use thiserror::Error;

/// Why a structural edit was refused.
///
/// Returning one of these always means the document was left untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Layer not found: {0}")]
    LayerNotFound(LayerId),

    #[error("Parent not found: {0}")]
    ParentNotFound(LayerId),

    #[error("Interface not found: {0}")]
    InterfaceNotFound(InterfaceId),

    #[error("Would create cycle")]
    CycleDetected,

    #[error("Name must not be empty")]
    InvalidName,

    #[error("Name is unchanged")]
    UnchangedName,

    #[error("Index out of range: {index} (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Content patch of type {patch} does not fit a {layer} layer")]
    ContentMismatch { layer: String, patch: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("Storage error: {0}")]
    Storage(#[from] CommonError),
}

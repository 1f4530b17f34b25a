//! Error types for editing operations

use crate::script::ScriptError;
use picker_core::{GeometryError, ItemId, RenameError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("operation requires edit mode")]
    EditModeRequired,

    #[error("no stored data to paste")]
    EmptyClipboard,

    #[error("{0} is not in this scene")]
    ItemNotFound(ItemId),

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error(transparent)]
    Rename(#[from] RenameError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

pub type Result<T> = std::result::Result<T, EditorError>;

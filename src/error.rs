use crate::grid::GridError;
use crate::layer::LayerId;
use crate::persistence::PersistenceError;
use thiserror::Error;

/// Errors returned by editor operations.
///
/// A failed operation never changes the document or its history.
#[derive(Debug, Error)]
pub enum EditorError {
    /// An index or coordinate outside the grid; a contract violation by the caller
    #[error("cell index {index} is outside the {len}-cell canvas")]
    OutOfRange { index: usize, len: usize },

    /// Generic rejected action
    #[error("{0}")]
    PreconditionFailed(String),

    #[error("cannot remove the last remaining layer")]
    LastLayer,

    #[error("no layer with id {0}")]
    UnknownLayer(LayerId),

    #[error("a name is required")]
    EmptyName,

    #[error("invalid drawing name {0:?}")]
    InvalidName(String),

    #[error("canvas size {width}x{height} is outside 1..={max}", max = crate::document::MAX_DIMENSION)]
    InvalidDimensions { width: usize, height: usize },

    /// A loaded drawing failed validation; the open document was kept
    #[error("malformed drawing: {0}")]
    MalformedDrawing(String),

    #[error("drawing store unavailable: {0}")]
    PersistenceUnavailable(#[from] PersistenceError),
}

impl EditorError {
    /// Whether this error is a rejected user action rather than a contract or transport failure
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::PreconditionFailed(_)
                | Self::LastLayer
                | Self::UnknownLayer(_)
                | Self::EmptyName
                | Self::InvalidName(_)
                | Self::InvalidDimensions { .. }
                | Self::MalformedDrawing(_)
        )
    }
}

impl From<GridError> for EditorError {
    fn from(error: GridError) -> Self {
        match error {
            GridError::OutOfRange { index, len } => Self::OutOfRange { index, len },
            GridError::SizeMismatch { .. } => Self::MalformedDrawing(error.to_string()),
        }
    }
}

/// Result type for editor operations
pub type EditorResult<T> = Result<T, EditorError>;

use thiserror::Error;

/// Layout failures point at a catalog/graph mismatch or a bad canvas, never at user data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("note not in catalog: {0}")]
    NoteNotInCatalog(String),
    #[error("canvas must be positive, got {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },
}

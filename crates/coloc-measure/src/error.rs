//! Error types for coloc-measure

use thiserror::Error;

/// Errors that can occur while computing pairwise measurements
#[derive(Debug, Error)]
pub enum MeasureError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] coloc_core::Error),

    /// Two regions have mismatched shapes with no discoverable crop or
    /// parent relationship between them
    #[error("cannot align '{first}' with '{second}': {detail}")]
    Alignment {
        first: String,
        second: String,
        detail: String,
    },

    /// Crop indicator marks a different number of cells than the image has
    /// pixels
    #[error("crop indicator marks {marked} cells but the image has {pixels} pixels")]
    CropIndicator { marked: usize, pixels: usize },

    /// Invalid measurement configuration, reported at validation time
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Image name not present in the image set
    #[error("no image named '{0}' in the image set")]
    MissingImage(String),

    /// Object-set name not present in the object set
    #[error("no objects named '{0}' in the object set")]
    MissingObjects(String),
}

/// Result type for measurement operations
pub type MeasureResult<T> = Result<T, MeasureError>;

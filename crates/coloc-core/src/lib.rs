//! coloc-core - Basic data structures for image colocalization analysis
//!
//! This crate provides the fundamental containers used throughout the coloc
//! measurement library:
//!
//! - [`FImage`] - Floating-point intensity image
//! - [`Mask`] - Boolean pixel mask (validity masks and crop indicators)
//! - [`LabelMap`] - Integer object label image (0 = background)
//!
//! All three share the same row-major memory layout so that a position in one
//! container addresses the same pixel in the others.

pub mod error;
pub mod fimage;
pub mod labels;
pub mod mask;

pub use error::{Error, Result};
pub use fimage::FImage;
pub use labels::LabelMap;
pub use mask::Mask;

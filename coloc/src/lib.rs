//! coloc - Image colocalization statistics for Rust
//!
//! Computes pairwise statistical agreement between intensity images: the
//! Pearson correlation coefficient and a linear-regression slope, over whole
//! images or restricted to labeled objects, with crop-aware region alignment
//! and per-image validity masks.
//!
//! # Example
//!
//! ```
//! use coloc::{FImage, measure::{CorrelationConfig, CorrelationMeasurement,
//!     Image, ImageSet, ImagesOrObjects, Measurements, ObjectSet}};
//!
//! let pixels = FImage::from_fn(8, 8, |x, y| (x * y) as f64).unwrap();
//! let mut images = ImageSet::new();
//! images.insert("dna", Image::new(pixels.clone()));
//! images.insert("cytoplasm", Image::new(pixels));
//!
//! let config = CorrelationConfig::new(ImagesOrObjects::Images)
//!     .add_image("dna")
//!     .add_image("cytoplasm");
//! let module = CorrelationMeasurement::new(config).unwrap();
//! let mut measurements = Measurements::new();
//! module.run(&images, &ObjectSet::new(), &mut measurements).unwrap();
//! ```

// Re-export core types (primary data structures used everywhere)
pub use coloc_core::*;

// Re-export the measurement crate as a module to avoid name conflicts
pub use coloc_measure as measure;

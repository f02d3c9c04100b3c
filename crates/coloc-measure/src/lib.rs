//! coloc-measure - Pairwise correlation measurements between intensity images
//!
//! This crate computes the statistical agreement between pairs of intensity
//! images: the Pearson correlation coefficient and a linear-regression
//! slope, evaluated either over whole images or within labeled objects. It
//! handles images whose shapes differ because one is a crop of another, and
//! images carrying independent validity masks.
//!
//! The pipeline stages are exposed individually - alignment
//! ([`align_images`], [`align_to_objects`]), validity combination
//! ([`combine_validity`]), label partitioning ([`partition_labels`]) and
//! sample statistics ([`pair_statistics`]) - and composed by
//! [`CorrelationMeasurement`], which emits named measurements into a
//! [`Measurements`] store.
//!
//! # Examples
//!
//! ```
//! use coloc_core::FImage;
//! use coloc_measure::{
//!     CorrelationConfig, CorrelationMeasurement, Image, ImageSet,
//!     ImagesOrObjects, Measurements, ObjectSet,
//! };
//!
//! let pixels = FImage::from_fn(8, 8, |x, y| (x + y) as f64).unwrap();
//! let mut images = ImageSet::new();
//! images.insert("dna", Image::new(pixels.clone()));
//! images.insert("cytoplasm", Image::new(pixels));
//!
//! let config = CorrelationConfig::new(ImagesOrObjects::Images)
//!     .add_image("dna")
//!     .add_image("cytoplasm");
//! let module = CorrelationMeasurement::new(config).unwrap();
//!
//! let mut measurements = Measurements::new();
//! module.run(&images, &ObjectSet::new(), &mut measurements).unwrap();
//!
//! let corr = measurements
//!     .image_measurement("Correlation_Correlation_dna_cytoplasm")
//!     .unwrap();
//! assert!((corr - 1.0).abs() < 1e-12);
//! ```

pub mod align;
pub mod config;
pub mod error;
pub mod image;
pub mod measure;
pub mod partition;
pub mod stats;
pub mod validity;

// Re-export core types
pub use coloc_core;

// Re-export error types
pub use error::{MeasureError, MeasureResult};

// Re-export alignment types and functions
pub use align::{AlignedRegion, ObjectRegion, align_images, align_to_objects};

// Re-export configuration types
pub use config::{CorrelationConfig, ImagePair, ImagesOrObjects};

// Re-export descriptor and provider types
pub use image::{Image, ImageSet, ObjectSet, Objects};

// Re-export measurement types and constants
pub use measure::{
    CATEGORY_CORRELATION, CorrelationMeasurement, FEATURE_CORRELATION, FEATURE_SLOPE, IMAGE_KIND,
    Measurements, SkippedPair,
};

// Re-export pipeline stages
pub use partition::{LabelSample, partition_labels};
pub use stats::{PairStats, pair_statistics};
pub use validity::combine_validity;

//! Measurement configuration
//!
//! Declares which images and object sets participate in a correlation run
//! and whether statistics are computed over whole images, within objects, or
//! both. Declaration order matters twice: it fixes the pair key of every
//! unordered image pair, and through the pair key it fixes the regression
//! direction (the first-declared image is the independent variable).

use crate::error::{MeasureError, MeasureResult};

/// What the statistics are computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImagesOrObjects {
    /// Whole-image statistics only
    #[default]
    Images,
    /// Within-object statistics only
    Objects,
    /// Both whole-image and within-object statistics
    ImagesAndObjects,
}

/// Ordered pair of configured image names
///
/// The order is the declaration order, not an alphabetical or size-based
/// one; it determines the measurement name and the regression direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePair {
    /// Independent variable of the regression
    pub first: String,
    /// Dependent variable of the regression
    pub second: String,
}

impl ImagePair {
    /// The pair key string used in measurement names: `first_second`
    pub fn key(&self) -> String {
        format!("{}_{}", self.first, self.second)
    }
}

/// Configuration for one correlation measurement run
#[derive(Debug, Clone, Default)]
pub struct CorrelationConfig {
    /// Whether to measure images, objects, or both
    pub images_or_objects: ImagesOrObjects,
    /// Configured image names, in declaration order
    pub image_names: Vec<String>,
    /// Configured object-set names, in declaration order
    pub object_names: Vec<String>,
}

impl CorrelationConfig {
    /// Start an empty configuration for the given mode
    pub fn new(images_or_objects: ImagesOrObjects) -> Self {
        CorrelationConfig {
            images_or_objects,
            image_names: Vec::new(),
            object_names: Vec::new(),
        }
    }

    /// Declare an image; declaration order fixes pair keys
    pub fn add_image(mut self, name: impl Into<String>) -> Self {
        self.image_names.push(name.into());
        self
    }

    /// Declare an object set
    pub fn add_objects(mut self, name: impl Into<String>) -> Self {
        self.object_names.push(name.into());
        self
    }

    /// Whether whole-image statistics are requested
    pub fn wants_images(&self) -> bool {
        matches!(
            self.images_or_objects,
            ImagesOrObjects::Images | ImagesOrObjects::ImagesAndObjects
        )
    }

    /// Whether within-object statistics are requested
    pub fn wants_objects(&self) -> bool {
        matches!(
            self.images_or_objects,
            ImagesOrObjects::Objects | ImagesOrObjects::ImagesAndObjects
        )
    }

    /// Check the configuration before any computation runs
    ///
    /// # Errors
    ///
    /// Returns `MeasureError::Configuration` if fewer than two images are
    /// declared, if an object mode is requested without object sets, or if
    /// any name is empty or duplicated.
    pub fn validate(&self) -> MeasureResult<()> {
        if self.image_names.len() < 2 {
            return Err(MeasureError::Configuration(format!(
                "pairwise comparison needs at least 2 images, got {}",
                self.image_names.len()
            )));
        }
        if self.wants_objects() && self.object_names.is_empty() {
            return Err(MeasureError::Configuration(
                "object statistics requested but no object sets declared".to_string(),
            ));
        }

        for name in self.image_names.iter().chain(self.object_names.iter()) {
            if name.is_empty() {
                return Err(MeasureError::Configuration("empty region name".to_string()));
            }
        }
        for (i, name) in self.image_names.iter().enumerate() {
            if self.image_names[..i].contains(name) {
                return Err(MeasureError::Configuration(format!(
                    "image '{name}' declared more than once"
                )));
            }
        }
        for (i, name) in self.object_names.iter().enumerate() {
            if self.object_names[..i].contains(name) {
                return Err(MeasureError::Configuration(format!(
                    "object set '{name}' declared more than once"
                )));
            }
        }

        Ok(())
    }

    /// All unordered image pairs, keyed in declaration order
    ///
    /// For n declared images this yields n*(n-1)/2 pairs.
    pub fn image_pairs(&self) -> Vec<ImagePair> {
        let mut pairs = Vec::new();
        for (i, first) in self.image_names.iter().enumerate() {
            for second in &self.image_names[i + 1..] {
                pairs.push(ImagePair {
                    first: first.clone(),
                    second: second.clone(),
                });
            }
        }
        pairs
    }

    /// One-line human-readable summary of the configuration
    pub fn describe(&self) -> String {
        let mode = match self.images_or_objects {
            ImagesOrObjects::Images => "images",
            ImagesOrObjects::Objects => "objects",
            ImagesOrObjects::ImagesAndObjects => "images and objects",
        };
        format!(
            "correlate {} over {} [images: {}] [objects: {}]",
            self.image_names.join(", "),
            mode,
            self.image_names.len(),
            self.object_names.len()
        )
    }
}

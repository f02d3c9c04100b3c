//! Image and Objects descriptors, and the name-keyed sets that provide them
//!
//! An [`Image`] couples an intensity array with the metadata the aligner
//! needs: an optional validity mask, an optional crop indicator (a mask over
//! the parent frame marking the positions this image occupies in it), and an
//! optional parent image name. [`Objects`] couples a label map with the name
//! of the image establishing the frame the labels live in.
//!
//! Parent references are plain name handles resolved through [`ImageSet`] /
//! [`ObjectSet`], so descriptor graphs never form ownership cycles.

use crate::error::{MeasureError, MeasureResult};
use coloc_core::{Error as CoreError, FImage, LabelMap, Mask};
use std::collections::HashMap;

/// An intensity image plus the metadata used for alignment
#[derive(Debug, Clone)]
pub struct Image {
    /// Intensity data
    pixels: FImage,
    /// Validity mask, same shape as `pixels`; absent means all-valid
    mask: Option<Mask>,
    /// Crop indicator over the parent frame; its ON count equals the pixel
    /// count of this image
    crop_mask: Option<Mask>,
    /// Name of the parent image this one was cropped from
    parent: Option<String>,
}

impl Image {
    /// Wrap an intensity image with no mask and no crop relationship
    pub fn new(pixels: FImage) -> Self {
        Image {
            pixels,
            mask: None,
            crop_mask: None,
            parent: None,
        }
    }

    /// Attach a validity mask
    ///
    /// # Errors
    ///
    /// Returns `Error::IncompatibleSizes` if the mask shape differs from the
    /// image shape.
    pub fn with_mask(mut self, mask: Mask) -> MeasureResult<Self> {
        if mask.dimensions() != self.pixels.dimensions() {
            let (mw, mh) = mask.dimensions();
            let (w, h) = self.pixels.dimensions();
            return Err(CoreError::IncompatibleSizes(mw, mh, w, h).into());
        }
        self.mask = Some(mask);
        Ok(self)
    }

    /// Attach a crop indicator defined over the parent frame
    ///
    /// # Errors
    ///
    /// Returns `MeasureError::CropIndicator` if the indicator's ON count does
    /// not equal this image's pixel count.
    pub fn with_crop_mask(mut self, crop_mask: Mask) -> MeasureResult<Self> {
        let marked = crop_mask.count_on();
        if marked != self.pixels.len() {
            return Err(MeasureError::CropIndicator {
                marked,
                pixels: self.pixels.len(),
            });
        }
        self.crop_mask = Some(crop_mask);
        Ok(self)
    }

    /// Record the name of the parent image this one was cropped from
    pub fn with_parent(mut self, name: impl Into<String>) -> Self {
        self.parent = Some(name.into());
        self
    }

    /// Intensity data
    pub fn pixels(&self) -> &FImage {
        &self.pixels
    }

    /// Validity mask, if any
    pub fn mask(&self) -> Option<&Mask> {
        self.mask.as_ref()
    }

    /// Crop indicator, if any
    pub fn crop_mask(&self) -> Option<&Mask> {
        self.crop_mask.as_ref()
    }

    /// Parent image name, if any
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Image dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }
}

/// A set of labeled objects plus the frame they were segmented in
#[derive(Debug, Clone)]
pub struct Objects {
    /// Label data (0 = background)
    labels: LabelMap,
    /// Name of the image whose frame the labels live in
    parent: Option<String>,
}

impl Objects {
    /// Wrap a label map with no parent frame
    pub fn new(labels: LabelMap) -> Self {
        Objects {
            labels,
            parent: None,
        }
    }

    /// Record the name of the image establishing the label frame
    pub fn with_parent(mut self, name: impl Into<String>) -> Self {
        self.parent = Some(name.into());
        self
    }

    /// Label data
    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    /// Parent image name, if any
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Label map dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.labels.dimensions()
    }
}

/// Name-keyed collection of [`Image`] instances for one unit of work
#[derive(Debug, Default)]
pub struct ImageSet {
    images: HashMap<String, Image>,
}

impl ImageSet {
    /// Create an empty image set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an image under a name
    pub fn insert(&mut self, name: impl Into<String>, image: Image) {
        self.images.insert(name.into(), image);
    }

    /// Look up an image by name
    ///
    /// # Errors
    ///
    /// Returns `MeasureError::MissingImage` if the name is not present.
    pub fn get(&self, name: &str) -> MeasureResult<&Image> {
        self.images
            .get(name)
            .ok_or_else(|| MeasureError::MissingImage(name.to_string()))
    }

    /// Number of images in the set
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Name-keyed collection of [`Objects`] instances for one unit of work
#[derive(Debug, Default)]
pub struct ObjectSet {
    objects: HashMap<String, Objects>,
}

impl ObjectSet {
    /// Create an empty object set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an object set under a name
    pub fn insert(&mut self, name: impl Into<String>, objects: Objects) {
        self.objects.insert(name.into(), objects);
    }

    /// Look up objects by name
    ///
    /// # Errors
    ///
    /// Returns `MeasureError::MissingObjects` if the name is not present.
    pub fn get(&self, name: &str) -> MeasureResult<&Objects> {
        self.objects
            .get(name)
            .ok_or_else(|| MeasureError::MissingObjects(name.to_string()))
    }

    /// Number of object sets
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

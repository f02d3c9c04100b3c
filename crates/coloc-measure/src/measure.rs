//! Correlation measurement emission
//!
//! Drives the full pipeline for a configured set of images and object sets:
//! enumerate image pairs, align each pair onto a common region, combine
//! validity masks, optionally partition by object label, compute statistics,
//! and write named measurements to the store.
//!
//! Measurement names follow the `{category}_{feature}_{first}_{second}`
//! protocol, e.g. `Correlation_Slope_dna_cytoplasm`. The name also encodes
//! the regression direction: the first image in the pair key is the
//! independent variable.

use crate::align::{align_images, align_to_objects};
use crate::config::{CorrelationConfig, ImagePair};
use crate::error::{MeasureError, MeasureResult};
use crate::image::{ImageSet, ObjectSet};
use crate::partition::partition_labels;
use crate::stats::pair_statistics;
use crate::validity::combine_validity;
use log::{debug, warn};
use std::collections::BTreeMap;

/// The kind under which whole-image measurements are stored
pub const IMAGE_KIND: &str = "Image";

/// The single measurement category this module produces
pub const CATEGORY_CORRELATION: &str = "Correlation";

/// Feature name of the correlation coefficient
pub const FEATURE_CORRELATION: &str = "Correlation";

/// Feature name of the regression slope
pub const FEATURE_SLOPE: &str = "Slope";

/// Full measurement name for a feature of one image pair
fn feature_name(feature: &str, pair: &ImagePair) -> String {
    format!("{CATEGORY_CORRELATION}_{feature}_{}", pair.key())
}

/// Store for named measurement results
///
/// Whole-image measurements are scalars under the `Image` kind; object
/// measurements are per-label arrays under their object-set name, indexed by
/// label id in ascending order. The store is append/set-only: the emitter
/// writes each name at most once per run.
#[derive(Debug, Clone, Default)]
pub struct Measurements {
    image: BTreeMap<String, f64>,
    objects: BTreeMap<String, BTreeMap<String, Vec<f64>>>,
}

impl Measurements {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a whole-image measurement
    pub fn add_image_measurement(&mut self, name: impl Into<String>, value: f64) {
        self.image.insert(name.into(), value);
    }

    /// Record a per-label object measurement
    pub fn add_object_measurement(
        &mut self,
        objects_name: impl Into<String>,
        name: impl Into<String>,
        values: Vec<f64>,
    ) {
        self.objects
            .entry(objects_name.into())
            .or_default()
            .insert(name.into(), values);
    }

    /// Look up a whole-image measurement by name
    pub fn image_measurement(&self, name: &str) -> Option<f64> {
        self.image.get(name).copied()
    }

    /// Look up a per-label object measurement by object-set name and name
    pub fn object_measurement(&self, objects_name: &str, name: &str) -> Option<&[f64]> {
        self.objects
            .get(objects_name)?
            .get(name)
            .map(Vec::as_slice)
    }

    /// Names of all recorded whole-image measurements, sorted
    pub fn image_measurement_names(&self) -> impl Iterator<Item = &str> {
        self.image.keys().map(String::as_str)
    }

    /// Names of all measurements recorded for one object set, sorted
    pub fn object_measurement_names(&self, objects_name: &str) -> Vec<&str> {
        self.objects
            .get(objects_name)
            .map(|m| m.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// A pair skipped because its regions could not be aligned
///
/// One misaligned pair is fatal for that pair only; the rest of the run
/// still completes.
#[derive(Debug)]
pub struct SkippedPair {
    /// The image pair that failed
    pub pair: ImagePair,
    /// The object set involved, for object-level failures
    pub objects_name: Option<String>,
    /// Why alignment failed
    pub reason: MeasureError,
}

/// The correlation measurement pipeline
///
/// Construction validates the configuration; computation happens in
/// [`run`](CorrelationMeasurement::run). The query surface
/// ([`categories`](CorrelationMeasurement::categories),
/// [`features`](CorrelationMeasurement::features),
/// [`measurement_images`](CorrelationMeasurement::measurement_images)) is a
/// pure function of the configuration and never requires running the
/// computation.
#[derive(Debug, Clone)]
pub struct CorrelationMeasurement {
    config: CorrelationConfig,
}

impl CorrelationMeasurement {
    /// Validate a configuration and wrap it into a runnable measurement
    ///
    /// # Errors
    ///
    /// Returns `MeasureError::Configuration` for an invalid configuration;
    /// see [`CorrelationConfig::validate`].
    pub fn new(config: CorrelationConfig) -> MeasureResult<Self> {
        config.validate()?;
        Ok(CorrelationMeasurement { config })
    }

    /// The validated configuration
    pub fn config(&self) -> &CorrelationConfig {
        &self.config
    }

    /// Compute all configured measurements for one unit of work
    ///
    /// Pairs whose regions cannot be aligned are skipped, logged, and
    /// reported in the returned list; every other error aborts the run.
    ///
    /// # Errors
    ///
    /// Returns provider lookup failures and container errors. Alignment
    /// failures never surface as `Err`.
    pub fn run(
        &self,
        images: &ImageSet,
        objects: &ObjectSet,
        measurements: &mut Measurements,
    ) -> MeasureResult<Vec<SkippedPair>> {
        debug!("{}", self.config.describe());
        let mut skipped = Vec::new();

        for pair in self.config.image_pairs() {
            if self.config.wants_images() {
                match self.run_image_pair(&pair, images, measurements) {
                    Ok(()) => {}
                    Err(reason @ MeasureError::Alignment { .. }) => {
                        warn!("skipping image pair {}: {reason}", pair.key());
                        skipped.push(SkippedPair {
                            pair: pair.clone(),
                            objects_name: None,
                            reason,
                        });
                    }
                    Err(err) => return Err(err),
                }
            }

            if self.config.wants_objects() {
                for objects_name in &self.config.object_names {
                    match self.run_object_pair(&pair, objects_name, images, objects, measurements)
                    {
                        Ok(()) => {}
                        Err(reason @ MeasureError::Alignment { .. }) => {
                            warn!(
                                "skipping object pair {} in '{objects_name}': {reason}",
                                pair.key()
                            );
                            skipped.push(SkippedPair {
                                pair: pair.clone(),
                                objects_name: Some(objects_name.clone()),
                                reason,
                            });
                        }
                        Err(err) => return Err(err),
                    }
                }
            }
        }

        Ok(skipped)
    }

    /// Whole-image statistics for one pair
    fn run_image_pair(
        &self,
        pair: &ImagePair,
        images: &ImageSet,
        measurements: &mut Measurements,
    ) -> MeasureResult<()> {
        let first = images.get(&pair.first)?;
        let second = images.get(&pair.second)?;

        let region = align_images(&pair.first, first, &pair.second, second)?;
        let validity = combine_validity(
            region.first_valid.as_ref(),
            region.second_valid.as_ref(),
            region.width,
            region.height,
        )?;

        let mut sample_first = Vec::with_capacity(validity.count_on());
        let mut sample_second = Vec::with_capacity(validity.count_on());
        for (index, &on) in validity.data().iter().enumerate() {
            if on {
                sample_first.push(region.first[index]);
                sample_second.push(region.second[index]);
            }
        }

        let stats = pair_statistics(&sample_first, &sample_second)?;
        debug!(
            "image pair {}: correlation={} slope={} over {} pixels",
            pair.key(),
            stats.correlation,
            stats.slope,
            sample_first.len()
        );

        measurements.add_image_measurement(feature_name(FEATURE_CORRELATION, pair), stats.correlation);
        measurements.add_image_measurement(feature_name(FEATURE_SLOPE, pair), stats.slope);
        Ok(())
    }

    /// Per-label statistics for one pair within one object set
    fn run_object_pair(
        &self,
        pair: &ImagePair,
        objects_name: &str,
        images: &ImageSet,
        objects: &ObjectSet,
        measurements: &mut Measurements,
    ) -> MeasureResult<()> {
        let object_set = objects.get(objects_name)?;
        let parent = match object_set.parent() {
            Some(name) => Some(images.get(name)?),
            None => None,
        };

        let first = images.get(&pair.first)?;
        let second = images.get(&pair.second)?;

        let first_region = align_to_objects(&pair.first, first, object_set, parent)?;
        let second_region = align_to_objects(&pair.second, second, object_set, parent)?;

        if (first_region.width, first_region.height)
            != (second_region.width, second_region.height)
        {
            return Err(MeasureError::Alignment {
                first: format!(
                    "{} ({}x{})",
                    pair.first, first_region.width, first_region.height
                ),
                second: format!(
                    "{} ({}x{})",
                    pair.second, second_region.width, second_region.height
                ),
                detail: format!("no common frame within objects '{objects_name}'"),
            });
        }

        let validity = combine_validity(
            first_region.valid.as_ref(),
            second_region.valid.as_ref(),
            first_region.width,
            first_region.height,
        )?;
        let samples = partition_labels(&first_region.labels, &validity);

        let mut correlations = Vec::with_capacity(samples.len());
        let mut slopes = Vec::with_capacity(samples.len());
        for sample in &samples {
            let a: Vec<f64> = sample.indices.iter().map(|&i| first_region.pixels[i]).collect();
            let b: Vec<f64> = sample
                .indices
                .iter()
                .map(|&i| second_region.pixels[i])
                .collect();
            let stats = pair_statistics(&a, &b)?;
            correlations.push(stats.correlation);
            slopes.push(stats.slope);
        }
        debug!(
            "object pair {} in '{}': {} labels",
            pair.key(),
            objects_name,
            samples.len()
        );

        measurements.add_object_measurement(
            objects_name,
            feature_name(FEATURE_CORRELATION, pair),
            correlations,
        );
        measurements.add_object_measurement(
            objects_name,
            feature_name(FEATURE_SLOPE, pair),
            slopes,
        );
        Ok(())
    }

    /// Whether measurements are produced under the given kind
    fn kind_enabled(&self, kind: &str) -> bool {
        if kind == IMAGE_KIND {
            self.config.wants_images()
        } else {
            self.config.wants_objects() && self.config.object_names.iter().any(|n| n == kind)
        }
    }

    /// Categories produced for a kind (`Image` or an object-set name)
    pub fn categories(&self, kind: &str) -> Vec<&'static str> {
        if self.kind_enabled(kind) {
            vec![CATEGORY_CORRELATION]
        } else {
            Vec::new()
        }
    }

    /// Feature names produced for a kind and category
    pub fn features(&self, kind: &str, category: &str) -> Vec<&'static str> {
        if category == CATEGORY_CORRELATION && self.kind_enabled(kind) {
            vec![FEATURE_CORRELATION, FEATURE_SLOPE]
        } else {
            Vec::new()
        }
    }

    /// Pair key strings produced for a kind, category and feature
    pub fn measurement_images(&self, kind: &str, category: &str, feature: &str) -> Vec<String> {
        if self.features(kind, category).contains(&feature) {
            self.config.image_pairs().iter().map(ImagePair::key).collect()
        } else {
            Vec::new()
        }
    }
}

//! Label partitioning
//!
//! Splits the usable pixel set of an aligned region by object label, so that
//! statistics can be computed per object. Background (label 0) and invalid
//! positions are excluded entirely.

use coloc_core::Mask;
use std::collections::BTreeMap;

/// The pixel positions belonging to one object label
#[derive(Debug, Clone)]
pub struct LabelSample {
    /// Object label id (positive)
    pub label: u32,
    /// Flat row-major indices of the valid positions carrying this label
    pub indices: Vec<usize>,
}

/// Partition the valid positions of an aligned label array by label id
///
/// Every distinct positive label present in `labels` appears in the result,
/// in ascending id order; a label whose positions are all invalid appears
/// with an empty index list, so per-label output arrays keep a stable length
/// and index-to-label correspondence. Statistics over an empty or
/// single-point sample are undefined and yield the NaN sentinel downstream.
pub fn partition_labels(labels: &[u32], validity: &Mask) -> Vec<LabelSample> {
    debug_assert_eq!(labels.len(), validity.len());

    // Seed with every label present so empty samples are preserved
    let mut buckets: BTreeMap<u32, Vec<usize>> = labels
        .iter()
        .filter(|&&l| l > 0)
        .map(|&l| (l, Vec::new()))
        .collect();

    for (index, (&label, &valid)) in labels.iter().zip(validity.data()).enumerate() {
        if label > 0 && valid {
            // Label was seeded above; this lookup cannot miss
            if let Some(bucket) = buckets.get_mut(&label) {
                bucket.push(index);
            }
        }
    }

    buckets
        .into_iter()
        .map(|(label, indices)| LabelSample { label, indices })
        .collect()
}

//! Pairwise sample statistics
//!
//! Computes the Pearson product-moment correlation coefficient and the
//! ordinary least-squares regression slope over two paired samples of pixel
//! intensities. The slope is directional: the first sample is the
//! independent variable, so `slope` is the regression coefficient of the
//! second sample on the first. Swapping the samples does not generally give
//! the reciprocal unless the data are exactly collinear.

use crate::error::MeasureResult;
use coloc_core::Error as CoreError;

/// Correlation and regression slope for one paired sample
///
/// A degenerate sample - fewer than two points, or no variance in the
/// independent variable (or, for the correlation, in either variable) -
/// yields `f64::NAN` for the affected statistic. Consumers must treat NaN as
/// "undefined", never as zero.
#[derive(Debug, Clone, Copy)]
pub struct PairStats {
    /// Pearson correlation coefficient, in [-1, 1] up to floating-point
    /// precision, or NaN
    pub correlation: f64,
    /// Least-squares slope of the second sample on the first, or NaN
    pub slope: f64,
}

/// Compute correlation and slope over two equal-length paired samples
///
/// Both slices represent the same ordered set of pixel positions: `first[i]`
/// and `second[i]` are the two intensities observed at position `i`.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` if the sample lengths differ.
pub fn pair_statistics(first: &[f64], second: &[f64]) -> MeasureResult<PairStats> {
    if first.len() != second.len() {
        return Err(CoreError::InvalidParameter(format!(
            "paired sample lengths differ: {} vs {}",
            first.len(),
            second.len()
        ))
        .into());
    }

    let n = first.len();
    if n < 2 {
        return Ok(PairStats {
            correlation: f64::NAN,
            slope: f64::NAN,
        });
    }

    let mean_first = first.iter().sum::<f64>() / n as f64;
    let mean_second = second.iter().sum::<f64>() / n as f64;

    let mut cross = 0.0;
    let mut var_first = 0.0;
    let mut var_second = 0.0;
    for (&a, &b) in first.iter().zip(second.iter()) {
        let da = a - mean_first;
        let db = b - mean_second;
        cross += da * db;
        var_first += da * da;
        var_second += db * db;
    }

    let correlation = if var_first == 0.0 || var_second == 0.0 {
        f64::NAN
    } else {
        cross / (var_first * var_second).sqrt()
    };

    let slope = if var_first == 0.0 {
        f64::NAN
    } else {
        cross / var_first
    };

    Ok(PairStats { correlation, slope })
}

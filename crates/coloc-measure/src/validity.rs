//! Validity mask combination
//!
//! Two images contribute independent validity masks over the aligned region.
//! A pixel participates in statistics only if it is valid in both; an absent
//! mask means all pixels are valid. There is no partial validity.

use crate::error::MeasureResult;
use coloc_core::Mask;

/// Combine two optional validity masks into one usable pixel set
///
/// # Errors
///
/// Returns `Error::IncompatibleSizes` if a present mask does not match the
/// region shape (the aligner normally guarantees it does).
pub fn combine_validity(
    first: Option<&Mask>,
    second: Option<&Mask>,
    width: u32,
    height: u32,
) -> MeasureResult<Mask> {
    let combined = match (first, second) {
        (Some(a), Some(b)) => a.and(b)?,
        (Some(a), None) => check_shape(a, width, height)?.clone(),
        (None, Some(b)) => check_shape(b, width, height)?.clone(),
        (None, None) => Mask::new_filled(width, height, true)?,
    };
    Ok(combined)
}

fn check_shape(mask: &Mask, width: u32, height: u32) -> MeasureResult<&Mask> {
    if mask.dimensions() != (width, height) {
        let (mw, mh) = mask.dimensions();
        return Err(coloc_core::Error::IncompatibleSizes(mw, mh, width, height).into());
    }
    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_both_absent() {
        let validity = combine_validity(None, None, 4, 4).unwrap();
        assert_eq!(validity.count_on(), 16);
    }

    #[test]
    fn test_combine_one_present() {
        let half = Mask::from_fn(4, 4, |x, _| x < 2).unwrap();

        let validity = combine_validity(Some(&half), None, 4, 4).unwrap();
        assert_eq!(validity.count_on(), 8);

        let validity = combine_validity(None, Some(&half), 4, 4).unwrap();
        assert_eq!(validity.count_on(), 8);
    }

    #[test]
    fn test_combine_is_intersection() {
        let left = Mask::from_fn(4, 4, |x, _| x < 3).unwrap();
        let top = Mask::from_fn(4, 4, |_, y| y < 3).unwrap();

        let validity = combine_validity(Some(&left), Some(&top), 4, 4).unwrap();
        assert_eq!(validity.count_on(), 9);
        assert!(validity.get(2, 2).unwrap());
        assert!(!validity.get(3, 2).unwrap());
        assert!(!validity.get(2, 3).unwrap());
    }

    #[test]
    fn test_combine_shape_mismatch() {
        let wrong = Mask::new_filled(3, 3, true).unwrap();
        assert!(combine_validity(Some(&wrong), None, 4, 4).is_err());
    }
}

//! Region alignment
//!
//! Resolves pixel-for-pixel correspondence between two images (or between an
//! image and a label frame) whose shapes may differ because one was produced
//! by cropping the other. The relationship is discovered structurally: a
//! cropped region carries a crop indicator - a mask over the larger frame
//! whose ON positions are exactly the positions the crop occupies - and
//! optionally names its parent image. Array sizes alone never decide the
//! direction.
//!
//! Alignment gathers the larger frame's values at the indicator's ON
//! positions in row-major order, producing arrays of the cropped shape.

use crate::error::{MeasureError, MeasureResult};
use crate::image::{Image, Objects};
use coloc_core::Mask;

/// Two images resolved onto a common region
#[derive(Debug, Clone)]
pub struct AlignedRegion {
    /// Region width in pixels
    pub width: u32,
    /// Region height in pixels
    pub height: u32,
    /// First image's intensities over the region (row-major)
    pub first: Vec<f64>,
    /// Second image's intensities over the region (row-major)
    pub second: Vec<f64>,
    /// First image's validity mask over the region; absent means all-valid
    pub first_valid: Option<Mask>,
    /// Second image's validity mask over the region; absent means all-valid
    pub second_valid: Option<Mask>,
}

/// One image resolved onto an object set's label frame
#[derive(Debug, Clone)]
pub struct ObjectRegion {
    /// Region width in pixels
    pub width: u32,
    /// Region height in pixels
    pub height: u32,
    /// Image intensities over the region (row-major)
    pub pixels: Vec<f64>,
    /// Image validity mask over the region; absent means all-valid
    pub valid: Option<Mask>,
    /// Object labels over the region (row-major, 0 = background)
    pub labels: Vec<u32>,
}

/// What a region shares a frame with, for relationship resolution
struct FrameRef<'a> {
    /// Name this region is registered under (images) or the name of the
    /// image whose frame it shares (label maps)
    name: Option<&'a str>,
    width: u32,
    height: u32,
    /// Crop indicator over the parent frame, if this region is a crop
    crop_mask: Option<&'a Mask>,
    /// Parent image name, if this region is a crop
    parent: Option<&'a str>,
}

impl<'a> FrameRef<'a> {
    fn of_image(name: &'a str, image: &'a Image) -> Self {
        let (width, height) = image.dimensions();
        FrameRef {
            name: Some(name),
            width,
            height,
            crop_mask: image.crop_mask(),
            parent: image.parent(),
        }
    }

    /// The frame an object set's labels live in. The labels inherit the crop
    /// relationship of the parent image they were segmented in, so a label
    /// map on a cropped image aligns exactly as that image does.
    fn of_objects(objects: &'a Objects, parent: Option<&'a Image>) -> Self {
        let (width, height) = objects.dimensions();
        FrameRef {
            name: objects.parent(),
            width,
            height,
            crop_mask: parent.and_then(|p| p.crop_mask()),
            parent: parent.and_then(|p| p.parent()),
        }
    }
}

/// Resolved relationship between two regions
enum Relation<'a> {
    /// Same shape; positions already correspond
    Identity,
    /// The first region is a crop of the second; the indicator maps the
    /// second's frame onto the first's shape
    FirstCropOfSecond(&'a Mask),
    /// The second region is a crop of the first
    SecondCropOfFirst(&'a Mask),
}

/// True if `inner` carries a crop indicator that places it inside `outer`
fn crops<'a>(inner: &FrameRef<'a>, outer: &FrameRef<'_>) -> Option<&'a Mask> {
    inner.crop_mask.filter(|m| {
        m.dimensions() == (outer.width, outer.height)
            && m.count_on() == (inner.width as usize) * (inner.height as usize)
    })
}

fn alignment_error(first: &FrameRef<'_>, second: &FrameRef<'_>, detail: &str) -> MeasureError {
    MeasureError::Alignment {
        first: format!(
            "{} ({}x{})",
            first.name.unwrap_or("<unnamed>"),
            first.width,
            first.height
        ),
        second: format!(
            "{} ({}x{})",
            second.name.unwrap_or("<unnamed>"),
            second.width,
            second.height
        ),
        detail: detail.to_string(),
    }
}

/// Decide which side is the crop, by indicator and parent pointer only
fn resolve<'a>(first: &FrameRef<'a>, second: &FrameRef<'a>) -> MeasureResult<Relation<'a>> {
    if first.width == second.width && first.height == second.height {
        return Ok(Relation::Identity);
    }

    let second_in_first = crops(second, first);
    let first_in_second = crops(first, second);

    match (second_in_first, first_in_second) {
        (Some(ind), None) => Ok(Relation::SecondCropOfFirst(ind)),
        (None, Some(ind)) => Ok(Relation::FirstCropOfSecond(ind)),
        (Some(ind_s), Some(ind_f)) => {
            // Both indicators fit the opposite frame; the parent pointer
            // decides which side actually declares the relationship.
            if second.parent.is_some() && second.parent == first.name {
                Ok(Relation::SecondCropOfFirst(ind_s))
            } else if first.parent.is_some() && first.parent == second.name {
                Ok(Relation::FirstCropOfSecond(ind_f))
            } else {
                Err(alignment_error(first, second, "ambiguous crop relationship"))
            }
        }
        (None, None) => Err(alignment_error(
            first,
            second,
            "shape mismatch and no usable crop indicator",
        )),
    }
}

/// Gather the values of a frame at the indicator's ON positions, row-major
fn gather<T: Copy>(frame: &[T], indicator: &Mask) -> Vec<T> {
    frame
        .iter()
        .zip(indicator.data())
        .filter(|&(_, &on)| on)
        .map(|(&v, _)| v)
        .collect()
}

/// Gather a validity mask through a crop indicator, if one is present
fn gather_mask(
    mask: Option<&Mask>,
    indicator: &Mask,
    width: u32,
    height: u32,
) -> MeasureResult<Option<Mask>> {
    mask.map(|m| Mask::from_data(width, height, gather(m.data(), indicator)))
        .transpose()
        .map_err(MeasureError::from)
}

/// Resolve two images onto a common region
///
/// - Identical shapes: the raw arrays pass through unchanged.
/// - One image is a crop of the other: the larger frame's pixels and
///   validity mask are gathered at the crop indicator's ON positions and
///   take the cropped image's shape.
/// - Shapes differ with no discoverable relationship:
///   [`MeasureError::Alignment`].
///
/// # Errors
///
/// Returns `MeasureError::Alignment` when no correspondence can be resolved.
pub fn align_images(
    first_name: &str,
    first: &Image,
    second_name: &str,
    second: &Image,
) -> MeasureResult<AlignedRegion> {
    let first_frame = FrameRef::of_image(first_name, first);
    let second_frame = FrameRef::of_image(second_name, second);

    match resolve(&first_frame, &second_frame)? {
        Relation::Identity => {
            let (width, height) = first.dimensions();
            Ok(AlignedRegion {
                width,
                height,
                first: first.pixels().data().to_vec(),
                second: second.pixels().data().to_vec(),
                first_valid: first.mask().cloned(),
                second_valid: second.mask().cloned(),
            })
        }
        Relation::SecondCropOfFirst(indicator) => {
            let (width, height) = second.dimensions();
            Ok(AlignedRegion {
                width,
                height,
                first: gather(first.pixels().data(), indicator),
                second: second.pixels().data().to_vec(),
                first_valid: gather_mask(first.mask(), indicator, width, height)?,
                second_valid: second.mask().cloned(),
            })
        }
        Relation::FirstCropOfSecond(indicator) => {
            let (width, height) = first.dimensions();
            Ok(AlignedRegion {
                width,
                height,
                first: first.pixels().data().to_vec(),
                second: gather(second.pixels().data(), indicator),
                first_valid: first.mask().cloned(),
                second_valid: gather_mask(second.mask(), indicator, width, height)?,
            })
        }
    }
}

/// Resolve one image onto an object set's label frame
///
/// The label frame is the frame of the object set's parent image, so the
/// same crop rules apply recursively: an image larger than the label frame
/// is gathered down through the parent's crop indicator, and labels defined
/// on a frame larger than the image are gathered down through the image's
/// own indicator.
///
/// # Errors
///
/// Returns `MeasureError::Alignment` when no correspondence can be resolved.
pub fn align_to_objects(
    image_name: &str,
    image: &Image,
    objects: &Objects,
    objects_parent: Option<&Image>,
) -> MeasureResult<ObjectRegion> {
    let image_frame = FrameRef::of_image(image_name, image);
    let object_frame = FrameRef::of_objects(objects, objects_parent);

    match resolve(&image_frame, &object_frame)? {
        Relation::Identity => {
            let (width, height) = objects.dimensions();
            Ok(ObjectRegion {
                width,
                height,
                pixels: image.pixels().data().to_vec(),
                valid: image.mask().cloned(),
                labels: objects.labels().data().to_vec(),
            })
        }
        // The label frame is a crop of the image: gather the image down
        Relation::SecondCropOfFirst(indicator) => {
            let (width, height) = objects.dimensions();
            Ok(ObjectRegion {
                width,
                height,
                pixels: gather(image.pixels().data(), indicator),
                valid: gather_mask(image.mask(), indicator, width, height)?,
                labels: objects.labels().data().to_vec(),
            })
        }
        // The image is a crop of the label frame: gather the labels down
        Relation::FirstCropOfSecond(indicator) => {
            let (width, height) = image.dimensions();
            Ok(ObjectRegion {
                width,
                height,
                pixels: image.pixels().data().to_vec(),
                valid: image.mask().cloned(),
                labels: gather(objects.labels().data(), indicator),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coloc_core::{FImage, LabelMap};

    fn frame_20x20() -> FImage {
        FImage::from_fn(20, 20, |x, y| (y * 20 + x) as f64).unwrap()
    }

    /// Crop indicator for the [5, 15) x [5, 15) window of a 20x20 frame
    fn window_indicator() -> Mask {
        Mask::from_fn(20, 20, |x, y| (5..15).contains(&x) && (5..15).contains(&y)).unwrap()
    }

    #[test]
    fn test_align_identity() {
        let a = Image::new(FImage::new_with_value(8, 8, 1.0).unwrap());
        let b = Image::new(FImage::new_with_value(8, 8, 2.0).unwrap());

        let region = align_images("a", &a, "b", &b).unwrap();
        assert_eq!((region.width, region.height), (8, 8));
        assert_eq!(region.first.len(), 64);
        assert!(region.first_valid.is_none());
    }

    #[test]
    fn test_align_second_crop_of_first() {
        let full = frame_20x20();
        let indicator = window_indicator();
        let cropped: Vec<f64> = full
            .data()
            .iter()
            .zip(indicator.data())
            .filter(|&(_, &on)| on)
            .map(|(&v, _)| v)
            .collect();

        let a = Image::new(full);
        let b = Image::new(FImage::from_data(10, 10, cropped).unwrap())
            .with_crop_mask(indicator)
            .unwrap();

        let region = align_images("a", &a, "b", &b).unwrap();
        assert_eq!((region.width, region.height), (10, 10));
        // The gathered window must match the crop exactly
        assert_eq!(region.first, region.second);
        // Top-left of the window is frame position (5, 5)
        assert_eq!(region.first[0], (5 * 20 + 5) as f64);
    }

    #[test]
    fn test_align_first_crop_of_second() {
        let full = frame_20x20();
        let indicator = window_indicator();
        let cropped: Vec<f64> = full
            .data()
            .iter()
            .zip(indicator.data())
            .filter(|&(_, &on)| on)
            .map(|(&v, _)| v)
            .collect();

        let a = Image::new(FImage::from_data(10, 10, cropped).unwrap())
            .with_crop_mask(indicator)
            .unwrap();
        let b = Image::new(full);

        let region = align_images("a", &a, "b", &b).unwrap();
        assert_eq!((region.width, region.height), (10, 10));
        assert_eq!(region.first, region.second);
    }

    #[test]
    fn test_align_mask_follows_crop() {
        let full = frame_20x20();
        let indicator = window_indicator();
        // Valid only in the left half of the frame
        let frame_mask = Mask::from_fn(20, 20, |x, _| x < 10).unwrap();
        let cropped: Vec<f64> = full
            .data()
            .iter()
            .zip(indicator.data())
            .filter(|&(_, &on)| on)
            .map(|(&v, _)| v)
            .collect();

        let a = Image::new(full).with_mask(frame_mask).unwrap();
        let b = Image::new(FImage::from_data(10, 10, cropped).unwrap())
            .with_crop_mask(indicator)
            .unwrap();

        let region = align_images("a", &a, "b", &b).unwrap();
        let valid = region.first_valid.unwrap();
        assert_eq!(valid.dimensions(), (10, 10));
        // Window columns [5, 15) intersect the valid half [0, 10): 5 columns
        assert_eq!(valid.count_on(), 50);
        assert!(valid.get(4, 0).unwrap());
        assert!(!valid.get(5, 0).unwrap());
    }

    #[test]
    fn test_align_shape_mismatch_fails() {
        let a = Image::new(FImage::new(20, 20).unwrap());
        let b = Image::new(FImage::new(10, 10).unwrap());

        assert!(matches!(
            align_images("a", &a, "b", &b),
            Err(MeasureError::Alignment { .. })
        ));
    }

    #[test]
    fn test_align_to_objects_identity() {
        let image = Image::new(FImage::new_with_value(6, 6, 3.0).unwrap());
        let mut labels = LabelMap::new(6, 6).unwrap();
        labels.fill_rect(0, 0, 3, 3, 1);
        let objects = Objects::new(labels);

        let region = align_to_objects("img", &image, &objects, None).unwrap();
        assert_eq!((region.width, region.height), (6, 6));
        assert_eq!(region.labels.iter().filter(|&&l| l == 1).count(), 9);
    }

    #[test]
    fn test_align_to_objects_through_cropped_parent() {
        // Objects segmented on a cropped image; the full image must be
        // gathered down into the crop's frame.
        let full = frame_20x20();
        let indicator = window_indicator();
        let cropped: Vec<f64> = full
            .data()
            .iter()
            .zip(indicator.data())
            .filter(|&(_, &on)| on)
            .map(|(&v, _)| v)
            .collect();

        let big = Image::new(full);
        let small = Image::new(FImage::from_data(10, 10, cropped).unwrap())
            .with_crop_mask(indicator)
            .unwrap();

        let mut labels = LabelMap::new(10, 10).unwrap();
        labels.fill_rect(0, 0, 4, 4, 1);
        let objects = Objects::new(labels).with_parent("small");

        let region = align_to_objects("big", &big, &objects, Some(&small)).unwrap();
        assert_eq!((region.width, region.height), (10, 10));
        // Gathered pixels must equal the crop's own pixels
        assert_eq!(region.pixels, small.pixels().data());

        // The cropped image itself aligns by identity
        let region = align_to_objects("small", &small, &objects, Some(&small)).unwrap();
        assert_eq!(region.pixels, small.pixels().data());
    }
}

//! Container regression test
//!
//! Tests FImage, Mask and LabelMap creation, pixel access, and the
//! layout-sharing invariants the measurement pipeline relies on.

use coloc_core::{FImage, LabelMap, Mask};
use coloc_test::RegParams;

// ==========================================================================
// Test 1: FImage creation and access
// ==========================================================================

#[test]
fn containers_reg_fimage() {
    let mut rp = RegParams::new("containers_fimage");

    let mut image = FImage::new(64, 48).expect("FImage::new failed");
    rp.compare_values(64.0, image.width() as f64, 0.0);
    rp.compare_values(48.0, image.height() as f64, 0.0);

    let all_zero = image.data().iter().all(|&v| v == 0.0);
    rp.compare_values(1.0, if all_zero { 1.0 } else { 0.0 }, 0.0);

    image.set_pixel(10, 20, 0.25).unwrap();
    rp.compare_values(0.25, image.get_pixel(10, 20).unwrap(), 0.0);

    // Out-of-bounds access should error
    let oob = image.get_pixel(64, 0);
    rp.compare_values(1.0, if oob.is_err() { 1.0 } else { 0.0 }, 0.0);

    // Invalid dimensions
    let invalid = FImage::new(0, 10);
    rp.compare_values(1.0, if invalid.is_err() { 1.0 } else { 0.0 }, 0.0);

    // from_fn gradient: value at (x, y) is x + y
    let gradient = FImage::from_fn(16, 16, |x, y| (x + y) as f64).unwrap();
    rp.compare_values(30.0, gradient.get_pixel(15, 15).unwrap(), 0.0);

    assert!(rp.cleanup(), "containers_reg fimage tests failed");
}

// ==========================================================================
// Test 2: Mask logic
// ==========================================================================

#[test]
fn containers_reg_mask() {
    let mut rp = RegParams::new("containers_mask");

    let full = Mask::new_filled(10, 10, true).unwrap();
    rp.compare_values(100.0, full.count_on() as f64, 0.0);

    let left = Mask::from_fn(10, 10, |x, _| x < 5).unwrap();
    let top = Mask::from_fn(10, 10, |_, y| y < 5).unwrap();
    rp.compare_values(50.0, left.count_on() as f64, 0.0);

    // AND is the intersection
    let corner = left.and(&top).unwrap();
    rp.compare_values(25.0, corner.count_on() as f64, 0.0);
    rp.compare_values(1.0, if corner.get(4, 4).unwrap() { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(0.0, if corner.get(5, 4).unwrap() { 1.0 } else { 0.0 }, 0.0);

    // Size mismatch should error
    let small = Mask::new_filled(5, 5, true).unwrap();
    let err = full.and(&small);
    rp.compare_values(1.0, if err.is_err() { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "containers_reg mask tests failed");
}

// ==========================================================================
// Test 3: LabelMap enumeration
// ==========================================================================

#[test]
fn containers_reg_labelmap() {
    let mut rp = RegParams::new("containers_labelmap");

    let mut labels = LabelMap::new(10, 10).unwrap();
    rp.compare_values(0.0, labels.labels().len() as f64, 0.0);

    labels.fill_rect(0, 0, 4, 4, 1);
    labels.fill_rect(6, 6, 4, 4, 2);
    let ids = labels.labels();
    rp.compare_values(2.0, ids.len() as f64, 0.0);
    rp.compare_values(1.0, ids[0] as f64, 0.0);
    rp.compare_values(2.0, ids[1] as f64, 0.0);
    rp.compare_values(2.0, labels.max_label() as f64, 0.0);

    // Non-contiguous ids enumerate sorted, background excluded
    let mut sparse = LabelMap::new(4, 1).unwrap();
    sparse.set(0, 0, 7).unwrap();
    sparse.set(2, 0, 3).unwrap();
    let ids = sparse.labels();
    rp.compare_values(3.0, ids[0] as f64, 0.0);
    rp.compare_values(7.0, ids[1] as f64, 0.0);

    // Same layout as FImage: flat index y * width + x
    rp.compare_values(7.0, sparse.data()[0] as f64, 0.0);
    rp.compare_values(3.0, sparse.data()[2] as f64, 0.0);

    assert!(rp.cleanup(), "containers_reg labelmap tests failed");
}

//! Measurement query surface regression test
//!
//! The category / feature / pair-key queries are pure functions of the
//! configuration: they answer identically before and after a run, and they
//! respect the configured mode for each kind.

use coloc_measure::{
    CorrelationConfig, CorrelationMeasurement, IMAGE_KIND, ImagesOrObjects,
};
use coloc_test::RegParams;

fn module(mode: ImagesOrObjects) -> CorrelationMeasurement {
    let config = CorrelationConfig::new(mode)
        .add_image("image1")
        .add_image("image2")
        .add_objects("objects");
    CorrelationMeasurement::new(config).expect("configuration should validate")
}

// ==========================================================================
// Test 1: Categories per kind follow the mode
// ==========================================================================

#[test]
fn query_reg_categories() {
    let mut rp = RegParams::new("query_categories");

    let has_cat = |mode: ImagesOrObjects, kind: &str| {
        let cats = module(mode).categories(kind);
        if cats == vec!["Correlation"] { 1.0 } else { 0.0 }
    };

    rp.compare_values(1.0, has_cat(ImagesOrObjects::Images, IMAGE_KIND), 0.0);
    rp.compare_values(0.0, has_cat(ImagesOrObjects::Images, "objects"), 0.0);
    rp.compare_values(0.0, has_cat(ImagesOrObjects::Objects, IMAGE_KIND), 0.0);
    rp.compare_values(1.0, has_cat(ImagesOrObjects::Objects, "objects"), 0.0);
    rp.compare_values(1.0, has_cat(ImagesOrObjects::ImagesAndObjects, IMAGE_KIND), 0.0);
    rp.compare_values(1.0, has_cat(ImagesOrObjects::ImagesAndObjects, "objects"), 0.0);

    // An unconfigured kind never has categories
    rp.compare_values(0.0, has_cat(ImagesOrObjects::ImagesAndObjects, "nuclei"), 0.0);

    assert!(rp.cleanup(), "categories test failed");
}

// ==========================================================================
// Test 2: Both features are available for any enabled kind
// ==========================================================================

#[test]
fn query_reg_features() {
    let mut rp = RegParams::new("query_features");

    let has_features = |mode: ImagesOrObjects, kind: &str| {
        let features = module(mode).features(kind, "Correlation");
        if features == vec!["Correlation", "Slope"] { 1.0 } else { 0.0 }
    };

    rp.compare_values(1.0, has_features(ImagesOrObjects::Images, IMAGE_KIND), 0.0);
    rp.compare_values(0.0, has_features(ImagesOrObjects::Images, "objects"), 0.0);
    rp.compare_values(0.0, has_features(ImagesOrObjects::Objects, IMAGE_KIND), 0.0);
    rp.compare_values(1.0, has_features(ImagesOrObjects::Objects, "objects"), 0.0);
    rp.compare_values(
        1.0,
        has_features(ImagesOrObjects::ImagesAndObjects, IMAGE_KIND),
        0.0,
    );
    rp.compare_values(
        1.0,
        has_features(ImagesOrObjects::ImagesAndObjects, "objects"),
        0.0,
    );

    // Unknown category yields nothing
    let none = module(ImagesOrObjects::Images).features(IMAGE_KIND, "Intensity");
    rp.compare_values(0.0, none.len() as f64, 0.0);

    assert!(rp.cleanup(), "features test failed");
}

// ==========================================================================
// Test 3: Pair keys per kind, in declaration order
// ==========================================================================

#[test]
fn query_reg_measurement_images() {
    let mut rp = RegParams::new("query_measurement_images");

    let keys = |mode: ImagesOrObjects, kind: &str| {
        module(mode).measurement_images(kind, "Correlation", "Correlation")
    };

    let image_keys = keys(ImagesOrObjects::Images, IMAGE_KIND);
    rp.compare_values(1.0, image_keys.len() as f64, 0.0);
    rp.compare_strings(image_keys[0].as_bytes(), b"image1_image2");

    rp.compare_values(0.0, keys(ImagesOrObjects::Images, "objects").len() as f64, 0.0);
    rp.compare_values(0.0, keys(ImagesOrObjects::Objects, IMAGE_KIND).len() as f64, 0.0);

    let object_keys = keys(ImagesOrObjects::Objects, "objects");
    rp.compare_values(1.0, object_keys.len() as f64, 0.0);
    rp.compare_strings(object_keys[0].as_bytes(), b"image1_image2");

    assert!(rp.cleanup(), "measurement images test failed");
}

// ==========================================================================
// Test 4: Cardinality is C(n, 2) for n configured images
// ==========================================================================

#[test]
fn query_reg_pair_cardinality() {
    let mut rp = RegParams::new("query_pair_cardinality");

    for n in 2..6u32 {
        let mut config = CorrelationConfig::new(ImagesOrObjects::Images);
        for i in 0..n {
            config = config.add_image(format!("channel{i}"));
        }
        let module = CorrelationMeasurement::new(config).unwrap();
        let keys = module.measurement_images(IMAGE_KIND, "Correlation", "Slope");
        rp.compare_values((n * (n - 1) / 2) as f64, keys.len() as f64, 0.0);
    }

    assert!(rp.cleanup(), "pair cardinality test failed");
}

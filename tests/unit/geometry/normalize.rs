use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn pixel_threshold_is_strictly_above_one_hundred() {
    assert!(!is_pixel_space(&Delimitation::percent("a", 100.0, 0.0, 100.0, 100.0)));
    assert!(is_pixel_space(&Delimitation::percent("a", 100.0001, 0.0, 1.0, 1.0)));
    assert!(is_pixel_space(&Delimitation::percent("a", 0.0, 0.0, 1.0, 250.0)));
    assert!(is_pixel_space(&Delimitation::pixel("a", 1.0, 1.0, 1.0, 1.0)));
}

#[test]
fn percentage_in_range_passes_through() {
    let z = Delimitation::percent("a", 10.0, 20.0, 30.0, 40.0);
    let pct = normalize_zone(&z, Size::new(1234.0, 567.0));
    assert_eq!(pct, PercentRect::new(10.0, 20.0, 30.0, 40.0));
}

#[test]
fn pixel_boundary_normalizes_to_one_hundred() {
    let z = Delimitation::pixel("a", 800.0, 0.0, 800.0, 600.0);
    let pct = normalize_zone(&z, Size::new(800.0, 600.0));
    assert!(approx(pct.left, 100.0));
    assert!(approx(pct.width, 100.0));
    assert!(approx(pct.height, 100.0));
}

#[test]
fn implicit_pixels_are_divided_by_reference() {
    let z = Delimitation::percent("a", 300.0, 200.0, 600.0, 400.0);
    let pct = normalize_zone(&z, Size::new(1200.0, 800.0));
    assert!(approx(pct.left, 25.0));
    assert!(approx(pct.top, 25.0));
    assert!(approx(pct.width, 50.0));
    assert!(approx(pct.height, 50.0));
}

#[test]
fn degenerate_reference_uses_general_fallback() {
    let z = Delimitation::pixel("a", 60.0, 40.0, 60.0, 40.0);
    let pct = normalize_zone(&z, Size::new(0.0, 0.0));
    assert!(approx(pct.left, 10.0));
    assert!(approx(pct.top, 10.0));
}

#[test]
fn debug_size_beats_loaded_images() {
    let mut reg = ImageSizeRegistry::new();
    reg.record_load(Some("c"), "u", Size::new(500.0, 500.0));
    let z = Delimitation::pixel("a", 0.0, 0.0, 10.0, 10.0).with_reference(1000.0, 800.0);
    let r = resolve_reference_size(
        &z,
        ReferenceLookup {
            container_id: Some("c"),
            url: Some("u"),
        },
        &reg,
        FallbackSize::GENERAL,
    );
    assert_eq!(r.source, ReferenceSource::Debug);
    assert_eq!(r.size, Size::new(1000.0, 800.0));
}

#[test]
fn resolution_order_container_then_url_then_fallback() {
    let mut reg = ImageSizeRegistry::new();
    reg.record_load(Some("c"), "u", Size::new(500.0, 400.0));
    reg.record_load(Some("other"), "v", Size::new(700.0, 300.0));
    let z = Delimitation::pixel("a", 0.0, 0.0, 10.0, 10.0);

    let by_container = resolve_reference_size(
        &z,
        ReferenceLookup {
            container_id: Some("c"),
            url: Some("u"),
        },
        &reg,
        FallbackSize::GENERAL,
    );
    assert_eq!(by_container.source, ReferenceSource::Container);
    assert_eq!(by_container.size, Size::new(500.0, 400.0));

    let by_url = resolve_reference_size(
        &z,
        ReferenceLookup {
            container_id: Some("unmounted"),
            url: Some("v"),
        },
        &reg,
        FallbackSize::GENERAL,
    );
    assert_eq!(by_url.source, ReferenceSource::Url);
    assert_eq!(by_url.size, Size::new(700.0, 300.0));

    let fallback = resolve_reference_size(
        &z,
        ReferenceLookup::default(),
        &reg,
        FallbackSize::DESIGN_PREVIEW,
    );
    assert_eq!(fallback.source, ReferenceSource::Fallback);
    assert_eq!(fallback.size, Size::new(1200.0, 1200.0));
}

#[test]
fn zero_debug_size_is_skipped() {
    let reg = ImageSizeRegistry::new();
    let z = Delimitation::pixel("a", 0.0, 0.0, 10.0, 10.0).with_reference(0.0, 800.0);
    let r = resolve_reference_size(&z, ReferenceLookup::default(), &reg, FallbackSize::GENERAL);
    assert_eq!(r.source, ReferenceSource::Fallback);
    assert_eq!(r.size, Size::new(600.0, 400.0));
}

#[test]
fn container_showing_another_image_falls_through_to_url() {
    let mut reg = ImageSizeRegistry::new();
    reg.record_load(Some("c"), "u", Size::new(500.0, 400.0));
    reg.record_load(Some("other"), "v", Size::new(700.0, 300.0));
    let z = Delimitation::pixel("a", 0.0, 0.0, 10.0, 10.0);
    let r = resolve_reference_size(
        &z,
        ReferenceLookup {
            container_id: Some("c"),
            url: Some("v"),
        },
        &reg,
        FallbackSize::GENERAL,
    );
    assert_eq!(r.source, ReferenceSource::Url);
    assert_eq!(r.size, Size::new(700.0, 300.0));
}

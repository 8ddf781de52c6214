#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn center_and_edges() {
    let area = SafeArea::new(10.0, 20.0, 300.0, 100.0);
    assert_eq!(area.center(), Point::new(160.0, 70.0));
    assert_eq!(area.right(), 310.0);
    assert_eq!(area.bottom(), 120.0);
    assert_eq!(area.size(), Size::new(300.0, 100.0));
}

#[test]
fn degenerate_when_any_dimension_is_not_positive() {
    assert!(SafeArea::default().is_degenerate());
    assert!(SafeArea::new(0.0, 0.0, 100.0, 0.0).is_degenerate());
    assert!(!SafeArea::new(0.0, 0.0, 1.0, 1.0).is_degenerate());
}

#[test]
fn patch_applies_only_present_fields() {
    let mut area = SafeArea::new(0.0, 0.0, 320.0, 180.0);
    area.apply_patch(&SafeAreaPatch { width: Some(640.0), ..Default::default() });
    assert_eq!(area, SafeArea::new(0.0, 0.0, 640.0, 180.0));
    area.apply_patch(&SafeAreaPatch { x: Some(5.0), y: Some(6.0), ..Default::default() });
    assert_eq!(area, SafeArea::new(5.0, 6.0, 640.0, 180.0));
}

#[test]
fn patch_deserializes_from_partial_json() {
    let patch: SafeAreaPatch = serde_json::from_str(r#"{"height": 42}"#).unwrap_or_default();
    assert_eq!(patch.height, Some(42.0));
    assert!(patch.x.is_none());
}

#[test]
fn limits_intersect_takes_tighter_side() {
    let a = Limits { left: 0.0, top: 0.0, right: 100.0, bottom: 100.0 };
    let b = Limits { left: 20.0, top: -10.0, right: 150.0, bottom: 80.0 };
    assert_eq!(a.intersect(&b), Limits { left: 20.0, top: 0.0, right: 100.0, bottom: 80.0 });
}

#[test]
fn limits_contains_with_tolerance() {
    let l = SafeArea::new(0.0, 0.0, 10.0, 10.0).limits();
    assert!(l.contains(Point::new(10.0, 10.0), 0.0));
    assert!(!l.contains(Point::new(10.001, 5.0), 0.0));
    assert!(l.contains(Point::new(10.001, 5.0), 0.01));
}

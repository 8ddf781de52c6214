#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// =============================================================
// Point / Size
// =============================================================

#[test]
fn point_arithmetic() {
    let a = Point::new(1.0, 2.0);
    let b = Point::new(4.0, 8.0);
    assert_eq!(b.sub(a), Point::new(3.0, 6.0));
    assert_eq!(a.scale(3.0), Point::new(3.0, 6.0));
}

#[test]
fn point_lerp_endpoints_and_midpoint() {
    let a = Point::new(0.0, 10.0);
    let b = Point::new(10.0, 30.0);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(a.lerp(b, 0.5), Point::new(5.0, 20.0));
}

#[test]
fn size_aspect_and_positive() {
    assert!(approx_eq(Size::new(16.0, 9.0).aspect(), 16.0 / 9.0));
    assert!(Size::new(1.0, 1.0).is_positive());
    assert!(!Size::new(0.0, 1.0).is_positive());
    assert!(!Size::new(1.0, -1.0).is_positive());
    assert!(!Size::new(f64::NAN, 1.0).is_positive());
}

// =============================================================
// Matrix
// =============================================================

#[test]
fn identity_leaves_points_alone() {
    let p = Point::new(3.0, -7.0);
    assert_eq!(Matrix::IDENTITY.transform_point(p), p);
    assert_eq!(Matrix::default(), Matrix::IDENTITY);
}

#[test]
fn scale_translate_applies_scale_then_offset() {
    let m = Matrix::scale_translate(2.0, 10.0, 20.0);
    assert_eq!(m.transform_point(Point::new(1.0, 1.0)), Point::new(12.0, 22.0));
}

#[test]
fn transform_vector_ignores_translation() {
    let m = Matrix::scale_translate(2.0, 10.0, 20.0);
    assert_eq!(m.transform_vector(Point::new(1.0, 1.0)), Point::new(2.0, 2.0));
}

#[test]
fn invert_round_trips_points() {
    let m = Matrix([2.0, 0.5, -0.25, 3.0, 7.0, -4.0]);
    let inv = m.invert();
    for p in [Point::new(0.0, 0.0), Point::new(12.5, -3.0), Point::new(-100.0, 42.0)] {
        assert!(point_approx_eq(inv.transform_point(m.transform_point(p)), p));
    }
}

#[test]
fn without_translation_zeroes_offset() {
    let m = Matrix([2.0, 0.0, 0.0, 3.0, 9.0, 9.0]).without_translation();
    assert_eq!(m, Matrix([2.0, 0.0, 0.0, 3.0, 0.0, 0.0]));
}

// =============================================================
// Fit / cover
// =============================================================

#[test]
fn scale_to_fit_uses_tighter_axis() {
    let s = find_scale_to_fit(Size::new(200.0, 100.0), Size::new(100.0, 100.0));
    assert!(approx_eq(s, 0.5));
    let fitted = Size::new(200.0, 100.0).scaled(s);
    assert!(fitted.width <= 100.0 && fitted.height <= 100.0);
}

#[test]
fn scale_to_cover_uses_looser_axis() {
    let s = find_scale_to_cover(Size::new(200.0, 100.0), Size::new(100.0, 100.0));
    assert!(approx_eq(s, 1.0));
    let covered = Size::new(200.0, 100.0).scaled(s);
    assert!(covered.width >= 100.0 && covered.height >= 100.0);
}

#[test]
fn fit_and_cover_agree_for_same_aspect() {
    let inner = Size::new(16.0, 9.0);
    let outer = Size::new(320.0, 180.0);
    assert!(approx_eq(find_scale_to_fit(inner, outer), 20.0));
    assert!(approx_eq(find_scale_to_cover(inner, outer), 20.0));
}

#[test]
fn fit_and_cover_positive_for_positive_inputs() {
    let inner = Size::new(0.001, 5000.0);
    let outer = Size::new(3.0, 7.0);
    assert!(find_scale_to_fit(inner, outer) > 0.0);
    assert!(find_scale_to_cover(inner, outer) > 0.0);
}

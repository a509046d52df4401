use super::*;
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::{FRAC_PI_2, PI};

fn v(x: f64, y: f64) -> Vector2 {
    Vector2::new(x, y)
}

fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> LineSegment2 {
    LineSegment2::new(v(x1, y1), v(x2, y2))
}

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Rectangle {
    Rectangle::from_min_max(v(x0, y0), v(x1, y1))
}

// ---- vectors ----

#[test]
fn normalize_keeps_zero_and_scales_to_unit() {
    assert_eq!(Vector2::zeros().normalize(), Vector2::zeros());
    let mut z = Vector2::zeros();
    z.normalize_in_place();
    assert_eq!(z, Vector2::zeros());

    let n = v(3.0, 4.0).normalize();
    assert!((n.length() - 1.0).abs() < 1e-12);
    assert!(n.approx_eq(v(0.6, 0.8), 1e-12));
}

#[test]
fn operators_match_named_methods() {
    let a = v(1.0, -2.0);
    let b = v(0.5, 4.0);
    assert_eq!(a + b, v(1.5, 2.0));
    assert_eq!(a - b, v(0.5, -6.0));
    assert_eq!(a * 2.0, a.scale(2.0));
    assert_eq!(2.0 * a, v(2.0, -4.0));
    assert_eq!(-a, v(-1.0, 2.0));
    assert_eq!(a.dot(b), 0.5 - 8.0);

    let mut c = a;
    c += b;
    c -= a;
    c *= 3.0;
    assert_eq!(c, v(1.5, 12.0));
}

#[test]
fn rotate_is_counterclockwise_in_radians() {
    let r = v(1.0, 0.0).rotate(FRAC_PI_2);
    assert!(r.approx_eq(v(0.0, 1.0), 1e-12));
    let mut w = v(0.0, 2.0);
    w.rotate_in_place(PI);
    assert!(w.approx_eq(v(0.0, -2.0), 1e-12));
}

#[test]
fn angle_to_is_signed() {
    let x = v(1.0, 0.0);
    assert!((x.angle_to(v(0.0, 1.0)) - FRAC_PI_2).abs() < 1e-12);
    assert!((x.angle_to(v(0.0, -1.0)) + FRAC_PI_2).abs() < 1e-12);
    assert!((x.angle_to(v(-1.0, 0.0)).abs() - PI).abs() < 1e-12);
    assert!(x.angle_to(v(5.0, 0.0)).abs() < 1e-12);
}

#[test]
fn degree_conversions_round_trip() {
    assert!((rad_to_deg(PI) - 180.0).abs() < 1e-12);
    assert!((deg_to_rad(90.0) - FRAC_PI_2).abs() < 1e-12);
    assert!((deg_to_rad(rad_to_deg(0.3)) - 0.3).abs() < 1e-12);
}

#[test]
fn nalgebra_conversions() {
    let a = v(1.5, -2.0);
    let na: nalgebra::Vector2<f64> = a.into();
    assert_eq!(na, nalgebra::vector![1.5, -2.0]);
    assert_eq!(Vector2::from(na), a);
    let m = Matrix2::new(1.0, 2.0, 3.0, 4.0);
    let nm: nalgebra::Matrix2<f64> = m.into();
    assert_eq!(nm, nalgebra::matrix![1.0, 2.0; 3.0, 4.0]);
    assert_eq!(Matrix2::from(nm), m);
}

// ---- matrices ----

#[test]
fn from_columns_places_columns() {
    let m = Matrix2::from_columns(v(1.0, 2.0), v(3.0, 4.0));
    assert_eq!(m, Matrix2::new(1.0, 3.0, 2.0, 4.0));
    assert_eq!(m.det(), 1.0 * 4.0 - 3.0 * 2.0);
}

#[test]
fn products() {
    let a = Matrix2::new(1.0, 2.0, 3.0, 4.0);
    let b = Matrix2::new(0.0, 1.0, 1.0, 0.0);
    assert_eq!(a * b, Matrix2::new(2.0, 1.0, 4.0, 3.0));
    assert_eq!(a * Matrix2::identity(), a);
    assert_eq!(a * v(1.0, 1.0), v(3.0, 7.0));
    let mut w = v(1.0, 1.0);
    a.mul_v_in_place(&mut w);
    assert_eq!(w, v(3.0, 7.0));
}

#[test]
fn rotation_is_orthonormal() {
    let r = Matrix2::rotation(0.7);
    assert!((r.det() - 1.0).abs() < 1e-12);
    let rt = Matrix2::new(r[(0, 0)], r[(1, 0)], r[(0, 1)], r[(1, 1)]);
    let id = r * rt;
    for i in 0..2 {
        for j in 0..2 {
            let e = if i == j { 1.0 } else { 0.0 };
            assert!((id[(i, j)] - e).abs() < 1e-12);
        }
    }
}

#[test]
fn pivot_swaps_when_lower_entry_dominates() {
    let m = Matrix2::new(0.0, 1.0, 2.0, 3.0);
    let (p, a) = m.pivot();
    assert_eq!(p, Matrix2::new(0.0, 1.0, 1.0, 0.0));
    assert_eq!(a, Matrix2::new(2.0, 3.0, 0.0, 1.0));

    let keep = Matrix2::new(-5.0, 1.0, 2.0, 3.0);
    let (p, a) = keep.pivot();
    assert_eq!(p, Matrix2::identity());
    assert_eq!(a, keep);
}

#[test]
fn lu_reconstructs_permuted_matrix() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..64 {
        let m = Matrix2::new(
            rng.gen_range(-3.0..3.0),
            rng.gen_range(-3.0..3.0),
            rng.gen_range(-3.0..3.0),
            rng.gen_range(-3.0..3.0),
        );
        let Lu { l, u, p } = m.lu_decomposition();
        assert_eq!(l[(0, 0)], 1.0);
        assert_eq!(l[(0, 1)], 0.0);
        assert_eq!(l[(1, 1)], 1.0);
        assert_eq!(u[(1, 0)], 0.0);
        assert!(l[(1, 0)].abs() <= 1.0 + 1e-12, "partial pivoting bounds the multiplier");
        let pm = p * m;
        let lu = l * u;
        for i in 0..2 {
            for j in 0..2 {
                assert!((pm[(i, j)] - lu[(i, j)]).abs() < 1e-12);
            }
        }
    }
}

#[test]
fn solve_needs_pivot_for_zero_leading_entry() {
    // Without the row swap this would divide by zero.
    let m = Matrix2::new(0.0, 1.0, 1.0, 0.0);
    let x = m.solve(v(2.0, 3.0));
    assert_eq!(x, v(3.0, 2.0));
}

#[test]
fn solve_matches_nalgebra_lu() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..64 {
        let m = Matrix2::new(
            rng.gen_range(-2.0..2.0),
            rng.gen_range(-2.0..2.0),
            rng.gen_range(-2.0..2.0),
            rng.gen_range(-2.0..2.0),
        );
        if m.det().abs() < 1e-3 {
            continue;
        }
        let b = v(rng.gen_range(-2.0..2.0), rng.gen_range(-2.0..2.0));
        let nm: nalgebra::Matrix2<f64> = m.into();
        let nb: nalgebra::Vector2<f64> = b.into();
        let expected = nm.lu().solve(&nb).expect("non-singular");
        assert!(m.solve(b).approx_eq(expected.into(), 1e-9));
    }
}

#[test]
fn singular_solve_yields_non_finite() {
    let m = Matrix2::new(1.0, 2.0, 2.0, 4.0);
    assert!(!m.solve(v(1.0, 1.0)).is_finite());
    let zero = Matrix2::new(0.0, 0.0, 0.0, 0.0);
    assert!(zero.solve(v(0.0, 0.0)).has_nan());
}

#[test]
fn display_prints_two_rows() {
    let s = Matrix2::identity().to_string();
    assert_eq!(s.lines().count(), 2);
    assert!(s.starts_with("|1e0\t0e0|"));
}

// ---- rectangles ----

#[test]
fn covers_is_closed() {
    let r = rect(0.0, 0.0, 10.0, 5.0);
    assert!(r.covers(v(0.0, 0.0)));
    assert!(r.covers(v(10.0, 5.0)));
    assert!(r.covers(v(3.0, 2.0)));
    assert!(!r.covers(v(10.1, 2.0)));
    assert!(!r.covers(v(3.0, -0.1)));
}

#[test]
fn clips_is_symmetric_for_containment_and_crossing() {
    let big = rect(0.0, 0.0, 10.0, 10.0);
    let small = rect(4.0, 4.0, 6.0, 6.0);
    assert!(big.clips(&small));
    assert!(small.clips(&big));

    // plus shape: no corner of either lies inside the other
    let wide = rect(0.0, 4.0, 10.0, 6.0);
    let tall = rect(4.0, 0.0, 6.0, 10.0);
    assert!(wide.clips(&tall));
    assert!(tall.clips(&wide));

    let far = rect(20.0, 20.0, 30.0, 30.0);
    assert!(!big.clips(&far));
    assert!(!far.clips(&big));

    // touching edges overlap
    assert!(big.clips(&rect(10.0, 0.0, 12.0, 3.0)));
}

#[test]
fn legacy_corner_test_misses_containment_and_crossing() {
    let big = rect(0.0, 0.0, 10.0, 10.0);
    let small = rect(4.0, 4.0, 6.0, 6.0);
    // big covers every corner of small, small covers none of big's
    assert!(big.clips_corner_legacy(&small));
    assert!(!small.clips_corner_legacy(&big));

    let wide = rect(0.0, 4.0, 10.0, 6.0);
    let tall = rect(4.0, 0.0, 6.0, 10.0);
    assert!(!wide.clips_corner_legacy(&tall));
    assert!(!tall.clips_corner_legacy(&wide));
}

#[test]
fn size_and_translate() {
    let r = rect(1.0, 2.0, 4.0, 7.0);
    assert_eq!(r.size(), (3.0, 5.0));
    let shift = v(1.0, -1.0);
    let moved = r.translate(shift);
    assert_eq!(moved, rect(2.0, 1.0, 5.0, 6.0));
    let mut m = r;
    m.translate_in_place(shift);
    assert_eq!(m, moved);
    assert_eq!(m.size(), r.size());
}

#[test]
fn quadrants_partition_bounds() {
    let r = rect(0.0, 0.0, 8.0, 4.0);
    let [ul, ur, dl, dr] = r.quadrants();
    assert_eq!(ul, rect(0.0, 2.0, 4.0, 4.0));
    assert_eq!(ur, rect(4.0, 2.0, 8.0, 4.0));
    assert_eq!(dl, rect(0.0, 0.0, 4.0, 2.0));
    assert_eq!(dr, rect(4.0, 0.0, 8.0, 2.0));
    assert_eq!(r.center(), v(4.0, 2.0));
}

// ---- segments ----

#[test]
fn perpendicular_segments_cross() {
    let p = seg(0.0, 0.0, 10.0, 0.0)
        .intersection_with(&seg(5.0, -5.0, 5.0, 5.0))
        .expect("crossing");
    assert!(p.approx_eq(v(5.0, 0.0), EPS));
}

#[test]
fn crossing_beyond_first_segment_is_undefined() {
    let e = seg(0.0, 0.0, 10.0, 0.0).intersection_with(&seg(20.0, -5.0, 20.0, 5.0));
    assert_eq!(e, Err(UndefinedError::OutsideFirst));
    let e = seg(20.0, -5.0, 20.0, 5.0).intersection_with(&seg(0.0, 0.0, 10.0, 0.0));
    assert_eq!(e, Err(UndefinedError::OutsideSecond));
}

#[test]
fn crossing_beyond_second_segment_is_undefined() {
    let e = seg(0.0, 0.0, 10.0, 0.0).intersection_with(&seg(5.0, 1.0, 5.0, 5.0));
    assert_eq!(e, Err(UndefinedError::OutsideSecond));
}

#[test]
fn parallel_segments_are_undefined() {
    let base = seg(0.0, 0.0, 10.0, 0.0);
    assert_eq!(
        base.intersection_with(&seg(0.0, 3.0, 10.0, 3.0)),
        Err(UndefinedError::Parallel)
    );
    // diagonal direction: the singular solve gives ±∞ rather than NaN
    let diag = seg(0.0, 0.0, 4.0, 4.0);
    assert_eq!(
        diag.intersection_with(&seg(0.0, 1.0, 4.0, 5.0)),
        Err(UndefinedError::Parallel)
    );
    // collinear
    assert_eq!(
        base.intersection_with(&seg(2.0, 0.0, 8.0, 0.0)),
        Err(UndefinedError::Parallel)
    );
}

#[test]
fn shifted_parallel_copies_at_any_angle_are_parallel() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..10_000 {
        let th = rng.gen_range(0.0..2.0 * PI);
        let d = v(th.cos(), th.sin());
        let a = v(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0));
        let l1 = LineSegment2::new(a, a + d * 5.0);
        let shift = d.rotate(FRAC_PI_2) * 2.0;
        let l2 = LineSegment2::new(l1.start + shift, l1.end + shift);
        assert_eq!(l1.intersection_with(&l2), Err(UndefinedError::Parallel), "angle {th}");
    }
}

#[test]
fn degenerate_segments_are_reported_by_position() {
    let point = seg(1.0, 1.0, 1.0, 1.0);
    let line = seg(0.0, 0.0, 2.0, 2.0);
    let e = point.intersection_with(&line).unwrap_err();
    assert_eq!(e, UndefinedError::FirstDegenerate);
    assert!(e.is_degenerate());
    assert_eq!(line.intersection_with(&point), Err(UndefinedError::SecondDegenerate));
    assert!(e.to_string().contains("first segment is a point"));
}

#[test]
fn shared_endpoint_counts() {
    let p = seg(0.0, 0.0, 4.0, 0.0)
        .intersection_with(&seg(4.0, 0.0, 4.0, 3.0))
        .expect("touching endpoints");
    assert!(p.approx_eq(v(4.0, 0.0), EPS));
}

/// Cramer's rule on `a + s·ab = c + t·cd`.
fn textbook_intersection(l1: &LineSegment2, l2: &LineSegment2) -> Option<Vector2> {
    let ab = l1.direction();
    let cd = l2.direction();
    let ca = l2.start - l1.start;
    let den = ab.x * cd.y - ab.y * cd.x;
    if den.abs() < 1e-12 {
        return None;
    }
    let s = (ca.x * cd.y - ca.y * cd.x) / den;
    let t = (ca.x * ab.y - ca.y * ab.x) / den;
    if !(0.0..=1.0).contains(&s) || !(0.0..=1.0).contains(&t) {
        return None;
    }
    Some(l1.start + ab * s)
}

/// Overlap decided from corners and edge crossings only.
fn brute_force_overlap(a: &Rectangle, b: &Rectangle) -> bool {
    let corners = |r: &Rectangle| [r.ul, r.ur, r.dr, r.dl];
    if corners(b).iter().any(|&c| a.covers(c)) || corners(a).iter().any(|&c| b.covers(c)) {
        return true;
    }
    let edges = |r: &Rectangle| {
        let c = corners(r);
        [
            LineSegment2::new(c[0], c[1]),
            LineSegment2::new(c[1], c[2]),
            LineSegment2::new(c[2], c[3]),
            LineSegment2::new(c[3], c[0]),
        ]
    };
    edges(a)
        .iter()
        .any(|ea| edges(b).iter().any(|eb| ea.intersection_with(eb).is_ok()))
}

fn int_rect() -> impl Strategy<Value = Rectangle> {
    (-20i32..20, -20i32..20, 1i32..12, 1i32..12).prop_map(|(x, y, w, h)| {
        Rectangle::from_origin_size(x as f64, y as f64, w as f64, h as f64)
    })
}

proptest! {
    #[test]
    fn solve_round_trips(
        a in -10.0f64..10.0, b in -10.0f64..10.0,
        c in -10.0f64..10.0, d in -10.0f64..10.0,
        x in -10.0f64..10.0, y in -10.0f64..10.0,
    ) {
        let m = Matrix2::new(a, b, c, d);
        prop_assume!(m.det().abs() > 1e-2);
        let rhs = v(x, y);
        let back = m.mul_v(m.solve(rhs));
        prop_assert!(back.approx_eq(rhs, 1e-7), "{back:?} vs {rhs:?}");
    }

    #[test]
    fn clips_agrees_with_brute_force(a in int_rect(), b in int_rect()) {
        prop_assert_eq!(a.clips(&b), b.clips(&a));
        prop_assert_eq!(a.clips(&b), brute_force_overlap(&a, &b));
    }

    #[test]
    fn crossing_point_is_order_independent(
        px in -50.0f64..50.0, py in -50.0f64..50.0,
        th1 in 0.0f64..PI, dth in 0.3f64..(PI - 0.3),
        s0 in 0.5f64..5.0, s1 in 0.5f64..5.0,
        t0 in 0.5f64..5.0, t1 in 0.5f64..5.0,
    ) {
        let p = v(px, py);
        let d1 = v(th1.cos(), th1.sin());
        let th2 = th1 + dth;
        let d2 = v(th2.cos(), th2.sin());
        let l1 = LineSegment2::new(p - d1 * s0, p + d1 * s1);
        let l2 = LineSegment2::new(p - d2 * t0, p + d2 * t1);

        let q12 = l1.intersection_with(&l2);
        let q21 = l2.intersection_with(&l1);
        prop_assert!(q12.is_ok() && q21.is_ok(), "{q12:?} {q21:?}");
        let (q12, q21) = (q12.unwrap(), q21.unwrap());
        prop_assert!(q12.approx_eq(q21, 1e-7));
        prop_assert!(q12.approx_eq(p, 1e-7));
        let textbook = textbook_intersection(&l1, &l2).expect("textbook crossing");
        prop_assert!(q12.approx_eq(textbook, 1e-7));
    }

    #[test]
    fn shifted_parallel_copy_never_intersects(
        x0 in -20.0f64..20.0, y0 in -20.0f64..20.0,
        th in 0.0f64..(2.0 * PI), len in 1.0f64..10.0, off in 0.5f64..5.0,
    ) {
        let d = v(th.cos(), th.sin());
        let a = v(x0, y0);
        let l1 = LineSegment2::new(a, a + d * len);
        let shift = d.rotate(FRAC_PI_2) * off;
        let l2 = LineSegment2::new(l1.start + shift, l1.end + shift);
        prop_assert_eq!(l1.intersection_with(&l2), Err(UndefinedError::Parallel));
        prop_assert_eq!(l2.intersection_with(&l1), Err(UndefinedError::Parallel));
        let shrunk = LineSegment2::new(a, a + d * 1e-18);
        prop_assert_eq!(shrunk.intersection_with(&l1), Err(UndefinedError::FirstDegenerate));
    }
}

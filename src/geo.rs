//! Geometric predicates on 2D points.
//!
//! These are the classic orientation predicates of computational geometry,
//! built on the signed area of a triangle. They are pure functions; the
//! half-edge mesh uses them to decide where in a vertex's angular fan a new
//! edge has to be spliced.
//!
//! [`left`] and [`left_on`] compare the signed area against zero *exactly*.
//! When using them to compare directions (rather than positions), callers
//! have to normalize the direction vectors first so that the magnitudes
//! don't drown out the sign. Only [`collinear`] uses a small tolerance, via
//! [`is_zero`][crate::math::is_zero].

use cgmath::Point2;

use crate::math::{is_zero, PrimitiveFloat};


/// Twice the signed area of the triangle `a`, `b`, `c`.
///
/// The result is positive if the triangle is wound counter-clockwise, i.e.
/// if `c` lies to the left of the directed line from `a` to `b`.
#[inline(always)]
pub fn area2<F: PrimitiveFloat>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> F {
    (b - a).perp_dot(c - a)
}

/// Checks whether `c` is strictly to the left of the directed line `a → b`.
#[inline(always)]
pub fn left<F: PrimitiveFloat>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> bool {
    area2(a, b, c) > F::zero()
}

/// Checks whether `c` is to the left of, or on, the directed line `a → b`.
#[inline(always)]
pub fn left_on<F: PrimitiveFloat>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> bool {
    area2(a, b, c) >= F::zero()
}

/// Checks whether `a`, `b` and `c` lie on one line, up to a small tolerance.
#[inline(always)]
pub fn collinear<F: PrimitiveFloat>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> bool {
    is_zero(area2(a, b, c))
}

/// Checks whether the direction towards `b` lies inside the angular cone at
/// apex `a` that is swept counter-clockwise from the direction towards `a0`
/// to the direction towards `a1`.
///
/// `a0` and `a1` are the neighbors of `a` along some polygon or fan: `a0` is
/// the previous point, `a1` the next one (CCW order). Whether `a` is a
/// convex or a reflex corner changes the test: a reflex cone is the
/// complement of the convex cone spanned by the reversed directions.
pub fn in_cone<F: PrimitiveFloat>(
    a0: Point2<F>,
    a: Point2<F>,
    a1: Point2<F>,
    b: Point2<F>,
) -> bool {
    if left_on(a, a1, a0) {
        // `a` is a convex corner: `b` has to be strictly inside the wedge.
        left(a, b, a0) && left(b, a, a1)
    } else {
        // `a` is a reflex corner.
        !(left_on(a, b, a1) && left_on(b, a, a0))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    #[test]
    fn area2_sign() {
        // CCW triangle -> positive, CW -> negative.
        assert_eq!(area2(p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)), 1.0);
        assert_eq!(area2(p(0.0, 0.0), p(0.0, 1.0), p(1.0, 0.0)), -1.0);
        assert_eq!(area2(p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)), 0.0);
    }

    #[test]
    fn left_and_left_on() {
        let a = p(0.0, 0.0);
        let b = p(2.0, 0.0);

        assert!(left(a, b, p(1.0, 1.0)));
        assert!(!left(a, b, p(1.0, -1.0)));
        assert!(!left(a, b, p(1.0, 0.0)));

        assert!(left_on(a, b, p(1.0, 1.0)));
        assert!(left_on(a, b, p(1.0, 0.0)));
        assert!(!left_on(a, b, p(1.0, -1.0)));
    }

    #[test]
    fn collinear_tolerance() {
        let a = p(0.0, 0.0);
        let b = p(1.0, 0.0);

        assert!(collinear(a, b, p(5.0, 0.0)));
        assert!(collinear(a, b, p(5.0, 1e-12)));
        assert!(!collinear(a, b, p(5.0, 1e-3)));
    }

    #[test]
    fn in_cone_convex() {
        // Convex corner at the origin: previous neighbor to the left, next
        // neighbor above. The cone is the upper-left wedge between them.
        let a = p(0.0, 0.0);
        let a0 = p(-1.0, 0.0);
        let a1 = p(0.0, 1.0);

        assert!(in_cone(a0, a, a1, p(-1.0, 1.0)));
        assert!(!in_cone(a0, a, a1, p(1.0, -1.0)));
        assert!(!in_cone(a0, a, a1, p(1.0, 1.0)));
        // Boundary directions are not inside.
        assert!(!in_cone(a0, a, a1, p(-2.0, 0.0)));
        assert!(!in_cone(a0, a, a1, p(0.0, 2.0)));
    }

    #[test]
    fn in_cone_reflex() {
        // Reflex corner (the neighbors of the convex case, swapped): the
        // cone is the complement, spanning three quadrants.
        let a = p(0.0, 0.0);
        let a0 = p(0.0, 1.0);
        let a1 = p(-1.0, 0.0);

        assert!(in_cone(a0, a, a1, p(1.0, 1.0)));
        assert!(in_cone(a0, a, a1, p(0.0, -1.0)));
        assert!(in_cone(a0, a, a1, p(1.0, -1.0)));
        assert!(!in_cone(a0, a, a1, p(-1.0, 1.0)));
        // Boundary directions are not inside.
        assert!(!in_cone(a0, a, a1, p(0.0, 2.0)));
    }

    #[test]
    fn in_cone_straight_line() {
        // Degree-2 vertex on a straight line: the two neighbor directions
        // are opposite. Every off-line direction is in exactly one of the
        // two cones.
        let a = p(0.0, 0.0);
        let a0 = p(-1.0, 0.0);
        let a1 = p(1.0, 0.0);

        assert!(in_cone(a0, a, a1, p(0.0, 1.0)));
        assert!(!in_cone(a0, a, a1, p(0.0, -1.0)));
        // And mirrored for the swapped cone.
        assert!(in_cone(a1, a, a0, p(0.0, -1.0)));
        assert!(!in_cone(a1, a, a0, p(0.0, 1.0)));
    }
}

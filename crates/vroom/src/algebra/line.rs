//! Finite line segments and their intersection point.
//!
//! Model
//! - Solve `s·âb − t·ĉd = c − a` for the infinite lines through both segments,
//!   with `âb`, `ĉd` the normalized directions. `s` is then a signed distance
//!   along `âb`, so the candidate is `a + s·âb`.
//! - Range checks project the candidate onto the un-normalized directions:
//!   `0 <= ab·av <= ab·ab` (and likewise for `cd`). Both sides are in squared
//!   segment-length units, so mixing with the normalized solve is consistent.

use super::error::UndefinedError;
use super::matrix::Matrix2;
use super::util::EPS;
use super::vector::Vector2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment2 {
    pub start: Vector2,
    pub end: Vector2,
}

impl LineSegment2 {
    #[inline]
    pub fn new(start: Vector2, end: Vector2) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn direction(&self) -> Vector2 {
        self.end - self.start
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().length()
    }

    /// Intersection point of two finite segments (endpoints included).
    ///
    /// Fails with the reason when a segment is shorter than machine epsilon,
    /// when the lines are parallel (the sine of the angle between the unit
    /// directions is within `EPS` of zero), or when the crossing of the
    /// infinite lines lies outside either segment.
    pub fn intersection_with(&self, other: &LineSegment2) -> Result<Vector2, UndefinedError> {
        let ab = self.direction();
        let cd = other.direction();
        let ca = other.start - self.start;

        if ab.length() < f64::EPSILON {
            return Err(UndefinedError::FirstDegenerate);
        }
        if cd.length() < f64::EPSILON {
            return Err(UndefinedError::SecondDegenerate);
        }

        let abn = ab.normalize();
        let cdn = -cd.normalize();

        let m = Matrix2::from_columns(abn, cdn);
        // Rounding in the normalization can leave an exactly parallel pair with
        // a tiny nonzero determinant, so the solve alone is not enough.
        if m.det().abs() <= EPS {
            return Err(UndefinedError::Parallel);
        }
        let st = m.solve(ca);
        let v = self.start + abn * st.x;
        if !v.is_finite() {
            return Err(UndefinedError::Parallel);
        }

        let ab_dot_av = ab.dot(v - self.start);
        if ab_dot_av < 0.0 || ab_dot_av > ab.dot(ab) {
            return Err(UndefinedError::OutsideFirst);
        }

        let cd_dot_cv = cd.dot(v - other.start);
        if cd_dot_cv < 0.0 || cd_dot_cv > cd.dot(cd) {
            return Err(UndefinedError::OutsideSecond);
        }

        Ok(v)
    }
}

//! Axis-aligned rectangles given by four labelled corners.
//!
//! Invariant (assumed, never validated): `ul.x == dl.x`, `ur.x == dr.x`,
//! `ul.y == ur.y`, `dl.y == dr.y`, `ul.x <= ur.x`, `dl.y <= ul.y`.
//! All predicates are closed: touching edges count as overlap.

use super::vector::Vector2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rectangle {
    pub ul: Vector2,
    pub ur: Vector2,
    pub dl: Vector2,
    pub dr: Vector2,
}

impl Rectangle {
    /// Rectangle spanning the lower-left corner `min` and upper-right corner `max`.
    #[inline]
    pub fn from_min_max(min: Vector2, max: Vector2) -> Self {
        Self {
            ul: Vector2::new(min.x, max.y),
            ur: max,
            dl: min,
            dr: Vector2::new(max.x, min.y),
        }
    }

    /// Rectangle `[x, x + w] × [y, y + h]`.
    #[inline]
    pub fn from_origin_size(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::from_min_max(Vector2::new(x, y), Vector2::new(x + w, y + h))
    }

    /// Lower-left corner.
    #[inline]
    pub fn min(&self) -> Vector2 {
        self.dl
    }

    /// Upper-right corner.
    #[inline]
    pub fn max(&self) -> Vector2 {
        self.ur
    }

    #[inline]
    pub fn center(&self) -> Vector2 {
        (self.dl + self.ur).scale(0.5)
    }

    /// Closed point containment.
    #[inline]
    pub fn covers(&self, v: Vector2) -> bool {
        v.x >= self.ul.x && v.x <= self.ur.x && v.y >= self.dl.y && v.y <= self.ul.y
    }

    /// Overlap test: the x-intervals intersect and the y-intervals intersect.
    ///
    /// Symmetric, and true when either rectangle contains the other.
    /// Non-finite corners never overlap anything.
    #[inline]
    pub fn clips(&self, other: &Rectangle) -> bool {
        self.ul.x <= other.ur.x
            && other.ul.x <= self.ur.x
            && self.dl.y <= other.ul.y
            && other.dl.y <= self.ul.y
    }

    /// Legacy overlap test: does `self` cover any corner of `other`?
    ///
    /// Not symmetric. Misses the case where `other` strictly contains `self`
    /// and crosses without covering a corner (e.g. a plus-shaped pair).
    /// Kept for comparison only; the index uses [`Rectangle::clips`].
    #[inline]
    pub fn clips_corner_legacy(&self, other: &Rectangle) -> bool {
        self.covers(other.ul) || self.covers(other.ur) || self.covers(other.dl) || self.covers(other.dr)
    }

    /// `(width, height)`.
    #[inline]
    pub fn size(&self) -> (f64, f64) {
        (self.ur.x - self.ul.x, self.ul.y - self.dr.y)
    }

    #[inline]
    pub fn translate(&self, v: Vector2) -> Rectangle {
        Rectangle {
            ul: self.ul + v,
            ur: self.ur + v,
            dl: self.dl + v,
            dr: self.dr + v,
        }
    }

    #[inline]
    pub fn translate_in_place(&mut self, v: Vector2) {
        self.ul += v;
        self.ur += v;
        self.dl += v;
        self.dr += v;
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.ul.is_finite() && self.ur.is_finite() && self.dl.is_finite() && self.dr.is_finite()
    }

    /// Equal partition into `[upper-left, upper-right, lower-left, lower-right]`.
    ///
    /// Neighbouring quadrants share their common edge.
    pub fn quadrants(&self) -> [Rectangle; 4] {
        let (w, h) = self.size();
        let c = Vector2::new(self.ul.x + 0.5 * w, self.ul.y - 0.5 * h);
        let (lo, hi) = (self.min(), self.max());
        [
            Rectangle::from_min_max(Vector2::new(lo.x, c.y), Vector2::new(c.x, hi.y)),
            Rectangle::from_min_max(c, hi),
            Rectangle::from_min_max(lo, c),
            Rectangle::from_min_max(Vector2::new(c.x, lo.y), Vector2::new(hi.x, c.y)),
        ]
    }
}

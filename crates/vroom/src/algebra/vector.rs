//! 2D vectors.
//!
//! - `Vector2`: plain `(x, y)` value type. Operators return new values; the
//!   `*_in_place` methods and compound assignments mutate explicitly.
//! - NaN components are allowed and are how the solver signals singular systems.
//!
//! Code cross-refs: `Matrix2` (rotation, columns), `LineSegment2`.

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::matrix::Matrix2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zeros() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub fn dot(&self, w: Vector2) -> f64 {
        self.x * w.x + self.y * w.y
    }

    /// Euclidean norm.
    #[inline]
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn scale(&self, s: f64) -> Vector2 {
        Vector2::new(s * self.x, s * self.y)
    }

    #[inline]
    pub fn scale_in_place(&mut self, s: f64) {
        self.x *= s;
        self.y *= s;
    }

    #[inline]
    pub fn add_in_place(&mut self, w: Vector2) {
        self.x += w.x;
        self.y += w.y;
    }

    #[inline]
    pub fn sub_in_place(&mut self, w: Vector2) {
        self.x -= w.x;
        self.y -= w.y;
    }

    /// Unit vector in the same direction. The zero vector comes back unchanged.
    #[inline]
    pub fn normalize(&self) -> Vector2 {
        let l = self.length();
        if l == 0.0 {
            return *self;
        }
        self.scale(1.0 / l)
    }

    #[inline]
    pub fn normalize_in_place(&mut self) {
        let l = self.length();
        if l == 0.0 {
            return;
        }
        self.scale_in_place(1.0 / l);
    }

    /// Counterclockwise rotation by `rad` radians.
    #[inline]
    pub fn rotate(&self, rad: f64) -> Vector2 {
        Matrix2::rotation(rad).mul_v(*self)
    }

    #[inline]
    pub fn rotate_in_place(&mut self, rad: f64) {
        Matrix2::rotation(rad).mul_v_in_place(self);
    }

    /// Signed angle from `self` to `w` in (-π, π]: `atan2(det([v|w]), v·w)`.
    ///
    /// Positive when `w` lies counterclockwise of `self`.
    #[inline]
    pub fn angle_to(&self, w: Vector2) -> f64 {
        let m = Matrix2::from_columns(*self, w);
        m.det().atan2(self.dot(w))
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn has_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    /// Componentwise comparison within `eps`.
    #[inline]
    pub fn approx_eq(&self, w: Vector2, eps: f64) -> bool {
        (self.x - w.x).abs() <= eps && (self.y - w.y).abs() <= eps
    }
}

impl Add for Vector2 {
    type Output = Vector2;
    #[inline]
    fn add(self, rhs: Vector2) -> Self::Output {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;
    #[inline]
    fn sub(self, rhs: Vector2) -> Self::Output {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;
    #[inline]
    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl Mul<Vector2> for f64 {
    type Output = Vector2;
    #[inline]
    fn mul(self, rhs: Vector2) -> Self::Output {
        rhs.scale(self)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;
    #[inline]
    fn neg(self) -> Self::Output {
        Vector2::new(-self.x, -self.y)
    }
}

impl AddAssign for Vector2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vector2) {
        self.add_in_place(rhs);
    }
}

impl SubAssign for Vector2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vector2) {
        self.sub_in_place(rhs);
    }
}

impl MulAssign<f64> for Vector2 {
    #[inline]
    fn mul_assign(&mut self, rhs: f64) {
        self.scale_in_place(rhs);
    }
}

impl From<[f64; 2]> for Vector2 {
    #[inline]
    fn from(v: [f64; 2]) -> Self {
        Vector2::new(v[0], v[1])
    }
}

impl From<Vector2> for [f64; 2] {
    #[inline]
    fn from(v: Vector2) -> Self {
        [v.x, v.y]
    }
}

impl From<nalgebra::Vector2<f64>> for Vector2 {
    #[inline]
    fn from(v: nalgebra::Vector2<f64>) -> Self {
        Vector2::new(v.x, v.y)
    }
}

impl From<Vector2> for nalgebra::Vector2<f64> {
    #[inline]
    fn from(v: Vector2) -> Self {
        nalgebra::Vector2::new(v.x, v.y)
    }
}

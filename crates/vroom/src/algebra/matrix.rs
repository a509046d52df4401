//! 2×2 matrices and the pivoted LU solve.
//!
//! Storage is row-major: `m[(i, j)]` is row `i`, column `j`.
//!
//! Solve
//! - `pivot` swaps the two rows when `|m₀₀| < |m₁₀|` (partial pivoting).
//! - `lu_decomposition` factors `P·M = L·U` with `L` unit lower triangular.
//! - `solve` runs forward then back substitution. Singular systems are not
//!   rejected: the division by a zero pivot leaves NaN/±∞ in the result and the
//!   caller decides what that means (see `LineSegment2::intersection_with`).

use std::fmt;
use std::ops::{Index, IndexMut, Mul};

use super::vector::Vector2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix2 {
    pub rows: [[f64; 2]; 2],
}

/// Factors of `P·M = L·U`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lu {
    pub l: Matrix2,
    pub u: Matrix2,
    pub p: Matrix2,
}

impl Matrix2 {
    #[inline]
    pub const fn new(a11: f64, a12: f64, a21: f64, a22: f64) -> Self {
        Self {
            rows: [[a11, a12], [a21, a22]],
        }
    }

    /// Matrix whose columns are `c1` and `c2`.
    #[inline]
    pub fn from_columns(c1: Vector2, c2: Vector2) -> Self {
        Self::new(c1.x, c2.x, c1.y, c2.y)
    }

    #[inline]
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0)
    }

    /// Counterclockwise rotation by `rad` radians.
    #[inline]
    pub fn rotation(rad: f64) -> Self {
        let (s, c) = rad.sin_cos();
        Self::new(c, -s, s, c)
    }

    #[inline]
    pub fn det(&self) -> f64 {
        let m = &self.rows;
        m[0][0] * m[1][1] - m[0][1] * m[1][0]
    }

    #[inline]
    pub fn mul_v(&self, v: Vector2) -> Vector2 {
        let m = &self.rows;
        Vector2::new(
            m[0][0] * v.x + m[0][1] * v.y,
            m[1][0] * v.x + m[1][1] * v.y,
        )
    }

    #[inline]
    pub fn mul_v_in_place(&self, v: &mut Vector2) {
        *v = self.mul_v(*v);
    }

    /// Row permutation `p` and the permuted matrix `p·self`.
    pub fn pivot(&self) -> (Matrix2, Matrix2) {
        let mut p = Matrix2::identity();
        if self.rows[0][0].abs() < self.rows[1][0].abs() {
            p.rows.swap(0, 1);
        }
        (p, p * *self)
    }

    pub fn lu_decomposition(&self) -> Lu {
        let (p, a) = self.pivot();
        let mut u = Matrix2::new(a[(0, 0)], a[(0, 1)], 0.0, 0.0);
        let mut l = Matrix2::identity();
        l[(1, 0)] = a[(1, 0)] / u[(0, 0)];
        u[(1, 1)] = a[(1, 1)] - u[(0, 1)] * l[(1, 0)];
        Lu { l, u, p }
    }

    /// `x` with `self · x = v`. Non-finite components mean the system is singular.
    pub fn solve(&self, v: Vector2) -> Vector2 {
        let Lu { l, u, p } = self.lu_decomposition();
        let pv = p.mul_v(v);
        // forward: L y = P v
        let y = Vector2::new(pv.x, pv.y - l[(1, 0)] * pv.x);
        // backward: U x = y
        let x1 = y.y / u[(1, 1)];
        let x0 = (y.x - u[(0, 1)] * x1) / u[(0, 0)];
        Vector2::new(x0, x1)
    }
}

impl Default for Matrix2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Index<(usize, usize)> for Matrix2 {
    type Output = f64;
    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.rows[i][j]
    }
}

impl IndexMut<(usize, usize)> for Matrix2 {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        &mut self.rows[i][j]
    }
}

impl Mul for Matrix2 {
    type Output = Matrix2;
    fn mul(self, k: Matrix2) -> Matrix2 {
        let m = &self.rows;
        let k = &k.rows;
        Matrix2::new(
            m[0][0] * k[0][0] + m[0][1] * k[1][0],
            m[0][0] * k[0][1] + m[0][1] * k[1][1],
            m[1][0] * k[0][0] + m[1][1] * k[1][0],
            m[1][0] * k[0][1] + m[1][1] * k[1][1],
        )
    }
}

impl Mul<Vector2> for Matrix2 {
    type Output = Vector2;
    #[inline]
    fn mul(self, v: Vector2) -> Vector2 {
        self.mul_v(v)
    }
}

impl fmt::Display for Matrix2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.rows;
        writeln!(f, "|{:e}\t{:e}|", m[0][0], m[0][1])?;
        writeln!(f, "|{:e}\t{:e}|", m[1][0], m[1][1])
    }
}

impl From<nalgebra::Matrix2<f64>> for Matrix2 {
    #[inline]
    fn from(m: nalgebra::Matrix2<f64>) -> Self {
        Matrix2::new(m[(0, 0)], m[(0, 1)], m[(1, 0)], m[(1, 1)])
    }
}

impl From<Matrix2> for nalgebra::Matrix2<f64> {
    #[inline]
    fn from(m: Matrix2) -> Self {
        nalgebra::Matrix2::new(m[(0, 0)], m[(0, 1)], m[(1, 0)], m[(1, 1)])
    }
}

//! 2D linear algebra and exact geometry.
//!
//! Purpose
//! - Small value types (`Vector2`, `Matrix2`, `Rectangle`, `LineSegment2`) for
//!   the broad phase and for ad-hoc geometric questions (headings, crossings).
//! - Numerically explicit: the solver never fails, consumers translate
//!   non-finite output into `UndefinedError`.
//!
//! Code cross-refs: `spatial::QuadTree` (uses `Rectangle::clips`).

mod error;
mod line;
mod matrix;
mod rect;
pub mod util;
mod vector;

pub use error::UndefinedError;
pub use line::LineSegment2;
pub use matrix::{Lu, Matrix2};
pub use rect::Rectangle;
pub use util::{deg_to_rad, rad_to_deg, EPS};
pub use vector::Vector2;

#[cfg(test)]
mod tests;

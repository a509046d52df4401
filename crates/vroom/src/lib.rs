//! Broad-phase geometry for a 2D world.
//!
//! - `algebra`: vectors, 2×2 matrices with a pivoted LU solve, axis-aligned
//!   rectangles, and finite segment intersection.
//! - `spatial`: an adaptive quadtree answering "which rectangles may overlap
//!   this one", with streamed queries.
//! - `rand`: replayable random rectangle scenes for tests, benches and drivers.

pub mod algebra;
pub mod rand;
pub mod spatial;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use algebra::{LineSegment2, Matrix2, Rectangle, UndefinedError, Vector2};
pub use spatial::{QuadKey, QuadTree, SpatialError, TreeCfg};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::algebra::{LineSegment2, Matrix2, Rectangle, UndefinedError, Vector2, EPS};
    pub use crate::rand::{draw_disjoint_rects, draw_rects, RectCfg, ReplayToken};
    pub use crate::spatial::{Candidates, QuadKey, QuadTree, SpatialError, TreeCfg};
}

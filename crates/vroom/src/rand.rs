//! Random rectangle scenes (replay tokens).
//!
//! Purpose
//! - Deterministic, indexable draws of axis-aligned rectangles inside a world,
//!   used by tests, benchmarks and the simulation driver.
//!
//! Model
//! - `draw_rects`: independent uniform placement; rectangles may overlap.
//! - `draw_disjoint_rects`: one rectangle per distinct grid cell, strictly
//!   inside its cell, so no two rectangles touch.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::algebra::Rectangle;

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    #[inline]
    pub fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Scene configuration.
#[derive(Clone, Copy, Debug)]
pub struct RectCfg {
    pub width: f64,
    pub height: f64,
    pub count: usize,
    /// Side lengths are drawn from `[min_side, max_side]` per axis.
    pub min_side: f64,
    pub max_side: f64,
}

impl Default for RectCfg {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
            count: 100,
            min_side: 4.0,
            max_side: 24.0,
        }
    }
}

impl RectCfg {
    fn side<R: Rng>(&self, rng: &mut R, cap: f64) -> f64 {
        let hi = self.max_side.min(cap).max(1e-9);
        let lo = self.min_side.clamp(1e-9, hi);
        if lo < hi {
            rng.gen_range(lo..=hi)
        } else {
            hi
        }
    }
}

/// `cfg.count` rectangles placed uniformly, each fully inside the world.
pub fn draw_rects(cfg: RectCfg, tok: ReplayToken) -> Vec<Rectangle> {
    let mut rng = tok.to_std_rng();
    (0..cfg.count)
        .map(|_| {
            let w = cfg.side(&mut rng, cfg.width);
            let h = cfg.side(&mut rng, cfg.height);
            let x = rng.gen::<f64>() * (cfg.width - w);
            let y = rng.gen::<f64>() * (cfg.height - h);
            Rectangle::from_origin_size(x, y, w, h)
        })
        .collect()
}

/// `cfg.count` pairwise disjoint rectangles, or `None` if the grid is too small.
///
/// The world is cut into square cells of side `2 · max_side`; each rectangle
/// takes a distinct random cell and lies strictly inside it.
pub fn draw_disjoint_rects(cfg: RectCfg, tok: ReplayToken) -> Option<Vec<Rectangle>> {
    let cell = 2.0 * cfg.max_side;
    if !(cell > 0.0) {
        return None;
    }
    let cols = (cfg.width / cell).floor() as usize;
    let rows = (cfg.height / cell).floor() as usize;
    if cols * rows < cfg.count {
        return None;
    }
    let mut rng = tok.to_std_rng();
    let mut cells: Vec<usize> = (0..cols * rows).collect();
    cells.shuffle(&mut rng);
    let rects = cells
        .into_iter()
        .take(cfg.count)
        .map(|idx| {
            let (cx, cy) = ((idx % cols) as f64 * cell, (idx / cols) as f64 * cell);
            let w = cfg.side(&mut rng, cfg.max_side);
            let h = cfg.side(&mut rng, cfg.max_side);
            // offsets keep a positive gap to the cell's far edge
            let x = cx + rng.gen::<f64>() * 0.5 * (cell - w);
            let y = cy + rng.gen::<f64>() * 0.5 * (cell - h);
            Rectangle::from_origin_size(x, y, w, h)
        })
        .collect();
    Some(rects)
}

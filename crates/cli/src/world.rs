//! Per-tick simulation driver around the quadtree.
//!
//! Each `tick` advances every body, wraps it around the world edges, and
//! rebuilds a fresh `QuadTree` from the bounding boxes. Queries then run
//! against that frozen tree until the next tick.

use std::collections::BTreeSet;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};
use vroom::prelude::*;

/// Simulation parameters (also accepted as a JSON file).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimCfg {
    pub width: f64,
    pub height: f64,
    pub bodies: usize,
    pub ticks: usize,
    pub dt: f64,
    pub seed: u64,
    /// Bodies are squares of side `2 · half_extent`.
    pub half_extent: f64,
    pub max_acceleration: f64,
    /// Turn rate bound in radians per second.
    pub max_steer: f64,
    pub split_threshold: usize,
    pub min_box_width: f64,
    pub result_capacity: usize,
}

impl Default for SimCfg {
    fn default() -> Self {
        let tree = TreeCfg::default();
        Self {
            width: 1024.0,
            height: 768.0,
            bodies: 100,
            ticks: 60,
            dt: 1.0 / 60.0,
            seed: 0,
            half_extent: 5.0,
            max_acceleration: 60.0,
            max_steer: 0.5,
            split_threshold: tree.split_threshold,
            min_box_width: tree.min_box_width,
            result_capacity: tree.result_capacity,
        }
    }
}

impl SimCfg {
    pub fn tree_cfg(&self) -> TreeCfg {
        TreeCfg {
            split_threshold: self.split_threshold,
            min_box_width: self.min_box_width,
            result_capacity: self.result_capacity,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Body {
    pub id: u32,
    pub position: Vector2,
    /// Unit heading.
    pub heading: Vector2,
    pub speed: f64,
    pub acceleration: f64,
    pub steer: f64,
    pub half_extent: f64,
    /// Straight-line motion of the last tick; `None` after a wrap or before the first tick.
    pub last_step: Option<LineSegment2>,
}

impl Body {
    pub fn new(id: u32, position: Vector2, half_extent: f64) -> Self {
        Self {
            id,
            position,
            heading: Vector2::new(1.0, 0.0),
            speed: 0.0,
            acceleration: 0.0,
            steer: 0.0,
            half_extent,
            last_step: None,
        }
    }

    /// Accelerate, move along the heading, then turn.
    pub fn tick(&mut self, dt: f64) {
        let from = self.position;
        self.speed += self.acceleration * dt;
        self.position += self.heading * (self.speed * dt);
        self.heading.rotate_in_place(self.steer * dt);
        self.heading.normalize_in_place();
        self.last_step = Some(LineSegment2::new(from, self.position));
    }

    pub fn bounding_box(&self) -> Rectangle {
        let e = Vector2::new(self.half_extent, self.half_extent);
        Rectangle::from_min_max(self.position - e, self.position + e)
    }

    /// Signed heading angle relative to the +x axis.
    pub fn heading_angle(&self) -> f64 {
        Vector2::new(1.0, 0.0).angle_to(self.heading)
    }
}

pub struct World {
    pub width: f64,
    pub height: f64,
    pub bodies: Vec<Body>,
    tree_cfg: TreeCfg,
    tree: QuadTree<u32>,
    keys: Vec<Arc<QuadKey<u32>>>,
}

impl World {
    pub fn new(width: f64, height: f64, tree_cfg: TreeCfg) -> Self {
        Self {
            width,
            height,
            bodies: Vec::new(),
            tree_cfg,
            tree: QuadTree::with_cfg(width, height, tree_cfg),
            keys: Vec::new(),
        }
    }

    /// World populated with randomly placed, steered bodies.
    pub fn random(cfg: &SimCfg) -> Self {
        let mut world = World::new(cfg.width, cfg.height, cfg.tree_cfg());
        let mut rng = ReplayToken::new(cfg.seed, 0).to_std_rng();
        for id in 0..cfg.bodies {
            let pos = Vector2::new(rng.gen::<f64>() * cfg.width, rng.gen::<f64>() * cfg.height);
            let mut body = Body::new(id as u32, pos, cfg.half_extent);
            body.heading = body.heading.rotate(rng.gen::<f64>() * std::f64::consts::TAU);
            body.acceleration = rng.gen::<f64>() * cfg.max_acceleration;
            body.steer = (rng.gen::<f64>() * 2.0 - 1.0) * cfg.max_steer;
            world.add(body);
        }
        world
    }

    pub fn add(&mut self, body: Body) {
        self.bodies.push(body);
    }

    pub fn tree(&self) -> &QuadTree<u32> {
        &self.tree
    }

    /// Advance all bodies and rebuild the index from scratch.
    pub fn tick(&mut self, dt: f64) {
        self.tree = QuadTree::with_cfg(self.width, self.height, self.tree_cfg);
        self.keys.clear();
        for body in &mut self.bodies {
            body.tick(dt);
            let p = &mut body.position;
            let mut wrapped = false;
            if p.x < 0.0 {
                p.x = self.width;
                wrapped = true;
            } else if p.x > self.width {
                p.x = 0.0;
                wrapped = true;
            }
            if p.y < 0.0 {
                p.y = self.height;
                wrapped = true;
            } else if p.y > self.height {
                p.y = 0.0;
                wrapped = true;
            }
            if wrapped {
                body.last_step = None;
            }
            self.keys.push(self.tree.insert_at(body.id, body.bounding_box()));
        }
    }

    /// Unordered pairs `(a, b)`, `a < b`, whose bounding boxes overlap.
    ///
    /// Runs on the calling thread; one buffer is reused across all bodies.
    pub fn broad_phase(&self) -> BTreeSet<(u32, u32)> {
        let mut pairs = BTreeSet::new();
        let mut hits = Vec::new();
        for key in &self.keys {
            hits.clear();
            self.tree.collect_clipping_at(&key.bounds, &mut hits);
            for other in hits.iter().filter(|k| !Arc::ptr_eq(*k, key)) {
                let (a, b) = (key.payload, other.payload);
                pairs.insert((a.min(b), a.max(b)));
            }
        }
        pairs
    }

    /// Same pairs as `broad_phase`, fed by streamed per-body queries.
    pub fn broad_phase_streamed(&self) -> BTreeSet<(u32, u32)> {
        self.keys
            .iter()
            .flat_map(|key| {
                let id = key.payload;
                self.tree
                    .clipping_candidates(key)
                    .map(move |other| (id.min(other.payload), id.max(other.payload)))
            })
            .collect()
    }

    /// Candidate pairs whose last straight-line steps cross.
    pub fn crossings(&self, pairs: &BTreeSet<(u32, u32)>) -> Vec<(u32, u32, Vector2)> {
        let step = |id: u32| {
            self.bodies
                .iter()
                .find(|b| b.id == id)
                .and_then(|b| b.last_step)
        };
        pairs
            .iter()
            .filter_map(|&(a, b)| {
                let (sa, sb) = (step(a)?, step(b)?);
                sa.intersection_with(&sb).ok().map(|p| (a, b, p))
            })
            .collect()
    }
}

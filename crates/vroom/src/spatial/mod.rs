//! Adaptive quadtree over axis-aligned rectangles (broad phase).
//!
//! Purpose
//! - Store `(payload, bounds)` pairs and answer "which entries potentially
//!   overlap this region" without scanning everything.
//!
//! Usage model
//! - Rebuild once per tick (`QuadTree::new` + `insert_at` per entity), then
//!   query the frozen tree. Mutation is `&mut self`, so concurrent writers are
//!   ruled out by the borrow checker.
//! - Streamed queries run on a background thread against a shared snapshot of
//!   the nodes (`Arc`). An insert or remove issued while such a query still
//!   holds the snapshot copies the nodes on its root-to-leaf path first
//!   (`Arc::make_mut`); untouched subtrees stay shared. The query keeps seeing
//!   the tree as it was when it started. A query holds the snapshot until its
//!   producer finishes, which needs the consumer to drain or drop `Candidates`.
//!
//! Code cross-refs: `node` (routing, split, removal), `query` (traversal,
//! `Candidates`), `algebra::Rectangle::clips`.

mod cfg;
mod error;
mod node;
mod query;

use std::collections::VecDeque;
use std::ops::ControlFlow;
use std::sync::Arc;

use tracing::debug;

pub use cfg::TreeCfg;
pub use error::SpatialError;
pub use node::QuadKey;
pub use query::Candidates;

use crate::algebra::{Rectangle, Vector2};
use node::QuadNode;

#[derive(Debug)]
pub struct QuadTree<P> {
    root: Arc<QuadNode<P>>,
    cfg: TreeCfg,
    len: usize,
}

impl<P> QuadTree<P> {
    /// Empty tree over `[0, width] × [0, height]` with default tuning.
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_cfg(width, height, TreeCfg::default())
    }

    pub fn with_cfg(width: f64, height: f64, cfg: TreeCfg) -> Self {
        let bounds = Rectangle::from_min_max(Vector2::zeros(), Vector2::new(width, height));
        Self {
            root: Arc::new(QuadNode::new(bounds, &cfg)),
            cfg,
            len: 0,
        }
    }

    #[inline]
    pub fn cfg(&self) -> &TreeCfg {
        &self.cfg
    }

    /// Bounds of the root node.
    #[inline]
    pub fn bounds(&self) -> Rectangle {
        self.root.bounds
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index `payload` under `bounds` and return the key handle.
    ///
    /// # Panics
    /// If `bounds` is not finite or lies entirely outside the tree bounds. Such a
    /// key could not be routed to any quadrant; the check runs before the tree
    /// is touched.
    pub fn insert_at(&mut self, payload: P, bounds: Rectangle) -> Arc<QuadKey<P>> {
        assert!(
            bounds.is_finite() && self.root.bounds.clips(&bounds),
            "key bounds {bounds:?} do not overlap tree bounds {:?}",
            self.root.bounds
        );
        let key = Arc::new(QuadKey { payload, bounds });
        Arc::make_mut(&mut self.root).insert(Arc::clone(&key), &self.cfg);
        self.len += 1;
        key
    }

    /// Remove a key previously returned by `insert_at` (matched by handle).
    pub fn remove(&mut self, key: &Arc<QuadKey<P>>) -> Result<(), SpatialError> {
        if !Arc::make_mut(&mut self.root).remove(key) {
            debug!(bounds = ?key.bounds, "remove: key not in tree");
            return Err(SpatialError::KeyNotFound);
        }
        self.len -= 1;
        Ok(())
    }

    /// Push every key overlapping `bounds` into `out`, on the calling thread.
    pub fn collect_clipping_at(&self, bounds: &Rectangle, out: &mut Vec<Arc<QuadKey<P>>>) {
        let _ = query::visit_clipping(&*self.root, bounds, |k| {
            out.push(Arc::clone(k));
            ControlFlow::Continue(())
        });
    }

    /// Number of levels (a lone root is depth 1).
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn node_count(&self) -> usize {
        self.node_bounds().len()
    }

    /// Bounds of every node, breadth-first from the root.
    pub fn node_bounds(&self) -> Vec<Rectangle> {
        let mut out = Vec::new();
        self.walk(|n| out.push(n.bounds));
        out
    }

    /// All stored keys, breadth-first by node.
    pub fn keys(&self) -> Vec<Arc<QuadKey<P>>> {
        let mut out = Vec::with_capacity(self.len);
        self.walk(|n| out.extend(n.keys.iter().cloned()));
        out
    }

    fn walk(&self, mut f: impl FnMut(&QuadNode<P>)) {
        let mut frontier: VecDeque<&QuadNode<P>> = VecDeque::from([&*self.root]);
        while let Some(n) = frontier.pop_front() {
            f(n);
            frontier.extend(n.children.iter().map(|c| &**c));
        }
    }
}

impl<P: Send + Sync + 'static> QuadTree<P> {
    /// Stream every key overlapping `bounds`.
    ///
    /// Each call starts a fresh traversal; the result is finite and unordered.
    pub fn clipping_candidates_at(&self, bounds: Rectangle) -> Candidates<P> {
        query::stream(Arc::clone(&self.root), bounds, self.cfg.result_capacity, |_| true)
    }

    /// Stream keys overlapping `key.bounds`, skipping `key` itself.
    ///
    /// Identity is the handle returned by `insert_at`: other entries with an
    /// equal payload are still reported.
    pub fn clipping_candidates(&self, key: &Arc<QuadKey<P>>) -> Candidates<P> {
        let me = Arc::clone(key);
        query::stream(
            Arc::clone(&self.root),
            key.bounds,
            self.cfg.result_capacity,
            move |k| !Arc::ptr_eq(k, &me),
        )
    }
}

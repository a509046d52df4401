//! Quadtree nodes: routing, insertion, subdivision and removal.
//!
//! Routing rule
//! - A key descends into a child only if it overlaps exactly one of the four
//!   quadrants. Overlapping several makes it ambiguous: it stays at the current
//!   node. Overlapping none is impossible for a key inside the parent (the
//!   quadrants partition it), so insertion treats that as a broken invariant.
//!
//! Subdivision
//! - A leaf at least `min_box_width` wide splits once it holds more than
//!   `split_threshold` keys. If no key would leave the parent the split is
//!   abandoned and the node stays a leaf; this stops a cluster of large or
//!   centred keys from recursing into ever smaller quadrants.

use std::sync::Arc;

use tracing::{debug, trace};

use super::cfg::TreeCfg;
use crate::algebra::Rectangle;

/// One indexed entry: a caller-side payload (typically an entity id) and its bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct QuadKey<P> {
    pub payload: P,
    pub bounds: Rectangle,
}

#[derive(Debug)]
pub(crate) struct QuadNode<P> {
    pub(crate) bounds: Rectangle,
    /// Leaf content, or the keys that were ambiguous at this level.
    pub(crate) keys: Vec<Arc<QuadKey<P>>>,
    /// Empty for a leaf, otherwise exactly `[ul, ur, dl, dr]`. Shared so that a
    /// write behind a live query copies only the nodes on its path.
    pub(crate) children: Vec<Arc<QuadNode<P>>>,
}

// Manual impl: a clone shares keys and children, so no `P: Clone` bound.
impl<P> Clone for QuadNode<P> {
    fn clone(&self) -> Self {
        Self {
            bounds: self.bounds,
            keys: self.keys.clone(),
            children: self.children.clone(),
        }
    }
}

/// Outcome of matching a key against four quadrants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Route {
    Single(usize),
    Ambiguous,
    Outside,
}

pub(crate) fn route<'a>(quadrants: impl IntoIterator<Item = &'a Rectangle>, bounds: &Rectangle) -> Route {
    let mut hit = None;
    for (i, q) in quadrants.into_iter().enumerate() {
        if q.clips(bounds) {
            if hit.is_some() {
                return Route::Ambiguous;
            }
            hit = Some(i);
        }
    }
    hit.map_or(Route::Outside, Route::Single)
}

#[track_caller]
fn outside(parent: &Rectangle, bounds: &Rectangle) -> ! {
    panic!("quadtree invariant violated: key {bounds:?} overlaps no quadrant of {parent:?}")
}

impl<P> QuadNode<P> {
    pub(crate) fn new(bounds: Rectangle, cfg: &TreeCfg) -> Self {
        Self {
            bounds,
            keys: Vec::with_capacity(cfg.split_threshold + 1),
            children: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[inline]
    fn is_empty_leaf(&self) -> bool {
        self.is_leaf() && self.keys.is_empty()
    }

    #[inline]
    fn route_children(&self, bounds: &Rectangle) -> Route {
        route(self.children.iter().map(|c| &c.bounds), bounds)
    }

    /// Walk down from `self` and store `key`; may split the receiving leaf.
    pub(crate) fn insert(&mut self, key: Arc<QuadKey<P>>, cfg: &TreeCfg) {
        let mut current = self;
        let mut depth = 0usize;
        while !current.is_leaf() {
            match current.route_children(&key.bounds) {
                Route::Single(i) => {
                    current = Arc::make_mut(&mut current.children[i]);
                    depth += 1;
                }
                Route::Ambiguous => {
                    current.keys.push(key);
                    return;
                }
                Route::Outside => outside(&current.bounds, &key.bounds),
            }
        }
        current.keys.push(key);
        let (width, _) = current.bounds.size();
        if width >= cfg.min_box_width && current.keys.len() > cfg.split_threshold {
            current.split(depth, cfg);
        }
    }

    /// Partition a leaf into four quadrants and push down every key that fits one.
    pub(crate) fn split(&mut self, depth: usize, cfg: &TreeCfg) {
        debug_assert!(self.is_leaf(), "only leaves split");
        let quadrants = self.bounds.quadrants();
        let routes: Vec<Route> = self
            .keys
            .iter()
            .map(|k| match route(&quadrants, &k.bounds) {
                Route::Outside => outside(&self.bounds, &k.bounds),
                r => r,
            })
            .collect();
        if routes.iter().all(|r| *r == Route::Ambiguous) {
            trace!(depth, keys = self.keys.len(), "split abandoned: no key separates");
            return;
        }

        let mut children: Vec<QuadNode<P>> = quadrants.iter().map(|q| QuadNode::new(*q, cfg)).collect();
        let mut retained = Vec::new();
        for (key, r) in self.keys.drain(..).zip(routes) {
            match r {
                Route::Single(i) => children[i].keys.push(key),
                _ => retained.push(key),
            }
        }
        debug!(
            depth,
            moved = children.iter().map(|c| c.keys.len()).sum::<usize>(),
            retained = retained.len(),
            "split node"
        );
        self.keys = retained;
        self.children = children.into_iter().map(Arc::new).collect();
    }

    /// Retrace the insertion route of `key` and drop it (handle identity).
    ///
    /// Four empty leaf children are folded back into their parent on the way up.
    pub(crate) fn remove(&mut self, key: &Arc<QuadKey<P>>) -> bool {
        if !self.is_leaf() {
            match self.route_children(&key.bounds) {
                Route::Single(i) => {
                    let removed = Arc::make_mut(&mut self.children[i]).remove(key);
                    if removed && self.children.iter().all(|c| c.is_empty_leaf()) {
                        self.children.clear();
                    }
                    return removed;
                }
                Route::Outside => return false,
                Route::Ambiguous => {}
            }
        }
        match self.keys.iter().position(|k| Arc::ptr_eq(k, key)) {
            Some(pos) => {
                self.keys.swap_remove(pos);
                true
            }
            None => false,
        }
    }

    pub(crate) fn depth(&self) -> usize {
        1 + self.children.iter().map(|c| c.depth()).max().unwrap_or(0)
    }
}

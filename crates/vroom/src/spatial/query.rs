//! Overlap queries: breadth-first traversal and the streaming producer.
//!
//! The frontier is an unbounded `VecDeque` owned by the traversal; only the
//! result channel is bounded. The producer thread exits when the frontier is
//! exhausted or as soon as the consumer drops its `Candidates`.

use std::collections::VecDeque;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{bounded, Receiver};
use tracing::trace;

use super::node::{QuadKey, QuadNode};
use crate::algebra::Rectangle;

/// Visit every stored key overlapping `bounds`; stops early on `Break`.
///
/// Children whose bounds miss the query are pruned. Ambiguous keys may sit at
/// any depth, and every node on the way is checked, so nothing overlapping is
/// skipped.
pub(crate) fn visit_clipping<P, F>(root: &QuadNode<P>, bounds: &Rectangle, mut f: F) -> ControlFlow<()>
where
    F: FnMut(&Arc<QuadKey<P>>) -> ControlFlow<()>,
{
    let mut frontier: VecDeque<&QuadNode<P>> = VecDeque::new();
    frontier.push_back(root);
    while let Some(node) = frontier.pop_front() {
        for key in node.keys.iter().filter(|k| k.bounds.clips(bounds)) {
            if f(key).is_break() {
                return ControlFlow::Break(());
            }
        }
        frontier.extend(node.children.iter().map(|c| &**c).filter(|c| c.bounds.clips(bounds)));
    }
    ControlFlow::Continue(())
}

/// Lazily streamed overlap candidates, in no particular order.
///
/// Backed by a background producer that walks a snapshot of the tree. Dropping
/// the iterator early stops the producer at its next send.
#[derive(Debug)]
pub struct Candidates<P> {
    rx: Receiver<Arc<QuadKey<P>>>,
}

impl<P> Iterator for Candidates<P> {
    type Item = Arc<QuadKey<P>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rx.recv().ok()
    }
}

/// Start a producer over `root`, forwarding overlapping keys that pass `keep`.
pub(crate) fn stream<P, F>(root: Arc<QuadNode<P>>, bounds: Rectangle, capacity: usize, keep: F) -> Candidates<P>
where
    P: Send + Sync + 'static,
    F: Fn(&Arc<QuadKey<P>>) -> bool + Send + 'static,
{
    let (tx, rx) = bounded(capacity);
    thread::spawn(move || {
        let mut sent = 0usize;
        let flow = visit_clipping(&*root, &bounds, |key| {
            if !keep(key) {
                return ControlFlow::Continue(());
            }
            match tx.send(Arc::clone(key)) {
                Ok(()) => {
                    sent += 1;
                    ControlFlow::Continue(())
                }
                Err(_) => ControlFlow::Break(()),
            }
        });
        trace!(sent, consumer_dropped = flow.is_break(), "query producer finished");
    });
    Candidates { rx }
}

//! Build a tree over a random scene and print the overlapping pairs.
//!
//! Run: cargo run -p vroom --example broad_phase -- [count] [seed]

use std::collections::BTreeSet;

use vroom::prelude::*;

fn main() {
    let mut args = std::env::args().skip(1);
    let count: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(60);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(7);

    let cfg = RectCfg {
        width: 400.0,
        height: 300.0,
        count,
        ..RectCfg::default()
    };
    let mut tree = QuadTree::new(cfg.width, cfg.height);
    let keys: Vec<_> = draw_rects(cfg, ReplayToken::new(seed, 0))
        .into_iter()
        .enumerate()
        .map(|(i, r)| tree.insert_at(i, r))
        .collect();

    let mut pairs = BTreeSet::new();
    for key in &keys {
        for other in tree.clipping_candidates(key) {
            let (a, b) = (key.payload.min(other.payload), key.payload.max(other.payload));
            pairs.insert((a, b));
        }
    }
    println!(
        "{} rects, {} nodes, depth {}, {} overlapping pairs",
        tree.len(),
        tree.node_count(),
        tree.depth(),
        pairs.len()
    );
    for (a, b) in pairs {
        println!("  {a} <-> {b}");
    }
}

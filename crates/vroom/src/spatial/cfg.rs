//! Tuning knobs for the quadtree.

/// Quadtree configuration.
///
/// Defaults: split a leaf once it holds more than two keys, stop splitting
/// below a width of five world units, and buffer up to a thousand streamed
/// query results.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeCfg {
    /// A leaf splits when its key count exceeds this.
    pub split_threshold: usize,
    /// Leaves narrower than this never split.
    pub min_box_width: f64,
    /// Capacity of the result channel of a streamed query.
    pub result_capacity: usize,
}

impl Default for TreeCfg {
    fn default() -> Self {
        Self {
            split_threshold: 2,
            min_box_width: 5.0,
            result_capacity: 1000,
        }
    }
}

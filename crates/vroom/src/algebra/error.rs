//! Errors for geometric computations without an answer.

use thiserror::Error;

/// The result is not defined.
///
/// Signals "no geometric answer", never a fault: callers are expected to match
/// on the kind and carry on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UndefinedError {
    #[error("the result is not defined: first segment is a point")]
    FirstDegenerate,
    #[error("the result is not defined: second segment is a point")]
    SecondDegenerate,
    #[error("the result is not defined: lines are parallel")]
    Parallel,
    #[error("the result is not defined: no intersection within the first segment")]
    OutsideFirst,
    #[error("the result is not defined: no intersection within the second segment")]
    OutsideSecond,
}

impl UndefinedError {
    /// True for the two degenerate-segment kinds.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::FirstDegenerate | Self::SecondDegenerate)
    }
}

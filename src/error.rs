/// Errors returned by [`HyperLogLog`](crate::HyperLogLog) construction and merging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SketchError {
    /// Fewer registers were requested than the sketch supports.
    #[error("number of registers must be at least {min}, got {got}")]
    InvalidRegisterCount { got: usize, min: usize },
    /// The two sketches passed to a merge have different register counts.
    #[error("cannot merge sketches with {lhs} and {rhs} registers")]
    MergeMismatch { lhs: usize, rhs: usize },
}

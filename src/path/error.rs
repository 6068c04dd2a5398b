use thiserror::Error;

use super::AnchorId;

/// Errors raised by [`BezierCurve`](super::BezierCurve) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathError {
    /// The operation needs at least one anchor (or, for baking, one edge).
    #[error("path has no anchors to evaluate")]
    EmptyPath,
    /// No anchor with this id belongs to the curve.
    #[error("anchor {0} not found in path")]
    AnchorNotFound(AnchorId),
    /// Index past the end of the anchor list.
    #[error("anchor index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },
}

use thiserror::Error;

/// Errors detected before any clipping begins.
///
/// There is deliberately no geometric error: self-intersecting polygons are
/// a documented caller precondition, and degenerate geometry degrades to
/// empty output rather than failing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipError {
    #[error("polygon {index} has {count} vertices, at least 3 are required")]
    TooFewVertices { index: usize, count: usize },
}

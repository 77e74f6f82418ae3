//! # GridClip Driver
//!
//! Batch-shape driver layer over [`gridclip_core`]: accepts polygon batches
//! as either uniform flat coordinate buffers (every polygon has the same
//! vertex count, no per-polygon allocation) or ragged per-polygon vertex
//! lists, validates the shapes before any clipping, and converts the
//! kernel's boundary index into `std::ops::Range` slices.

use std::ops::Range;

use thiserror::Error;

use gridclip_core::{clip_multi as core_clip_multi, clip_single as core_clip_single};
use gridclip_core::{ClipError, Grid, LoopBuffer, Polygon};

/// A batch of polygons in one of the two supported layouts.
///
/// `Uniform` holds every polygon's vertices back to back in flat x/y
/// buffers with a fixed stride; `Ragged` allows a different vertex count
/// per polygon.
#[derive(Debug, Clone)]
pub enum VertexBatch<'a> {
    Uniform {
        x: &'a [f64],
        y: &'a [f64],
        vertices_per_polygon: usize,
    },
    Ragged {
        x: &'a [Vec<f64>],
        y: &'a [Vec<f64>],
    },
}

impl VertexBatch<'_> {
    /// Validate the batch shape and materialize the polygons.
    fn polygons(&self) -> Result<Vec<Polygon>, DriverError> {
        match *self {
            VertexBatch::Uniform {
                x,
                y,
                vertices_per_polygon,
            } => {
                if x.len() != y.len() {
                    return Err(DriverError::CoordinateLengthMismatch {
                        x_len: x.len(),
                        y_len: y.len(),
                    });
                }
                if vertices_per_polygon == 0 || x.len() % vertices_per_polygon != 0 {
                    return Err(DriverError::BadStride {
                        len: x.len(),
                        stride: vertices_per_polygon,
                    });
                }
                Ok(x.chunks(vertices_per_polygon)
                    .zip(y.chunks(vertices_per_polygon))
                    .map(|(px, py)| Polygon::from_xy(px, py))
                    .collect())
            }
            VertexBatch::Ragged { x, y } => {
                if x.len() != y.len() {
                    return Err(DriverError::PolygonCountMismatch {
                        x_count: x.len(),
                        y_count: y.len(),
                    });
                }
                for (index, (px, py)) in x.iter().zip(y.iter()).enumerate() {
                    if px.len() != py.len() {
                        return Err(DriverError::VertexCountMismatch {
                            index,
                            x_len: px.len(),
                            y_len: py.len(),
                        });
                    }
                }
                Ok(x.iter()
                    .zip(y.iter())
                    .map(|(px, py)| Polygon::from_xy(px, py))
                    .collect())
            }
        }
    }

    fn polygon_count(&self) -> usize {
        match *self {
            VertexBatch::Uniform {
                x,
                vertices_per_polygon,
                ..
            } => {
                if vertices_per_polygon == 0 {
                    0
                } else {
                    x.len() / vertices_per_polygon
                }
            }
            VertexBatch::Ragged { x, .. } => x.len(),
        }
    }
}

/// Batch results: pixel coordinates, overlap areas, and per-polygon slices
/// into the concatenated buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct ClippedPixels {
    pub xc: Vec<u32>,
    pub yc: Vec<u32>,
    pub areas: Vec<f64>,
    pub slices: Vec<Range<usize>>,
}

/// Single-polygon results; `slices` holds one whole-output range so the
/// shape matches [`clip_multi`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClippedSingle {
    pub xc: Vec<u32>,
    pub yc: Vec<u32>,
    pub areas: Vec<f64>,
    pub slices: Vec<Range<usize>>,
    /// Clipped vertex loops, present when requested.
    pub loops: Option<LoopBuffer>,
}

/// Shape errors detected before any clipping, plus pass-through kernel
/// errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DriverError {
    #[error("x and y hold different polygon counts: {x_count} vs {y_count}")]
    PolygonCountMismatch { x_count: usize, y_count: usize },

    #[error("polygon {index}: x has {x_len} vertices but y has {y_len}")]
    VertexCountMismatch {
        index: usize,
        x_len: usize,
        y_len: usize,
    },

    #[error("coordinate buffers have different lengths: {x_len} vs {y_len}")]
    CoordinateLengthMismatch { x_len: usize, y_len: usize },

    #[error("buffer of {len} coordinates is not a whole number of {stride}-vertex polygons")]
    BadStride { len: usize, stride: usize },

    #[error(transparent)]
    Clip(#[from] ClipError),
}

/// Clip a batch of polygons against the grid.
pub fn clip_multi(batch: &VertexBatch<'_>, grid: &Grid) -> Result<ClippedPixels, DriverError> {
    let polygons = batch.polygons()?;
    log::debug!(
        "dispatching {} {} polygons to the clipping kernel",
        batch.polygon_count(),
        match batch {
            VertexBatch::Uniform { .. } => "uniform",
            VertexBatch::Ragged { .. } => "ragged",
        }
    );
    let table = core_clip_multi(&polygons, grid)?;
    let slices = (0..polygons.len()).map(|i| table.range(i)).collect();
    Ok(ClippedPixels {
        xc: table.pixel_x,
        yc: table.pixel_y,
        areas: table.area,
        slices,
    })
}

/// Clip a single polygon given as parallel x/y coordinate slices.
pub fn clip_single(
    x: &[f64],
    y: &[f64],
    grid: &Grid,
    want_loops: bool,
) -> Result<ClippedSingle, DriverError> {
    if x.len() != y.len() {
        return Err(DriverError::CoordinateLengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    let coverage = core_clip_single(&Polygon::from_xy(x, y), grid, want_loops)?;
    let emitted = coverage.len();
    Ok(ClippedSingle {
        xc: coverage.pixel_x,
        yc: coverage.pixel_y,
        areas: coverage.area,
        slices: vec![0..emitted],
        loops: coverage.loops,
    })
}

//! # GridClip Core
//!
//! Exact clipping of simple polygons against a regular grid of unit-square
//! pixels: which pixels each polygon overlaps, the precise overlap area per
//! pixel, and optionally the clipped vertex loop occupying each pixel.
//! This is the kernel behind flux-conserving ("drizzle") resampling between
//! irregular source geometry and a regular raster.
//!
//! Polygons must be simple (non-self-intersecting); the result for a
//! self-intersecting polygon is unspecified. Orientation is unconstrained.

pub mod batch;
pub mod clip;
pub mod error;
pub mod geometry;
pub mod raster;

pub use batch::{clip_multi, clip_single, CoverageTable};
pub use error::ClipError;
pub use geometry::{shoelace_area, BBox, Grid, Point, Polygon};
pub use raster::{LoopBuffer, PixelCoverage, AREA_EPSILON};

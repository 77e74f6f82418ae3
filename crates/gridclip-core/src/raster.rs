//! Rasterization of one polygon: enumerate candidate pixels from the
//! clamped bounding box, clip against each, and accumulate the per-pixel
//! overlap areas (and, on request, the clipped loops).

use serde::{Deserialize, Serialize};

use crate::clip::{clip_to_pixel, ClipScratch};
use crate::geometry::{shoelace_area, Grid, Point, Polygon};

/// Clipped loops smaller than this are round-off slivers and are dropped.
pub const AREA_EPSILON: f64 = 1e-12;

/// Per-pixel overlap of one polygon with the grid.
///
/// Parallel buffers: entry k says pixel (pixel_x[k], pixel_y[k]) overlaps
/// the polygon with `area[k]` in (0, 1]. Entries follow a fixed scan order
/// over the polygon's clamped bounding box (x ascending, then y ascending
/// within a column).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixelCoverage {
    pub pixel_x: Vec<u32>,
    pub pixel_y: Vec<u32>,
    pub area: Vec<f64>,
    /// Clipped vertex loops, present only when requested.
    pub loops: Option<LoopBuffer>,
}

impl PixelCoverage {
    pub(crate) fn new(want_loops: bool) -> Self {
        Self {
            pixel_x: Vec::new(),
            pixel_y: Vec::new(),
            area: Vec::new(),
            loops: want_loops.then(LoopBuffer::new),
        }
    }

    /// Number of emitted pixels.
    pub fn len(&self) -> usize {
        self.area.len()
    }

    pub fn is_empty(&self) -> bool {
        self.area.is_empty()
    }
}

/// Flattened clipped-loop vertices with a run-length index.
///
/// Loop k occupies `index[k]..index[k+1]` of the `x`/`y` buffers;
/// `index[0] == 0` and `index.len()` is the emitted-pixel count plus one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopBuffer {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub index: Vec<usize>,
}

impl LoopBuffer {
    pub fn new() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            index: vec![0],
        }
    }

    pub fn loop_count(&self) -> usize {
        // The index always carries a leading 0; saturate so a buffer
        // deserialized with an empty index reads as zero loops instead of
        // underflowing.
        self.index.len().saturating_sub(1)
    }

    /// Range of loop k in the flattened vertex buffers.
    pub fn loop_range(&self, k: usize) -> std::ops::Range<usize> {
        self.index[k]..self.index[k + 1]
    }

    /// Vertices of loop k, reassembled as points.
    pub fn loop_points(&self, k: usize) -> Vec<Point> {
        self.loop_range(k)
            .map(|i| Point::new(self.x[i], self.y[i]))
            .collect()
    }

    fn push_loop(&mut self, points: &[Point]) {
        for p in points {
            self.x.push(p.x);
            self.y.push(p.y);
        }
        self.index.push(self.x.len());
    }
}

impl Default for LoopBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Rasterize one polygon, appending to `out`.
///
/// Area outside the grid is silently discarded; a polygon that clamps to an
/// empty bounding box appends nothing. Zero-area intersections (shared
/// edges, collinear input) are never emitted.
pub(crate) fn rasterize_into(
    polygon: &Polygon,
    grid: &Grid,
    scratch: &mut ClipScratch,
    out: &mut PixelCoverage,
) {
    if grid.is_empty() {
        return;
    }
    let bbox = match polygon.bbox() {
        Some(bbox) => bbox,
        None => return,
    };
    let ix0 = clamp_cell(bbox.min.x.floor(), grid.width);
    let ix1 = clamp_cell(bbox.max.x.ceil(), grid.width);
    let iy0 = clamp_cell(bbox.min.y.floor(), grid.height);
    let iy1 = clamp_cell(bbox.max.y.ceil(), grid.height);

    for ix in ix0..ix1 {
        for iy in iy0..iy1 {
            let clipped = clip_to_pixel(&polygon.vertices, ix, iy, scratch);
            // A unit pixel bounds the overlap at 1; min() absorbs round-off.
            let area = shoelace_area(clipped).min(1.0);
            if area > AREA_EPSILON {
                out.pixel_x.push(ix);
                out.pixel_y.push(iy);
                out.area.push(area);
                if let Some(loops) = &mut out.loops {
                    loops.push_loop(clipped);
                }
            }
        }
    }
}

fn clamp_cell(v: f64, extent: u32) -> u32 {
    v.max(0.0).min(extent as f64) as u32
}

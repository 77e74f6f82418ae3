//! Entry points: clip one polygon or an ordered batch of polygons sharing
//! one grid. Batch results are a single concatenated stream plus a
//! per-polygon boundary index, accumulated strictly sequentially so the
//! output order is reproducible bit for bit.

use serde::{Deserialize, Serialize};

use crate::clip::ClipScratch;
use crate::error::ClipError;
use crate::geometry::{Grid, Polygon};
use crate::raster::{rasterize_into, PixelCoverage};

/// Concatenated per-pixel results for a batch of polygons.
///
/// Polygon i's pixels occupy `boundaries[i].0 .. boundaries[i].1` of the
/// parallel buffers; ranges are contiguous (`end_i == start_{i+1}`,
/// `start_0 == 0`) and zero-width for polygons that emit nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageTable {
    pub pixel_x: Vec<u32>,
    pub pixel_y: Vec<u32>,
    pub area: Vec<f64>,
    pub boundaries: Vec<(usize, usize)>,
}

impl CoverageTable {
    /// Total number of emitted pixels across the batch.
    pub fn len(&self) -> usize {
        self.area.len()
    }

    pub fn is_empty(&self) -> bool {
        self.area.is_empty()
    }

    /// Range of polygon i's pixels in the concatenated buffers.
    pub fn range(&self, i: usize) -> std::ops::Range<usize> {
        self.boundaries[i].0..self.boundaries[i].1
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Clip one polygon against the grid.
///
/// With `want_loops` the result also carries the clipped vertex loop of
/// every emitted pixel in a flattened, run-length-indexed buffer.
pub fn clip_single(
    polygon: &Polygon,
    grid: &Grid,
    want_loops: bool,
) -> Result<PixelCoverage, ClipError> {
    check_polygon(0, polygon)?;
    let mut scratch = ClipScratch::new();
    let mut out = PixelCoverage::new(want_loops);
    rasterize_into(polygon, grid, &mut scratch, &mut out);
    log::debug!(
        "clipped 1 polygon against {}x{} grid: {} pixels",
        grid.width,
        grid.height,
        out.len()
    );
    Ok(out)
}

/// Clip an ordered batch of polygons against one shared grid.
///
/// The whole batch is validated before any clipping, so a shape error never
/// leaves partial output. Concatenation order equals input order; within a
/// polygon the order matches [`clip_single`].
pub fn clip_multi(polygons: &[Polygon], grid: &Grid) -> Result<CoverageTable, ClipError> {
    for (i, polygon) in polygons.iter().enumerate() {
        check_polygon(i, polygon)?;
    }

    let mut scratch = ClipScratch::new();
    let mut out = PixelCoverage::new(false);
    let mut boundaries = Vec::with_capacity(polygons.len());
    for polygon in polygons {
        let start = out.len();
        rasterize_into(polygon, grid, &mut scratch, &mut out);
        boundaries.push((start, out.len()));
    }
    log::debug!(
        "clipped {} polygons against {}x{} grid: {} pixels",
        polygons.len(),
        grid.width,
        grid.height,
        out.len()
    );
    Ok(CoverageTable {
        pixel_x: out.pixel_x,
        pixel_y: out.pixel_y,
        area: out.area,
        boundaries,
    })
}

fn check_polygon(index: usize, polygon: &Polygon) -> Result<(), ClipError> {
    let count = polygon.vertex_count();
    if count < 3 {
        return Err(ClipError::TooFewVertices { index, count });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_batch() -> Vec<Polygon> {
        // Six quadrilaterals on a 100x100 grid; the fourth degenerates to a
        // diagonal line and must emit nothing.
        let px: [[f64; 4]; 6] = [
            [3.4, 3.4, 4.4, 4.4],
            [3.5, 3.5, 4.3, 4.3],
            [3.1, 3.1, 3.9, 3.9],
            [8.0, 8.0, 9.0, 9.0],
            [5.8, 6.2, 6.3, 5.6],
            [5.8, 5.8, 7.2, 7.2],
        ];
        let py: [[f64; 4]; 6] = [
            [1.4, 1.9, 1.9, 1.4],
            [3.7, 4.4, 4.4, 3.7],
            [2.1, 2.9, 2.9, 2.1],
            [8.0, 8.0, 9.0, 9.0],
            [1.5, 1.8, 2.4, 1.9],
            [3.8, 5.2, 5.2, 3.8],
        ];
        px.iter()
            .zip(py.iter())
            .map(|(x, y)| Polygon::from_xy(x, y))
            .collect()
    }

    #[test]
    fn test_quadrilateral_batch() {
        let polygons = quad_batch();
        let table = clip_multi(&polygons, &Grid::new(100, 100)).unwrap();

        let expected_x: Vec<u32> =
            vec![3, 4, 3, 3, 4, 4, 3, 5, 5, 6, 6, 5, 5, 5, 6, 6, 6, 7, 7, 7];
        let expected_y: Vec<u32> =
            vec![1, 1, 3, 4, 3, 4, 2, 1, 2, 1, 2, 3, 4, 5, 3, 4, 5, 3, 4, 5];
        let expected_area = [
            0.3, 0.2, 0.15, 0.2, 0.09, 0.12, 0.64, 0.138, 0.02414287, 0.0583333, 0.07452378,
            0.04, 0.2, 0.04, 0.2, 1.0, 0.2, 0.04, 0.2, 0.04,
        ];
        assert_eq!(table.pixel_x, expected_x);
        assert_eq!(table.pixel_y, expected_y);
        for (got, want) in table.area.iter().zip(expected_area.iter()) {
            assert!((got - want).abs() < 1e-5, "area {got} != {want}");
        }
        assert_eq!(
            table.boundaries,
            vec![(0, 2), (2, 6), (6, 7), (7, 7), (7, 11), (11, 20)]
        );

        // Per-polygon totals match the shoelace areas.
        for (i, polygon) in polygons.iter().enumerate() {
            let total: f64 = table.area[table.range(i)].iter().sum();
            assert!((total - polygon.area()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_boundary_index_contiguity() {
        let table = clip_multi(&quad_batch(), &Grid::new(100, 100)).unwrap();
        assert_eq!(table.boundaries[0].0, 0);
        for w in table.boundaries.windows(2) {
            assert_eq!(w[0].1, w[1].0);
        }
        assert_eq!(table.boundaries.last().unwrap().1, table.len());
        // The degenerate member owns a zero-width range; its siblings do not.
        assert_eq!(table.boundaries[3].0, table.boundaries[3].1);
        for (i, (start, end)) in table.boundaries.iter().enumerate() {
            if i != 3 {
                assert!(end > start);
            }
        }
    }

    #[test]
    fn test_empty_batch_and_empty_grid() {
        let table = clip_multi(&[], &Grid::new(10, 10)).unwrap();
        assert!(table.is_empty());
        assert!(table.boundaries.is_empty());

        let tri = Polygon::from_xy(&[0.2, 0.8, 0.5], &[0.2, 0.2, 0.8]);
        let table = clip_multi(&[tri], &Grid::new(0, 0)).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.boundaries, vec![(0, 0)]);
    }

    #[test]
    fn test_too_few_vertices_rejected() {
        let good = Polygon::from_xy(&[0.2, 0.8, 0.5], &[0.2, 0.2, 0.8]);
        let bad = Polygon::from_xy(&[1.0, 2.0], &[1.0, 2.0]);
        let err = clip_multi(&[good, bad], &Grid::new(10, 10)).unwrap_err();
        assert_eq!(err, ClipError::TooFewVertices { index: 1, count: 2 });

        let bad = Polygon::new(Vec::new());
        let err = clip_single(&bad, &Grid::new(10, 10), false).unwrap_err();
        assert_eq!(err, ClipError::TooFewVertices { index: 0, count: 0 });
    }

    #[test]
    fn test_single_matches_multi() {
        let polygons = quad_batch();
        let table = clip_multi(&polygons, &Grid::new(100, 100)).unwrap();
        for (i, polygon) in polygons.iter().enumerate() {
            let cov = clip_single(polygon, &Grid::new(100, 100), false).unwrap();
            let range = table.range(i);
            assert_eq!(cov.pixel_x.as_slice(), &table.pixel_x[range.clone()]);
            assert_eq!(cov.pixel_y.as_slice(), &table.pixel_y[range.clone()]);
            assert_eq!(cov.area.as_slice(), &table.area[range]);
        }
    }

    #[test]
    fn test_table_json_round_trip() {
        let table = clip_multi(&quad_batch(), &Grid::new(100, 100)).unwrap();
        let json = table.to_json().unwrap();
        let back = CoverageTable::from_json(&json).unwrap();
        assert_eq!(back, table);
        // Areas must survive bit for bit, including values whose shortest
        // decimal form parses back one ulp off without exact float parsing.
        for (got, want) in back.area.iter().zip(table.area.iter()) {
            assert_eq!(got.to_bits(), want.to_bits());
        }
    }
}

use serde::{Deserialize, Serialize};

/// A 2D point in grid coordinates (pixel units).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl BBox {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: &[Point]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self {
            min: Point::new(min_x, min_y),
            max: Point::new(max_x, max_y),
        })
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// A simple polygon given as an ordered vertex loop, implicitly closed.
///
/// Simplicity (no self-intersection) is a caller precondition; it is not
/// validated here and the clipping result is unspecified if violated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Build a polygon from parallel x/y coordinate slices.
    ///
    /// Truncates to the shorter slice; length checking belongs to the
    /// caller-facing entry points.
    pub fn from_xy(x: &[f64], y: &[f64]) -> Self {
        Self {
            vertices: x
                .iter()
                .zip(y.iter())
                .map(|(&x, &y)| Point::new(x, y))
                .collect(),
        }
    }

    pub fn bbox(&self) -> Option<BBox> {
        BBox::from_points(&self.vertices)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Unsigned area via the shoelace formula.
    pub fn area(&self) -> f64 {
        shoelace_area(&self.vertices)
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            vertices: self.vertices.iter().map(|p| p.translate(dx, dy)).collect(),
        }
    }
}

/// The pixel grid: pixel (i, j) covers the unit square [i, i+1) x [j, j+1)
/// for 0 <= i < width, 0 <= j < height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: u32,
    pub height: u32,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A grid with zero extent in either axis holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Unsigned area of a closed vertex loop: half the absolute sum of cross
/// products of consecutive vertices. Zero for fewer than 3 vertices.
pub fn shoelace_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    0.5 * sum.abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_translate() {
        let p = Point::new(1.5, -2.0).translate(0.5, 2.0);
        assert!((p.x - 2.0).abs() < 1e-10);
        assert!((p.y - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_bbox_from_points() {
        let pts = vec![
            Point::new(3.4, 1.9),
            Point::new(4.4, 1.4),
            Point::new(3.9, 1.6),
        ];
        let bb = BBox::from_points(&pts).unwrap();
        assert!((bb.min.x - 3.4).abs() < 1e-10);
        assert!((bb.max.x - 4.4).abs() < 1e-10);
        assert!((bb.min.y - 1.4).abs() < 1e-10);
        assert!((bb.max.y - 1.9).abs() < 1e-10);
        assert!(BBox::from_points(&[]).is_none());
    }

    #[test]
    fn test_bbox_dimensions() {
        let bb = BBox::new(Point::new(3.4, 1.4), Point::new(4.4, 1.9));
        assert!((bb.width() - 1.0).abs() < 1e-10);
        assert!((bb.height() - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_shoelace_unit_square() {
        let square = Polygon::from_xy(&[0.0, 1.0, 1.0, 0.0], &[0.0, 0.0, 1.0, 1.0]);
        assert!((square.area() - 1.0).abs() < 1e-12);
        // Orientation does not matter.
        let reversed = Polygon::from_xy(&[0.0, 0.0, 1.0, 1.0], &[0.0, 1.0, 1.0, 0.0]);
        assert!((reversed.area() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_shoelace_quadrilateral() {
        // 1.0 wide, 0.5 tall.
        let quad = Polygon::from_xy(&[3.4, 3.4, 4.4, 4.4], &[1.4, 1.9, 1.9, 1.4]);
        assert!((quad.area() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_collinear_loop_zero_area() {
        let degenerate = Polygon::from_xy(&[8.0, 8.0, 9.0, 9.0], &[8.0, 8.0, 9.0, 9.0]);
        assert!(degenerate.area().abs() < 1e-12);
        assert!(shoelace_area(&degenerate.vertices[..2]).abs() < 1e-12);
    }

    #[test]
    fn test_grid_empty() {
        assert!(Grid::new(0, 100).is_empty());
        assert!(Grid::new(100, 0).is_empty());
        assert!(!Grid::new(1, 1).is_empty());
    }
}

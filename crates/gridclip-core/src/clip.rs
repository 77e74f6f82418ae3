//! Sutherland-Hodgman clipping of a vertex loop against one unit pixel.
//!
//! The pixel is the intersection of four closed half-planes (x >= i,
//! x <= i+1, y >= j, y <= j+1), applied in sequence. Because the clip
//! region is convex the result is the exact intersection for any simple
//! subject loop, convex or not. Vertices lying exactly on a pixel boundary
//! are treated as inside on all four planes, so adjacent pixels apply the
//! same tie-break and shared edges contribute zero area rather than being
//! counted twice.

use crate::geometry::Point;

#[derive(Debug, Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// Reusable double buffer for the four clipping passes.
///
/// Each pass reads one buffer and writes the other; the buffers grow on
/// demand (a pass adds at most one vertex per input edge) and keep their
/// capacity across pixels.
#[derive(Debug, Default)]
pub struct ClipScratch {
    front: Vec<Point>,
    back: Vec<Point>,
}

impl ClipScratch {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Clip `vertices` against pixel (ix, iy), returning the clipped loop.
///
/// The returned slice borrows from `scratch` and is valid until the next
/// call. Empty if the loop and the pixel are disjoint; equal to the input
/// if the loop is contained in the pixel.
pub fn clip_to_pixel<'a>(
    vertices: &[Point],
    ix: u32,
    iy: u32,
    scratch: &'a mut ClipScratch,
) -> &'a [Point] {
    let x0 = ix as f64;
    let y0 = iy as f64;
    let planes = [
        (Axis::X, x0, true),
        (Axis::X, x0 + 1.0, false),
        (Axis::Y, y0, true),
        (Axis::Y, y0 + 1.0, false),
    ];

    clip_half_plane(vertices, &mut scratch.front, planes[0]);
    for &plane in &planes[1..] {
        if scratch.front.is_empty() {
            break;
        }
        std::mem::swap(&mut scratch.front, &mut scratch.back);
        clip_half_plane(&scratch.back, &mut scratch.front, plane);
    }
    &scratch.front
}

fn clip_half_plane(input: &[Point], output: &mut Vec<Point>, plane: (Axis, f64, bool)) {
    let (axis, bound, keep_ge) = plane;
    output.clear();
    for i in 0..input.len() {
        let cur = input[i];
        let next = input[(i + 1) % input.len()];
        let cur_in = inside(cur, axis, bound, keep_ge);
        let next_in = inside(next, axis, bound, keep_ge);
        if cur_in {
            output.push(cur);
        }
        if cur_in != next_in {
            output.push(intersect(cur, next, axis, bound));
        }
    }
}

fn coord(p: Point, axis: Axis) -> f64 {
    match axis {
        Axis::X => p.x,
        Axis::Y => p.y,
    }
}

fn inside(p: Point, axis: Axis, bound: f64, keep_ge: bool) -> bool {
    if keep_ge {
        coord(p, axis) >= bound
    } else {
        coord(p, axis) <= bound
    }
}

/// Where the edge a->b crosses the boundary. Only called when a and b lie
/// on opposite sides, so the denominator is nonzero. The clipped coordinate
/// is set to the bound exactly.
fn intersect(a: Point, b: Point, axis: Axis, bound: f64) -> Point {
    let t = (bound - coord(a, axis)) / (coord(b, axis) - coord(a, axis));
    match axis {
        Axis::X => Point::new(bound, a.y + t * (b.y - a.y)),
        Axis::Y => Point::new(a.x + t * (b.x - a.x), bound),
    }
}

//! Flat-top hex grid math: axial/cube/pixel conversions, rounding, distance,
//! neighbor/range/ring enumeration, and polygon geometry.
//!
//! Every function here is pure and total. Sizes are hex radii (center to
//! vertex); a size of zero or less is a caller error and is not checked.
//!
//! Axial `(q, r)` is the storage coordinate. Cube `(q, r, s)` with
//! `q + r + s == 0` only appears inside distance and rounding math.

#[cfg(test)]
#[path = "hex_test.rs"]
mod hex_test;

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::consts::{MAX_HEX_RADIUS, SQRT_3};

/// Integer axial hex address. Arithmetic saturates at the `i32` bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Axial {
    pub q: i32,
    pub r: i32,
}

impl Axial {
    /// The origin cell.
    pub const ORIGIN: Self = Self { q: 0, r: 0 };

    #[must_use]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }
}

impl Add for Axial {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.q.saturating_add(rhs.q), self.r.saturating_add(rhs.r))
    }
}

impl Sub for Axial {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.q.saturating_sub(rhs.q), self.r.saturating_sub(rhs.r))
    }
}

impl Mul<i32> for Axial {
    type Output = Self;

    fn mul(self, k: i32) -> Self {
        Self::new(self.q.saturating_mul(k), self.r.saturating_mul(k))
    }
}

/// Cube hex address. Derived from [`Axial`]; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cube {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

/// Unrounded axial position, as produced by the pixel → hex inverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractionalAxial {
    pub q: f64,
    pub r: f64,
}

impl FractionalAxial {
    #[must_use]
    pub fn new(q: f64, r: f64) -> Self {
        Self { q, r }
    }
}

/// The six axial direction vectors, in ring-walk order.
pub const HEX_DIRECTIONS: [Axial; 6] = [
    Axial::new(1, 0),
    Axial::new(1, -1),
    Axial::new(0, -1),
    Axial::new(-1, 0),
    Axial::new(-1, 1),
    Axial::new(0, 1),
];

/// One step of a polygon outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    Close,
}

#[must_use]
pub fn axial_to_cube(a: Axial) -> Cube {
    Cube { q: a.q, r: a.r, s: -a.q - a.r }
}

#[must_use]
pub fn cube_to_axial(c: Cube) -> Axial {
    Axial::new(c.q, c.r)
}

/// Center of `a` in pixel space for a flat-top layout of radius `size`.
#[must_use]
pub fn axial_to_pixel(a: Axial, size: f64) -> Point {
    let q = f64::from(a.q);
    let r = f64::from(a.r);
    Point {
        x: size * (SQRT_3 * q + SQRT_3 / 2.0 * r),
        y: size * (1.5 * r),
    }
}

/// Raw inverse of [`axial_to_pixel`]. The result generally lies between cells.
#[must_use]
pub fn pixel_to_fractional(p: Point, size: f64) -> FractionalAxial {
    FractionalAxial {
        q: (SQRT_3 / 3.0 * p.x - p.y / 3.0) / size,
        r: (2.0 / 3.0 * p.y) / size,
    }
}

/// Cell containing pixel `p`.
#[must_use]
pub fn pixel_to_axial(p: Point, size: f64) -> Axial {
    hex_round(pixel_to_fractional(p, size))
}

/// Round a fractional axial position to the nearest valid cell.
///
/// Each cube component is rounded on its own, then whichever component moved
/// the most is recomputed from the other two so that `q + r + s == 0` holds.
/// On equal error the q correction wins over r, and r over s.
#[must_use]
pub fn hex_round(h: FractionalAxial) -> Axial {
    let s = -h.q - h.r;
    let mut rq = round_half_up(h.q);
    let mut rr = round_half_up(h.r);
    let rs = round_half_up(s);

    let q_diff = (rq - h.q).abs();
    let r_diff = (rr - h.r).abs();
    let s_diff = (rs - s).abs();

    if q_diff > r_diff && q_diff > s_diff {
        rq = -rr - rs;
    } else if r_diff > s_diff {
        rr = -rq - rs;
    }

    Axial::new(to_cell_index(rq), to_cell_index(rr))
}

/// Cube-space Chebyshev distance in cells.
#[must_use]
pub fn hex_distance(a: Axial, b: Axial) -> u32 {
    let ac = axial_to_cube(a);
    let bc = axial_to_cube(b);
    (ac.q - bc.q)
        .unsigned_abs()
        .max((ac.r - bc.r).unsigned_abs())
        .max((ac.s - bc.s).unsigned_abs())
}

/// The six adjacent cells in [`HEX_DIRECTIONS`] order.
#[must_use]
pub fn hex_neighbors(center: Axial) -> [Axial; 6] {
    HEX_DIRECTIONS.map(|d| center + d)
}

/// Every cell within `radius` of `center`, column by column.
///
/// Yields `3·radius² + 3·radius + 1` distinct cells. Radii above
/// [`MAX_HEX_RADIUS`] are clamped to it.
#[must_use]
pub fn hex_range(center: Axial, radius: u32) -> Vec<Axial> {
    let n = capped_radius(radius);
    let mut cells = Vec::with_capacity(range_len(radius));
    for q in -n..=n {
        let r1 = (-n).max(-q - n);
        let r2 = n.min(-q + n);
        for r in r1..=r2 {
            cells.push(center + Axial::new(q, r));
        }
    }
    cells
}

/// The closed loop of cells at exactly `radius` from `center`.
///
/// Starts at `center + HEX_DIRECTIONS[4] * radius` and walks `radius` steps
/// along each direction in order. Radius 0 is the center alone. Radii above
/// [`MAX_HEX_RADIUS`] are clamped to it.
#[must_use]
pub fn hex_ring(center: Axial, radius: u32) -> Vec<Axial> {
    if radius == 0 {
        return vec![center];
    }
    let n = capped_radius(radius);
    let mut cells = Vec::with_capacity(6 * n.unsigned_abs() as usize);
    let mut current = center + HEX_DIRECTIONS[4] * n;
    for dir in HEX_DIRECTIONS {
        for _ in 0..n {
            cells.push(current);
            current = current + dir;
        }
    }
    cells
}

#[must_use]
pub fn hex_equal(a: Axial, b: Axial) -> bool {
    a.q == b.q && a.r == b.r
}

/// Vertex angles in degrees for a flat-top hex: `60·i − 30`.
const VERTEX_ANGLES_DEG: [f64; 6] = [-30.0, 30.0, 90.0, 150.0, 210.0, 270.0];

/// Flat-top vertices at `(60·i − 30)°` for `i` in `0..6`.
#[must_use]
pub fn hex_vertices(center: Point, size: f64) -> [Point; 6] {
    VERTEX_ANGLES_DEG.map(|deg| {
        let angle = deg.to_radians();
        Point {
            x: center.x + size * angle.cos(),
            y: center.y + size * angle.sin(),
        }
    })
}

/// Closed outline: move to the first vertex, line to the other five, close.
#[must_use]
pub fn hex_polygon_path(center: Point, size: f64) -> Vec<PathCommand> {
    let vertices = hex_vertices(center, size);
    let mut path = Vec::with_capacity(vertices.len() + 1);
    for (i, v) in vertices.into_iter().enumerate() {
        path.push(if i == 0 { PathCommand::MoveTo(v) } else { PathCommand::LineTo(v) });
    }
    path.push(PathCommand::Close);
    path
}

/// Render path commands as SVG path data (`"M x y L x y ... Z"`).
#[must_use]
pub fn svg_path(commands: &[PathCommand]) -> String {
    let mut out = String::new();
    for cmd in commands {
        if !out.is_empty() {
            out.push(' ');
        }
        match cmd {
            PathCommand::MoveTo(p) => out.push_str(&format!("M {} {}", p.x, p.y)),
            PathCommand::LineTo(p) => out.push_str(&format!("L {} {}", p.x, p.y)),
            PathCommand::Close => out.push('Z'),
        }
    }
    out
}

/// Whether `point` falls in the hex of radius `size` centered at `hex_center`.
///
/// Tested by rounding: the point is shifted into the hex's local frame and
/// must resolve to the origin cell.
#[must_use]
pub fn point_in_hex(point: Point, hex_center: Point, size: f64) -> bool {
    let local = Point { x: point.x - hex_center.x, y: point.y - hex_center.y };
    hex_equal(pixel_to_axial(local, size), Axial::ORIGIN)
}

fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

#[allow(clippy::cast_possible_truncation)]
fn to_cell_index(v: f64) -> i32 {
    v as i32
}

#[allow(clippy::cast_possible_wrap)]
fn capped_radius(radius: u32) -> i32 {
    radius.min(MAX_HEX_RADIUS) as i32
}

fn range_len(radius: u32) -> usize {
    let n = radius.min(MAX_HEX_RADIUS) as usize;
    n.saturating_mul(n).saturating_mul(3).saturating_add(3 * n + 1)
}

// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Stateless geometric predicates on 2D points.
//
// Orientation and in-circle answers come from adaptive-precision exact
// arithmetic (robust::orient2d / robust::incircle). Every topological decision
// the mesh makes goes through these two, so near-degenerate inputs get
// consistent answers.

use rand::Rng;

pub type Real = f64;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: Real,
    pub y: Real,
}

impl Point {
    #[inline]
    pub const fn new(x: Real, y: Real) -> Self {
        Point { x, y }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(Real, Real)> for Point {
    fn from((x, y): (Real, Real)) -> Self {
        Point { x, y }
    }
}

impl From<Point> for robust::Coord<Real> {
    #[inline]
    fn from(p: Point) -> Self {
        robust::Coord { x: p.x, y: p.y }
    }
}

/// Which side of a directed line a point lies on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Orientation {
    Left,
    Right,
    On,
}

/// Side of the directed line `a -> b` that `p` lies on.
#[inline]
pub fn orientation(p: Point, a: Point, b: Point) -> Orientation {
    let det = robust::orient2d(a.into(), b.into(), p.into());
    if det > 0.0 {
        Orientation::Left
    } else if det < 0.0 {
        Orientation::Right
    } else {
        Orientation::On
    }
}

/// True if `p` lies on the closed segment `a - b`.
pub fn point_on_segment(p: Point, a: Point, b: Point) -> bool {
    orientation(p, a, b) == Orientation::On
        && p.x >= a.x.min(b.x)
        && p.x <= a.x.max(b.x)
        && p.y >= a.y.min(b.y)
        && p.y <= a.y.max(b.y)
}

/// True if the open segments `p1 - p2` and `q1 - q2` cross at a single
/// interior point. Touching at an endpoint or collinear overlap does not count.
pub fn segments_cross(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    let o1 = orientation(q1, p1, p2);
    let o2 = orientation(q2, p1, p2);
    let o3 = orientation(p1, q1, q2);
    let o4 = orientation(p2, q1, q2);
    strictly_opposite(o1, o2) && strictly_opposite(o3, o4)
}

/// True if the closed segments share at least one point.
pub fn segments_intersect(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    if segments_cross(p1, p2, q1, q2) {
        return true;
    }
    point_on_segment(q1, p1, p2)
        || point_on_segment(q2, p1, p2)
        || point_on_segment(p1, q1, q2)
        || point_on_segment(p2, q1, q2)
}

#[inline]
fn strictly_opposite(a: Orientation, b: Orientation) -> bool {
    matches!(
        (a, b),
        (Orientation::Left, Orientation::Right) | (Orientation::Right, Orientation::Left)
    )
}

#[inline]
pub fn squared_distance(p: Point, q: Point) -> Real {
    let dx = p.x - q.x;
    let dy = p.y - q.y;
    dx * dx + dy * dy
}

/// True if `p` lies strictly inside the circle through `a`, `b`, `c`.
/// The triangle may be given in either winding.
pub fn point_in_circumcircle(p: Point, a: Point, b: Point, c: Point) -> bool {
    let det = robust::incircle(a.into(), b.into(), c.into(), p.into());
    match orientation(c, a, b) {
        Orientation::Left => det > 0.0,
        Orientation::Right => det < 0.0,
        Orientation::On => false,
    }
}

/// Crossing-number test. Points on the polygon outline may go either way.
pub fn point_in_polygon(p: Point, polygon: &[Point]) -> bool {
    let n = polygon.len();
    let mut inside = false;
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

const MAX_SAMPLE_ATTEMPTS: usize = 10_000;

/// Uniform sample from the interior of a simple polygon by rejection from its
/// bounding box. Returns None for degenerate polygons or when sampling keeps
/// missing a very thin shape.
pub fn random_point_in_polygon<R: Rng + ?Sized>(polygon: &[Point], rng: &mut R) -> Option<Point> {
    if polygon.len() < 3 || polygon.iter().any(|p| !p.is_finite()) {
        return None;
    }
    let (mut min, mut max) = (polygon[0], polygon[0]);
    for p in &polygon[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    if min.x >= max.x || min.y >= max.y {
        return None;
    }
    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let candidate = Point::new(rng.random_range(min.x..max.x), rng.random_range(min.y..max.y));
        if point_in_polygon(candidate, polygon) {
            return Some(candidate);
        }
    }
    None
}

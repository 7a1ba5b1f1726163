//! Planar points and the sampling primitives isogloss construction is built on

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{MattangError, Result};

/// A point in the plane, conventionally (longitude, latitude) in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite (not NaN or infinite)
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for geo::Coord<f64> {
    fn from(point: Point) -> Self {
        geo::Coord { x: point.x, y: point.y }
    }
}

impl From<geo::Coord<f64>> for Point {
    fn from(coord: geo::Coord<f64>) -> Self {
        Self { x: coord.x, y: coord.y }
    }
}

/// How angles are chosen when sampling points on a circle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum CircleSampling {
    /// Evenly spaced angles `2πk/n`, starting at angle 0
    #[default]
    Even,
    /// Uniformly random angles from a generator seeded with `seed`
    Random { seed: u64 },
}

/// Stateful angle source for one geometry computation.
///
/// A random sampler is seeded once and then advanced across every circle it
/// draws, so a whole isogloss build is reproducible from a single seed.
#[derive(Debug, Clone)]
pub(crate) enum CircleSampler {
    Even,
    Random(StdRng),
}

impl CircleSampler {
    pub(crate) fn new(sampling: CircleSampling) -> Self {
        match sampling {
            CircleSampling::Even => CircleSampler::Even,
            CircleSampling::Random { seed } => CircleSampler::Random(StdRng::seed_from_u64(seed)),
        }
    }

    pub(crate) fn sample(&mut self, center: Point, radius: f64, n: usize) -> Vec<Point> {
        let mut points = Vec::with_capacity(n);
        for k in 0..n {
            let angle = match self {
                CircleSampler::Even => 2.0 * PI * k as f64 / n as f64,
                CircleSampler::Random(rng) => rng.gen_range(0.0..2.0 * PI),
            };
            points.push(Point::new(
                center.x + angle.cos() * radius,
                center.y + angle.sin() * radius,
            ));
        }
        points
    }
}

/// Midpoint of the segment `a`–`b`
pub fn midpoint(a: Point, b: Point) -> Point {
    midpoint_with_offset(a, b, Point::ORIGIN)
}

/// Midpoint of the segment `a`–`b`, shifted by `offset`
pub fn midpoint_with_offset(a: Point, b: Point, offset: Point) -> Point {
    Point::new(
        (a.x + b.x) / 2.0 + offset.x,
        (a.y + b.y) / 2.0 + offset.y,
    )
}

/// Sample `n` points at `radius` around `center` using evenly spaced angles
pub fn points_on_circle(center: Point, radius: f64, n: usize) -> Vec<Point> {
    CircleSampler::Even.sample(center, radius, n)
}

/// Sample `n` points at `radius` around `center` with the given policy
pub fn points_on_circle_with(
    center: Point,
    radius: f64,
    n: usize,
    sampling: CircleSampling,
) -> Vec<Point> {
    CircleSampler::new(sampling).sample(center, radius, n)
}

/// Return true if every consecutive triple of `points` lies on one line.
///
/// A convex hull degenerates to a segment for colinear input, so this must
/// be checked before building one. The test is the exact cross-product
/// equality `(b.y−a.y)(c.x−a.x) = (b.x−a.x)(c.y−a.y)`.
pub fn is_colinear(points: &[Point]) -> Result<bool> {
    if points.len() < 3 {
        return Err(MattangError::InvalidInput(format!(
            "can't compute colinearity of fewer than three points (got {})",
            points.len()
        )));
    }

    Ok(points.windows(3).all(|triple| {
        let (a, b, c) = (triple[0], triple[1], triple[2]);
        (b.y - a.y) * (c.x - a.x) == (b.x - a.x) * (c.y - a.y)
    }))
}

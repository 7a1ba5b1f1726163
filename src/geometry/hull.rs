//! Convex hulls over planar point sets, and the padded/rounded buffering that
//! turns a hull into an isogloss outline

use geo::ConvexHull as _;
use geo::MultiPoint;

use super::point::{CircleSampler, Point};
use crate::error::{MattangError, Result};

/// Convex hull of a point set.
///
/// `vertices` index into `points` and are ordered counterclockwise;
/// `simplices` are the hull edges as index pairs, one per vertex, with the
/// last edge closing the ring.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexHull {
    points: Vec<Point>,
    vertices: Vec<usize>,
    simplices: Vec<[usize; 2]>,
}

impl ConvexHull {
    /// Compute the hull of `points`.
    ///
    /// Needs at least three finite points that do not all lie on one line;
    /// the caller is responsible for repairing degenerate input first.
    pub fn compute(points: &[Point]) -> Result<Self> {
        if points.len() < 3 {
            return Err(MattangError::InvalidInput(format!(
                "a convex hull needs at least three points (got {})",
                points.len()
            )));
        }
        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            return Err(MattangError::InvalidInput(format!(
                "non-finite coordinate ({}, {}) passed to hull construction",
                bad.x, bad.y
            )));
        }

        let multi: MultiPoint<f64> = points.iter().map(|p| geo::Point::new(p.x, p.y)).collect();
        let polygon = multi.convex_hull();

        let mut ring: Vec<Point> = polygon.exterior().coords().map(|c| Point::from(*c)).collect();
        // geo closes the ring by repeating the first coordinate
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        if ring.len() < 3 {
            return Err(MattangError::InvalidInput(
                "points are colinear, hull is degenerate".to_string(),
            ));
        }
        if signed_area(&ring) < 0.0 {
            ring.reverse();
        }

        let mut vertices = Vec::with_capacity(ring.len());
        for corner in &ring {
            let index = points
                .iter()
                .position(|p| p.x == corner.x && p.y == corner.y)
                .ok_or_else(|| {
                    MattangError::InvalidInput(format!(
                        "hull vertex ({}, {}) not found in input",
                        corner.x, corner.y
                    ))
                })?;
            vertices.push(index);
        }

        let simplices = (0..vertices.len())
            .map(|i| [vertices[i], vertices[(i + 1) % vertices.len()]])
            .collect();

        Ok(Self {
            points: points.to_vec(),
            vertices,
            simplices,
        })
    }

    /// Every point the hull was built from, hull vertices or not
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Indices of hull vertices, counterclockwise
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Hull edges as index pairs into [`points`](Self::points)
    pub fn simplices(&self) -> &[[usize; 2]] {
        &self.simplices
    }

    /// Hull vertex coordinates, counterclockwise
    pub fn vertex_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.vertices.iter().map(move |&i| self.points[i])
    }

    /// Hull edges in drawable form: `([x0, x1], [y0, y1])`
    pub fn edges(&self) -> Vec<([f64; 2], [f64; 2])> {
        self.simplices
            .iter()
            .map(|&[a, b]| {
                let (pa, pb) = (self.points[a], self.points[b]);
                ([pa.x, pb.x], [pa.y, pb.y])
            })
            .collect()
    }

    /// Enclosed area
    pub fn area(&self) -> f64 {
        let corners: Vec<Point> = self.vertex_points().collect();
        signed_area(&corners).abs()
    }

    /// True if `point` lies inside the hull or within `tolerance` of its boundary
    pub fn contains(&self, point: Point, tolerance: f64) -> bool {
        self.simplices.iter().all(|&[a, b]| {
            let (pa, pb) = (self.points[a], self.points[b]);
            let length = pa.distance(pb);
            if length == 0.0 {
                return true;
            }
            let cross = (pb.x - pa.x) * (point.y - pa.y) - (pb.y - pa.y) * (point.x - pa.x);
            cross / length >= -tolerance
        })
    }

    /// Pad the hull outward by `stretch` and round its corners.
    ///
    /// Every vertex is replaced by `roundedness` points on a circle of radius
    /// `stretch` around it, and the hull of all replacement points is
    /// returned. With `stretch == 0` the replacement points coincide with
    /// the vertices and the hull is rebuilt unchanged.
    pub fn buffer(&self, stretch: f64, roundedness: usize) -> Result<Self> {
        self.buffer_with(stretch, roundedness, &mut CircleSampler::Even)
    }

    pub(crate) fn buffer_with(
        &self,
        stretch: f64,
        roundedness: usize,
        sampler: &mut CircleSampler,
    ) -> Result<Self> {
        if roundedness == 0 {
            return Err(MattangError::InvalidInput(
                "roundedness must be at least 1".to_string(),
            ));
        }
        if !stretch.is_finite() || stretch < 0.0 {
            return Err(MattangError::InvalidInput(format!(
                "stretch must be finite and non-negative (got {})",
                stretch
            )));
        }

        let mut expanded = Vec::with_capacity(self.vertices.len() * roundedness);
        for vertex in self.vertex_points() {
            expanded.extend(sampler.sample(vertex, stretch, roundedness));
        }

        Self::compute(&expanded)
    }
}

/// Shoelace area, positive for counterclockwise rings
fn signed_area(ring: &[Point]) -> f64 {
    let n = ring.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let (a, b) = (ring[i], ring[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn vertices_run_counterclockwise() {
        let hull = ConvexHull::compute(&square()).unwrap();
        let corners: Vec<Point> = hull.vertex_points().collect();
        assert!(signed_area(&corners) > 0.0);
    }

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
            Point::new(0.5, 0.5),
        ]
    }

    #[test]
    fn interior_points_are_not_vertices() {
        let hull = ConvexHull::compute(&square()).unwrap();
        assert_eq!(hull.vertices().len(), 4);
        assert!(!hull.vertices().contains(&4));
    }

    #[test]
    fn simplices_close_the_ring() {
        let hull = ConvexHull::compute(&square()).unwrap();
        let simplices = hull.simplices();
        assert_eq!(simplices.len(), 4);
        for pair in simplices.windows(2) {
            assert_eq!(pair[0][1], pair[1][0]);
        }
        assert_eq!(simplices[3][1], simplices[0][0]);
    }

    #[test]
    fn square_area() {
        let hull = ConvexHull::compute(&square()).unwrap();
        assert_relative_eq!(hull.area(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn contains_points_inside_and_on_boundary() {
        let hull = ConvexHull::compute(&square()).unwrap();
        assert!(hull.contains(Point::new(0.5, 0.5), 0.0));
        assert!(hull.contains(Point::new(1.0, 0.5), 1e-12));
        assert!(!hull.contains(Point::new(1.5, 0.5), 1e-12));
    }

    #[test]
    fn colinear_points_have_no_hull() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(3.0, 3.0),
        ];
        assert!(matches!(
            ConvexHull::compute(&points),
            Err(MattangError::InvalidInput(_))
        ));
    }

    #[test]
    fn too_few_points_have_no_hull() {
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        assert!(ConvexHull::compute(&points).is_err());
    }

    #[test]
    fn non_finite_points_are_rejected() {
        let mut points = square();
        points.push(Point::new(f64::NAN, 0.0));
        assert!(matches!(
            ConvexHull::compute(&points),
            Err(MattangError::InvalidInput(_))
        ));
    }

    #[test]
    fn buffer_with_zero_stretch_keeps_vertices() {
        let hull = ConvexHull::compute(&square()).unwrap();
        let buffered = hull.buffer(0.0, 10).unwrap();

        for vertex in hull.vertex_points() {
            assert!(buffered.contains(vertex, 1e-9));
        }
        assert_relative_eq!(buffered.area(), hull.area(), epsilon = 1e-9);
    }

    #[test]
    fn buffer_grows_the_hull() {
        let hull = ConvexHull::compute(&square()).unwrap();
        let buffered = hull.buffer(0.1, 40).unwrap();

        assert!(buffered.area() > hull.area());
        for vertex in hull.vertex_points() {
            assert!(buffered.contains(vertex, 0.0));
        }
        // rounded corners add vertices
        assert!(buffered.vertices().len() > hull.vertices().len());
    }

    #[test]
    fn buffer_rejects_zero_roundedness() {
        let hull = ConvexHull::compute(&square()).unwrap();
        assert!(matches!(
            hull.buffer(0.1, 0),
            Err(MattangError::InvalidInput(_))
        ));
    }

    #[test]
    fn buffer_rejects_negative_stretch() {
        let hull = ConvexHull::compute(&square()).unwrap();
        assert!(hull.buffer(-0.1, 10).is_err());
    }
}

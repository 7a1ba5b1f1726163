//! Isogloss construction: a padded, rounded outline around the languages
//! that share a feature
//!
//! Degenerate clusters are repaired before the hull is built:
//! - one point gets a tiny ring of synthesized points around it
//! - two points get a midpoint nudged off their common line
//! - colinear points get the same tiny ring around the first point
//!
//! The repaired set is hulled, the hull is buffered outward by `padding`
//! with `roundedness` samples per corner, and the buffered ring is the
//! isogloss.

use log::debug;
use serde::{Deserialize, Serialize};

use super::hull::ConvexHull;
use super::point::{is_colinear, midpoint_with_offset, CircleSampler, CircleSampling, Point};
use crate::constants::{DEFAULT_PADDING, DEFAULT_ROUNDEDNESS, DEFAULT_SCALE};
use crate::error::{MattangError, Result};

/// Parameters for [`build_isogloss`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsoglossConfig {
    /// How far outside the outermost languages the boundary runs
    pub padding: f64,
    /// Points sampled around each hull corner; higher is smoother but
    /// costs O(corners · roundedness). Values of 3 or more with even
    /// sampling guarantee every input point is enclosed
    pub roundedness: usize,
    /// Radius of the ring synthesized around degenerate inputs. Keep it
    /// small relative to the coordinate unit
    pub scale: f64,
    /// Angle policy for every circle sampled during one build
    pub sampling: CircleSampling,
}

impl Default for IsoglossConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            roundedness: DEFAULT_ROUNDEDNESS,
            scale: DEFAULT_SCALE,
            sampling: CircleSampling::Even,
        }
    }
}

impl IsoglossConfig {
    /// Create a configuration with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_roundedness(mut self, roundedness: usize) -> Self {
        self.roundedness = roundedness;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_sampling(mut self, sampling: CircleSampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Check the parameters are usable
    pub fn validate(&self) -> Result<()> {
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(MattangError::InvalidInput(format!(
                "padding must be finite and non-negative (got {})",
                self.padding
            )));
        }
        if self.roundedness == 0 {
            return Err(MattangError::InvalidInput(
                "roundedness must be at least 1".to_string(),
            ));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(MattangError::InvalidInput(format!(
                "scale must be finite and positive (got {})",
                self.scale
            )));
        }
        Ok(())
    }
}

/// A closed boundary around a group of languages, counterclockwise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Isogloss {
    vertices: Vec<Point>,
}

impl Isogloss {
    fn from_hull(hull: &ConvexHull) -> Self {
        Self {
            vertices: hull.vertex_points().collect(),
        }
    }

    /// Boundary corners, counterclockwise
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Boundary segments as `([x0, x1], [y0, y1])`, ready for line drawing.
    /// The last segment closes the ring.
    pub fn edges(&self) -> Vec<([f64; 2], [f64; 2])> {
        let n = self.vertices.len();
        (0..n)
            .map(|i| {
                let (a, b) = (self.vertices[i], self.vertices[(i + 1) % n]);
                ([a.x, b.x], [a.y, b.y])
            })
            .collect()
    }

    /// Point-in-polygon test (even-odd ray casting)
    pub fn encloses(&self, point: Point) -> bool {
        let v = &self.vertices;
        let mut inside = false;
        let mut j = v.len().wrapping_sub(1);
        for i in 0..v.len() {
            let (a, b) = (v[i], v[j]);
            if (a.y > point.y) != (b.y > point.y)
                && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// The boundary as a `geo` polygon for rendering layers
    pub fn to_polygon(&self) -> geo::Polygon<f64> {
        let ring: Vec<geo::Coord<f64>> = self.vertices.iter().map(|&p| p.into()).collect();
        geo::Polygon::new(geo::LineString::new(ring), vec![])
    }
}

/// Build the isogloss around `points`.
///
/// Coordinates must be finite; callers filter missing locations first.
pub fn build_isogloss(points: &[Point], config: &IsoglossConfig) -> Result<Isogloss> {
    if points.is_empty() {
        return Err(MattangError::EmptyInput);
    }
    config.validate()?;
    if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
        return Err(MattangError::InvalidInput(format!(
            "non-finite coordinate ({}, {}) in isogloss input",
            bad.x, bad.y
        )));
    }

    let mut sampler = CircleSampler::new(config.sampling);
    let mut working = points.to_vec();

    match working.len() {
        1 => {
            let ring = ring_around(working[0], config, &mut sampler);
            debug!("single language: synthesized {} points around it", ring.len());
            working.extend(ring);
        }
        2 => {
            let nudged = nudged_midpoint(working[0], working[1], config.scale);
            debug!("two languages: added offset midpoint ({}, {})", nudged.x, nudged.y);
            working.push(nudged);
        }
        _ => {}
    }

    if is_colinear(&working)? {
        let ring = ring_around(working[0], config, &mut sampler);
        debug!(
            "{} colinear points: synthesized {} points around the first",
            working.len(),
            ring.len()
        );
        working.extend(ring);
    }

    let hull = ConvexHull::compute(&working)?;
    let buffered = hull.buffer_with(config.padding, config.roundedness, &mut sampler)?;

    Ok(Isogloss::from_hull(&buffered))
}

/// `roundedness` points on a circle of radius `scale` around `center`, plus
/// the midpoint of `center` and the first sample pushed `scale/2` sideways
fn ring_around(center: Point, config: &IsoglossConfig, sampler: &mut CircleSampler) -> Vec<Point> {
    let mut ring = sampler.sample(center, config.scale, config.roundedness);
    if let Some(&first) = ring.first() {
        let sideways = Point::new(-(first.y - center.y) / 2.0, (first.x - center.x) / 2.0);
        ring.push(midpoint_with_offset(center, first, sideways));
    }
    ring
}

/// Midpoint of `a`–`b` moved `scale` perpendicular to the segment. Identical
/// points get no offset and are left for the colinear repair.
fn nudged_midpoint(a: Point, b: Point, scale: f64) -> Point {
    let length = a.distance(b);
    let offset = if length > 0.0 {
        Point::new(-(b.y - a.y) / length * scale, (b.x - a.x) / length * scale)
    } else {
        Point::ORIGIN
    };
    midpoint_with_offset(a, b, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_reported() {
        let result = build_isogloss(&[], &IsoglossConfig::default());
        assert!(matches!(result, Err(MattangError::EmptyInput)));
    }

    #[test]
    fn config_defaults() {
        let config = IsoglossConfig::new();
        assert_eq!(config.padding, 0.1);
        assert_eq!(config.roundedness, 100);
        assert_eq!(config.scale, 0.001);
        assert_eq!(config.sampling, CircleSampling::Even);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_rejects_bad_parameters() {
        assert!(IsoglossConfig::new().with_roundedness(0).validate().is_err());
        assert!(IsoglossConfig::new().with_padding(-1.0).validate().is_err());
        assert!(IsoglossConfig::new().with_padding(f64::NAN).validate().is_err());
        assert!(IsoglossConfig::new().with_scale(0.0).validate().is_err());
        assert!(IsoglossConfig::new().with_padding(0.0).validate().is_ok());
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let points = [Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0), Point::new(1.0, 0.0)];
        let result = build_isogloss(&points, &IsoglossConfig::default());
        assert!(matches!(result, Err(MattangError::InvalidInput(_))));
    }

    #[test]
    fn nudged_midpoint_leaves_the_line() {
        let a = Point::new(2.0, 0.0);
        let b = Point::new(2.0, 4.0);
        let m = nudged_midpoint(a, b, 0.001);
        assert!(!is_colinear(&[a, b, m]).unwrap());
        assert!((m.distance(Point::new(2.0, 2.0)) - 0.001).abs() < 1e-12);
    }

    #[test]
    fn ring_around_breaks_colinearity_even_with_one_sample() {
        let config = IsoglossConfig::new().with_roundedness(1);
        let center = Point::new(10.0, 10.0);
        let mut ring = ring_around(center, &config, &mut CircleSampler::Even);
        assert_eq!(ring.len(), 2);
        ring.insert(0, center);
        assert!(!is_colinear(&ring).unwrap());
    }

    #[test]
    fn edges_close_the_ring() {
        let points = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
        let isogloss = build_isogloss(&points, &IsoglossConfig::new().with_roundedness(8)).unwrap();
        let edges = isogloss.edges();
        assert_eq!(edges.len(), isogloss.vertices().len());
        let (first_x, first_y) = edges[0];
        let (last_x, last_y) = edges[edges.len() - 1];
        assert_eq!(last_x[1], first_x[0]);
        assert_eq!(last_y[1], first_y[0]);
    }

    #[test]
    fn polygon_export_matches_vertices() {
        let points = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
        let isogloss = build_isogloss(&points, &IsoglossConfig::new().with_roundedness(8)).unwrap();
        let polygon = isogloss.to_polygon();
        // geo closes the ring
        assert_eq!(polygon.exterior().0.len(), isogloss.vertices().len() + 1);
    }
}

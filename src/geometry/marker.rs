//! Pie-chart marker outlines, one wedge per mapped feature

use std::f64::consts::PI;

use super::point::Point;
use crate::error::{MattangError, Result};

/// Split the unit circle into `n_slices` equal wedges.
///
/// Each wedge is the origin followed by `samples` points along its arc,
/// endpoints included, so consecutive wedges share an edge.
pub fn pie_slices(n_slices: usize, samples: usize) -> Result<Vec<Vec<Point>>> {
    if n_slices == 0 {
        return Err(MattangError::InvalidInput(
            "a pie marker needs at least one slice".to_string(),
        ));
    }
    if samples < 2 {
        return Err(MattangError::InvalidInput(format!(
            "a slice arc needs at least two samples (got {})",
            samples
        )));
    }

    let wedge = 2.0 * PI / n_slices as f64;
    let slices = (0..n_slices)
        .map(|s| {
            let start = wedge * s as f64;
            let mut outline = Vec::with_capacity(samples + 1);
            outline.push(Point::ORIGIN);
            for k in 0..samples {
                let angle = start + wedge * k as f64 / (samples - 1) as f64;
                outline.push(Point::new(angle.cos(), angle.sin()));
            }
            outline
        })
        .collect();

    Ok(slices)
}

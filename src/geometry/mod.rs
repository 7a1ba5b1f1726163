//! Planar geometry for isogloss construction
//!
//! This module contains the geometric primitives and algorithms used to
//! outline groups of languages on a map, including:
//! - Point representation and circle sampling
//! - Colinearity detection
//! - Convex hulls and their padded, rounded buffering
//! - Isogloss construction with degenerate-input repair
//! - Pie-marker outlines

pub mod point;
pub mod hull;
pub mod isogloss;
pub mod marker;

// Re-export core types from point module
pub use point::{
    Point,
    CircleSampling,
    midpoint,
    midpoint_with_offset,
    points_on_circle,
    points_on_circle_with,
    is_colinear,
};

pub use hull::ConvexHull;

pub use isogloss::{
    IsoglossConfig,
    Isogloss,
    build_isogloss,
};

pub use marker::pie_slices;

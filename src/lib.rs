//! # Mattang - Linguistic Map Geometry and Historical Glottometry
//!
//! The computational core of a linguistic mapper. This library provides:
//!
//! - **Isogloss construction**: a closed, padded, rounded outline around the
//!   languages that share a feature, robust to one, two or colinear points
//! - **Historical Glottometry**: exclusivity, cohesiveness (κ) and
//!   subgroupiness (ς) scores for candidate subgroups of languages
//! - **Per-feature grouping**: one isogloss per value of a mapped feature
//!
//! Rendering, colour choice and spreadsheet parsing belong to the caller.
//! Everything here is in-memory and deterministic by default.
//!
//! ## Isoglosses
//!
//! ```rust
//! use mattang::{build_isogloss, IsoglossConfig, Point};
//!
//! let languages = vec![
//!     Point::new(167.7, -13.8),
//!     Point::new(167.6, -13.7),
//!     Point::new(167.5, -13.9),
//! ];
//! let isogloss = build_isogloss(&languages, &IsoglossConfig::default()).unwrap();
//!
//! for (xs, ys) in isogloss.edges() {
//!     // draw a line from (xs[0], ys[0]) to (xs[1], ys[1])
//!     let _ = (xs, ys);
//! }
//! assert!(languages.iter().all(|&p| isogloss.encloses(p)));
//! ```
//!
//! ## Glottometry
//!
//! ```rust
//! use mattang::{FeatureIndex, FeatureTable};
//!
//! let table = FeatureTable::from_tsv_str(
//!     "Innovation\tL1\tL2\tL3\n\
//!      A\t1\t1\t0\n\
//!      B\t1\t1\t1\n\
//!      C\t0\t0\t1\n",
//! ).unwrap();
//! let index = FeatureIndex::build(&table).unwrap();
//!
//! assert_eq!(index.cohesiveness(&["L1", "L2"]).unwrap(), 1.0);
//! assert_eq!(index.subgroupiness(&["L1", "L2"]).unwrap(), 1.0);
//! ```
//!
//! ## Modules
//!
//! - [`geometry`]: points, hulls, isoglosses and pie-marker outlines
//! - [`glottometry`]: innovation tables and subgroup scoring
//! - [`mapping`]: language records grouped into per-feature isoglosses
//! - [`constants`]: default parameters
//! - [`error`]: the crate error type
//!
//! ## References
//!
//! François, A. & Kalyan, S. (2017). Historical Glottometry.

pub mod constants;
pub mod error;
pub mod geometry;
pub mod glottometry;
pub mod mapping;

// Re-export core types for convenience
pub use constants::*;
pub use error::{MattangError, Result};
pub use geometry::*;
pub use glottometry::*;
pub use mapping::*;

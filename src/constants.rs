//! Constants used throughout isogloss construction and glottometry scoring

/// Default distance an isogloss is padded outward from its languages
/// (in degrees when points are longitude/latitude pairs)
pub const DEFAULT_PADDING: f64 = 0.1;

/// Default number of points sampled around each hull vertex when rounding
/// the corners of an isogloss
pub const DEFAULT_ROUNDEDNESS: usize = 100;

/// Default radius of the circle used to synthesize points around degenerate
/// inputs. Must stay small relative to one degree so that repaired shapes
/// do not visibly distort the isogloss
pub const DEFAULT_SCALE: f64 = 0.001;

/// Default strictness exponent for subgroupiness (ς = ε·κⁿ)
pub const DEFAULT_STRICTNESS: f64 = 1.0;

/// Default number of arc samples per pie-marker slice
pub const DEFAULT_PIE_SAMPLES: usize = 50;

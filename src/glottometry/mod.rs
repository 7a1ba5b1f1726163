//! Historical Glottometry: quantifying how well shared innovations support a
//! candidate subgroup of languages
//!
//! - [`FeatureTable`]: raw membership table, read from tab-separated text
//! - [`FeatureIndex`]: language ↔ innovation lookups and the glottometric
//!   measures (exclusive, supporting, conflicting, κ, ς)
//! - [`SubgroupScore`]: per-subgroup report and ranking

pub mod table;
pub mod index;
pub mod score;

pub use table::{FeatureRow, FeatureTable};
pub use index::FeatureIndex;
pub use score::SubgroupScore;

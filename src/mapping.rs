//! Language records and per-feature isoglosses
//!
//! This is the boundary between loaded language data and the geometry: it
//! groups languages by the value they show for a feature, drops languages
//! without a usable location, and outlines each group.

use std::collections::BTreeMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{MattangError, Result};
use crate::geometry::{build_isogloss, Isogloss, IsoglossConfig, Point};

/// One language: its location and its feature values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageRecord {
    pub id: String,
    pub longitude: f64,
    pub latitude: f64,
    /// Feature name → value. An empty value means the feature is unknown
    #[serde(default)]
    pub features: BTreeMap<String, String>,
}

impl LanguageRecord {
    pub fn new(id: impl Into<String>, longitude: f64, latitude: f64) -> Self {
        Self {
            id: id.into(),
            longitude,
            latitude,
            features: BTreeMap::new(),
        }
    }

    /// Set a feature value
    pub fn with_feature(mut self, feature: impl Into<String>, value: impl Into<String>) -> Self {
        self.features.insert(feature.into(), value.into());
        self
    }

    /// Map position as (longitude, latitude)
    pub fn location(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

/// The isogloss around every language sharing one value of a feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureIsogloss {
    pub feature: String,
    pub value: String,
    /// Number of located languages the isogloss was built around
    pub languages: usize,
    pub isogloss: Isogloss,
}

/// Group language locations by their value for `feature`.
///
/// Records without a value are left out, and so are locations with a
/// non-finite coordinate. A value whose every location was dropped maps to
/// an empty list.
pub fn group_points(records: &[LanguageRecord], feature: &str) -> Result<BTreeMap<String, Vec<Point>>> {
    if !records.iter().any(|r| r.features.contains_key(feature)) {
        return Err(MattangError::UnknownFeature(feature.to_string()));
    }

    let mut groups: BTreeMap<String, Vec<Point>> = BTreeMap::new();
    for record in records {
        let Some(value) = record.features.get(feature) else {
            continue;
        };
        if value.trim().is_empty() {
            continue;
        }

        let points = groups.entry(value.clone()).or_default();
        let location = record.location();
        if location.is_finite() {
            points.push(location);
        } else {
            debug!("{}: no usable location, left out of {} = {}", record.id, feature, value);
        }
    }
    Ok(groups)
}

/// Build one isogloss per value of `feature`, in value order
pub fn isoglosses_for_feature(
    records: &[LanguageRecord],
    feature: &str,
    config: &IsoglossConfig,
) -> Result<Vec<FeatureIsogloss>> {
    config.validate()?;
    let groups = group_points(records, feature)?;

    let mut isoglosses = Vec::with_capacity(groups.len());
    for (value, points) in groups {
        if points.is_empty() {
            warn!("{} = {}: no language has a usable location, skipping", feature, value);
            continue;
        }
        let isogloss = build_isogloss(&points, config)?;
        isoglosses.push(FeatureIsogloss {
            feature: feature.to_string(),
            value,
            languages: points.len(),
            isogloss,
        });
    }

    debug!("{}: built {} isoglosses", feature, isoglosses.len());
    Ok(isoglosses)
}

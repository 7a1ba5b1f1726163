//! Subgroup score reports and ranking of the subgroups a table attests

use std::collections::BTreeSet;

use log::debug;
use serde::{Deserialize, Serialize};

use super::index::{validate_strictness, FeatureIndex};
use crate::error::Result;

/// All glottometric evidence for one candidate subgroup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubgroupScore {
    /// Member languages, in table column order
    pub languages: Vec<String>,
    /// ε, exclusively shared innovations
    pub exclusive: usize,
    /// p, innovations confirming the subgroup plus outside languages
    pub supporting: usize,
    /// q, cross-cutting innovations
    pub conflicting: usize,
    /// κ
    pub cohesiveness: f64,
    /// ς
    pub subgroupiness: f64,
}

impl FeatureIndex {
    /// Score a candidate subgroup with the given strictness exponent
    pub fn score<S: AsRef<str>>(&self, languages: &[S], strictness: f64) -> Result<SubgroupScore> {
        validate_strictness(strictness)?;
        let subgroup = self.subgroup(languages)?;

        let exclusive = self.exclusive(languages)?.len();
        let supporting = self.supporting(languages)?.len();
        let conflicting = self.conflicting(languages)?.len();
        let cohesiveness = (supporting + 1) as f64 / (supporting + conflicting + 1) as f64;

        Ok(SubgroupScore {
            languages: self.in_column_order(&subgroup),
            exclusive,
            supporting,
            conflicting,
            cohesiveness,
            subgroupiness: exclusive as f64 * cohesiveness.powf(strictness),
        })
    }

    /// Every distinct set of two or more languages that jointly holds some
    /// innovation, in order of first appearance in the table
    pub fn attested_subgroups(&self) -> Vec<Vec<String>> {
        let mut seen: BTreeSet<&BTreeSet<String>> = BTreeSet::new();
        let mut subgroups = Vec::new();

        for innovation in self.innovations() {
            let Some(holders) = self.languages_with(innovation) else {
                continue;
            };
            if holders.len() >= 2 && seen.insert(holders) {
                subgroups.push(self.in_column_order(holders));
            }
        }
        subgroups
    }

    /// Score every attested subgroup, highest subgroupiness first. Ties keep
    /// table order
    pub fn rank_subgroups(&self, strictness: f64) -> Result<Vec<SubgroupScore>> {
        validate_strictness(strictness)?;
        let mut scores = self
            .attested_subgroups()
            .iter()
            .map(|subgroup| self.score(subgroup.as_slice(), strictness))
            .collect::<Result<Vec<_>>>()?;
        scores.sort_by(|a, b| b.subgroupiness.total_cmp(&a.subgroupiness));

        debug!("ranked {} attested subgroups", scores.len());
        Ok(scores)
    }

    fn in_column_order(&self, members: &BTreeSet<String>) -> Vec<String> {
        self.languages()
            .iter()
            .filter(|l| members.contains(*l))
            .cloned()
            .collect()
    }
}

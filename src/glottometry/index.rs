//! Innovation/language index and the Historical Glottometry measures
//!
//! For a candidate subgroup S:
//! - *exclusive* innovations are possessed by exactly the languages of S
//! - *supporting* innovations are possessed by all of S plus at least one
//!   language outside it
//! - *conflicting* innovations are those found in exactly one member's
//!   innovation set, counted over the members of S only
//!
//! Exclusive and supporting are judged against every language that has the
//! innovation. Conflicting is judged only within S. This asymmetry is how the
//! method defines cross-cutting evidence; making it symmetric changes the
//! scores.
//!
//! With p supporting and q conflicting innovations, cohesiveness is
//! κ = (p+1)/(p+q+1) and subgroupiness is ς = ε·κⁿ for ε exclusive
//! innovations and strictness n.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};

use super::table::FeatureTable;
use crate::constants::DEFAULT_STRICTNESS;
use crate::error::{MattangError, Result};

/// Read-only lookup from languages to innovations and back.
///
/// Built once from a [`FeatureTable`] and only queried afterwards, so it can
/// be shared between threads without locking.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureIndex {
    languages: Vec<String>,
    innovations: Vec<String>,
    lang_feats: BTreeMap<String, BTreeSet<String>>,
    feat_langs: BTreeMap<String, BTreeSet<String>>,
}

impl FeatureIndex {
    /// Index a membership table in one pass.
    ///
    /// Cells must be `0`, `1`, `true` or `false` (case-insensitive).
    pub fn build(table: &FeatureTable) -> Result<Self> {
        let languages = table.languages().to_vec();

        let mut lang_feats: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for language in &languages {
            if language.is_empty() {
                return Err(MattangError::MalformedInput(
                    "empty language identifier in header".to_string(),
                ));
            }
            if lang_feats.insert(language.clone(), BTreeSet::new()).is_some() {
                return Err(MattangError::MalformedInput(format!(
                    "language {} appears in more than one column",
                    language
                )));
            }
        }

        let mut innovations = Vec::with_capacity(table.rows().len());
        let mut feat_langs: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for row in table.rows() {
            if row.innovation.is_empty() {
                return Err(MattangError::MalformedInput(
                    "empty innovation identifier".to_string(),
                ));
            }
            if row.cells.len() != languages.len() {
                return Err(MattangError::MalformedInput(format!(
                    "innovation {} has {} cells for {} languages",
                    row.innovation,
                    row.cells.len(),
                    languages.len()
                )));
            }

            let mut holders = BTreeSet::new();
            for (language, cell) in languages.iter().zip(&row.cells) {
                if parse_membership(cell).ok_or_else(|| {
                    MattangError::MalformedInput(format!(
                        "innovation {}, language {}: expected 0 or 1, found {:?}",
                        row.innovation, language, cell
                    ))
                })? {
                    holders.insert(language.clone());
                    if let Some(feats) = lang_feats.get_mut(language) {
                        feats.insert(row.innovation.clone());
                    }
                }
            }

            if feat_langs.insert(row.innovation.clone(), holders).is_some() {
                return Err(MattangError::MalformedInput(format!(
                    "innovation {} appears in more than one row",
                    row.innovation
                )));
            }
            innovations.push(row.innovation.clone());
        }

        debug!(
            "indexed {} innovations across {} languages",
            innovations.len(),
            languages.len()
        );

        Ok(Self {
            languages,
            innovations,
            lang_feats,
            feat_langs,
        })
    }

    /// Language identifiers, in table column order
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Innovation identifiers, in table row order
    pub fn innovations(&self) -> &[String] {
        &self.innovations
    }

    /// Innovations exhibited by `language`
    pub fn innovations_of(&self, language: &str) -> Result<&BTreeSet<String>> {
        self.lang_feats
            .get(language)
            .ok_or_else(|| MattangError::UnknownLanguage(language.to_string()))
    }

    /// Languages exhibiting `innovation`, if the innovation is in the table
    pub fn languages_with(&self, innovation: &str) -> Option<&BTreeSet<String>> {
        self.feat_langs.get(innovation)
    }

    /// Normalize a query to a set, rejecting empty queries and unknown ids
    pub(crate) fn subgroup<S: AsRef<str>>(&self, languages: &[S]) -> Result<BTreeSet<String>> {
        if languages.is_empty() {
            return Err(MattangError::InvalidInput(
                "a subgroup needs at least one language".to_string(),
            ));
        }
        let mut subgroup = BTreeSet::new();
        for language in languages {
            let language = language.as_ref();
            if !self.lang_feats.contains_key(language) {
                return Err(MattangError::UnknownLanguage(language.to_string()));
            }
            subgroup.insert(language.to_string());
        }
        Ok(subgroup)
    }

    /// Innovations whose holders are exactly `languages`
    pub fn exclusive<S: AsRef<str>>(&self, languages: &[S]) -> Result<BTreeSet<&str>> {
        let subgroup = self.subgroup(languages)?;
        Ok(self
            .feat_langs
            .iter()
            .filter(|(_, holders)| **holders == subgroup)
            .map(|(innovation, _)| innovation.as_str())
            .collect())
    }

    /// Innovations held by all of `languages` and at least one other language
    pub fn supporting<S: AsRef<str>>(&self, languages: &[S]) -> Result<BTreeSet<&str>> {
        let subgroup = self.subgroup(languages)?;
        Ok(self
            .feat_langs
            .iter()
            .filter(|(_, holders)| holders.len() > subgroup.len() && holders.is_superset(&subgroup))
            .map(|(innovation, _)| innovation.as_str())
            .collect())
    }

    /// Innovations occurring in exactly one member's innovation set, counted
    /// over the members of `languages` only
    pub fn conflicting<S: AsRef<str>>(&self, languages: &[S]) -> Result<BTreeSet<&str>> {
        let subgroup = self.subgroup(languages)?;
        Ok(self.singly_held(&subgroup).into_keys().collect())
    }

    /// The conflicting innovations, split by the member that holds each
    pub fn conflicting_by_language<S: AsRef<str>>(
        &self,
        languages: &[S],
    ) -> Result<BTreeMap<&str, BTreeSet<&str>>> {
        let subgroup = self.subgroup(languages)?;
        let mut grouped: BTreeMap<&str, BTreeSet<&str>> = subgroup
            .iter()
            .filter_map(|l| self.lang_feats.get_key_value(l.as_str()))
            .map(|(l, _)| (l.as_str(), BTreeSet::new()))
            .collect();
        for (innovation, holder) in self.singly_held(&subgroup) {
            if let Some(set) = grouped.get_mut(holder) {
                set.insert(innovation);
            }
        }
        Ok(grouped)
    }

    /// Innovations seen exactly once across the subgroup's members, mapped
    /// to the member holding them
    fn singly_held(&self, subgroup: &BTreeSet<String>) -> BTreeMap<&str, &str> {
        let mut counts: BTreeMap<&str, (usize, &str)> = BTreeMap::new();
        for (language, feats) in &self.lang_feats {
            if !subgroup.contains(language) {
                continue;
            }
            for innovation in feats {
                counts
                    .entry(innovation.as_str())
                    .and_modify(|(count, _)| *count += 1)
                    .or_insert((1, language.as_str()));
            }
        }
        counts
            .into_iter()
            .filter(|(_, (count, _))| *count == 1)
            .map(|(innovation, (_, holder))| (innovation, holder))
            .collect()
    }

    /// κ = (p+1)/(p+q+1), always in (0, 1]
    pub fn cohesiveness<S: AsRef<str>>(&self, languages: &[S]) -> Result<f64> {
        let p = self.supporting(languages)?.len();
        let q = self.conflicting(languages)?.len();
        trace!("cohesiveness: p = {}, q = {}", p, q);
        Ok((p + 1) as f64 / (p + q + 1) as f64)
    }

    /// ς = ε·κ, the default strictness of 1
    pub fn subgroupiness<S: AsRef<str>>(&self, languages: &[S]) -> Result<f64> {
        self.subgroupiness_with_strictness(languages, DEFAULT_STRICTNESS)
    }

    /// ς = ε·κⁿ for strictness `n`. Larger `n` penalizes subgroups that
    /// overlap with conflicting evidence more heavily
    pub fn subgroupiness_with_strictness<S: AsRef<str>>(
        &self,
        languages: &[S],
        strictness: f64,
    ) -> Result<f64> {
        validate_strictness(strictness)?;
        let epsilon = self.exclusive(languages)?.len();
        let kappa = self.cohesiveness(languages)?;
        Ok(epsilon as f64 * kappa.powf(strictness))
    }
}

pub(crate) fn validate_strictness(strictness: f64) -> Result<()> {
    if !strictness.is_finite() || strictness < 0.0 {
        return Err(MattangError::InvalidInput(format!(
            "strictness must be finite and non-negative (got {})",
            strictness
        )));
    }
    Ok(())
}

fn parse_membership(cell: &str) -> Option<bool> {
    let cell = cell.trim();
    if cell == "1" || cell.eq_ignore_ascii_case("true") {
        Some(true)
    } else if cell == "0" || cell.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn index(tsv: &str) -> FeatureIndex {
        FeatureIndex::build(&FeatureTable::from_tsv_str(tsv).unwrap()).unwrap()
    }

    /// A→{L1,L2}, B→{L1,L2,L3}, C→{L3}
    fn small() -> FeatureIndex {
        index(
            "Innovation\tL1\tL2\tL3\n\
             A\t1\t1\t0\n\
             B\t1\t1\t1\n\
             C\t0\t0\t1\n",
        )
    }

    #[test]
    fn build_links_both_directions() {
        let idx = small();
        for language in idx.languages() {
            for innovation in idx.innovations_of(language).unwrap() {
                assert!(idx.languages_with(innovation).unwrap().contains(language));
            }
        }
        for innovation in idx.innovations() {
            for language in idx.languages_with(innovation).unwrap() {
                assert!(idx.innovations_of(language).unwrap().contains(innovation));
            }
        }
    }

    #[test]
    fn exclusive_is_exact_set_equality() {
        let idx = small();
        assert_eq!(idx.exclusive(&["L1", "L2"]).unwrap(), BTreeSet::from(["A"]));
        assert_eq!(idx.exclusive(&["L2", "L1"]).unwrap(), BTreeSet::from(["A"]));
        assert!(idx.exclusive(&["L1"]).unwrap().is_empty());
    }

    #[test]
    fn supporting_needs_an_outside_language() {
        let idx = small();
        assert_eq!(idx.supporting(&["L1", "L2"]).unwrap(), BTreeSet::from(["B"]));
        assert!(idx.supporting(&["L1", "L2", "L3"]).unwrap().is_empty());
        assert_eq!(idx.supporting(&["L3"]).unwrap(), BTreeSet::from(["B"]));
    }

    #[test]
    fn conflicting_counts_within_the_subgroup_only() {
        let idx = small();
        assert!(idx.conflicting(&["L1", "L2"]).unwrap().is_empty());
        // A is held by L1 and L2 globally, but only L1 is in this query
        assert_eq!(idx.conflicting(&["L1", "L3"]).unwrap(), BTreeSet::from(["A", "C"]));
    }

    #[test]
    fn conflicting_by_language_splits_by_holder() {
        let idx = small();
        let grouped = idx.conflicting_by_language(&["L1", "L3"]).unwrap();
        assert_eq!(grouped["L1"], BTreeSet::from(["A"]));
        assert_eq!(grouped["L3"], BTreeSet::from(["C"]));
    }

    #[test]
    fn scores_for_the_small_table() {
        let idx = small();
        assert_relative_eq!(idx.cohesiveness(&["L1", "L2"]).unwrap(), 1.0);
        assert_relative_eq!(idx.subgroupiness(&["L1", "L2"]).unwrap(), 1.0);
    }

    #[test]
    fn cohesiveness_without_evidence_is_one() {
        let idx = index("Innovation\tL1\tL2\nA\t0\t0\n");
        assert_relative_eq!(idx.cohesiveness(&["L1", "L2"]).unwrap(), 1.0);
        assert_relative_eq!(idx.subgroupiness(&["L1", "L2"]).unwrap(), 0.0);
    }

    #[test]
    fn strictness_is_an_exponent() {
        let idx = small();
        // {L3}: ε = 1 (C), p = 1 (B), q = 2 (B and C each held once within the query)
        assert_relative_eq!(idx.cohesiveness(&["L3"]).unwrap(), 0.5);
        assert_relative_eq!(idx.subgroupiness(&["L3"]).unwrap(), 0.5);
        assert_relative_eq!(idx.subgroupiness_with_strictness(&["L3"], 3.0).unwrap(), 0.125);
        assert_relative_eq!(idx.subgroupiness_with_strictness(&["L3"], 0.0).unwrap(), 1.0);
    }

    #[test]
    fn cross_cutting_pair() {
        let idx = small();
        // {L1,L3}: p = 1 (B), q = 2 (A and C)
        assert_relative_eq!(idx.cohesiveness(&["L1", "L3"]).unwrap(), 0.5);
        assert_relative_eq!(idx.subgroupiness(&["L1", "L3"]).unwrap(), 0.0);
    }

    #[test]
    fn strictness_must_be_finite_and_non_negative() {
        let idx = small();
        assert!(matches!(
            idx.subgroupiness_with_strictness(&["L1", "L2"], -1.0),
            Err(MattangError::InvalidInput(_))
        ));
        assert!(idx.subgroupiness_with_strictness(&["L1", "L2"], f64::NAN).is_err());
    }

    #[test]
    fn unknown_language_is_reported() {
        let idx = small();
        assert!(matches!(
            idx.exclusive(&["L1", "L9"]),
            Err(MattangError::UnknownLanguage(l)) if l == "L9"
        ));
        assert!(matches!(idx.supporting(&["L9"]), Err(MattangError::UnknownLanguage(_))));
        assert!(matches!(idx.conflicting(&["L9"]), Err(MattangError::UnknownLanguage(_))));
        assert!(matches!(idx.cohesiveness(&["L9"]), Err(MattangError::UnknownLanguage(_))));
    }

    #[test]
    fn empty_query_is_invalid() {
        let idx = small();
        let none: [&str; 0] = [];
        assert!(matches!(idx.exclusive(&none), Err(MattangError::InvalidInput(_))));
    }

    #[test]
    fn duplicate_query_ids_collapse() {
        let idx = small();
        assert_eq!(idx.exclusive(&["L1", "L2", "L1"]).unwrap(), BTreeSet::from(["A"]));
    }

    #[test]
    fn boolean_words_are_accepted() {
        let idx = index("Innovation\tL1\tL2\nA\tTRUE\tfalse\n");
        assert_eq!(idx.exclusive(&["L1"]).unwrap(), BTreeSet::from(["A"]));
    }

    #[test]
    fn non_boolean_cells_are_malformed() {
        let table = FeatureTable::from_tsv_str("Innovation\tL1\nA\t2\n").unwrap();
        assert!(matches!(
            FeatureIndex::build(&table),
            Err(MattangError::MalformedInput(_))
        ));
        let table = FeatureTable::from_tsv_str("Innovation\tL1\nA\t\n").unwrap();
        assert!(FeatureIndex::build(&table).is_err());
    }

    #[test]
    fn duplicate_identifiers_are_malformed() {
        let table = FeatureTable::from_tsv_str("Innovation\tL1\tL1\nA\t1\t0\n").unwrap();
        assert!(matches!(FeatureIndex::build(&table), Err(MattangError::MalformedInput(_))));

        let table = FeatureTable::from_tsv_str("Innovation\tL1\nA\t1\nA\t0\n").unwrap();
        assert!(matches!(FeatureIndex::build(&table), Err(MattangError::MalformedInput(_))));
    }

    #[test]
    fn short_programmatic_rows_are_malformed() {
        let mut table = FeatureTable::new(["L1", "L2"]);
        table.push_row("A", ["1"]);
        assert!(matches!(FeatureIndex::build(&table), Err(MattangError::MalformedInput(_))));
    }
}

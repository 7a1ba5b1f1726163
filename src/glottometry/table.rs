//! Raw innovation × language membership table, as read from a
//! tab-separated file
//!
//! Column 0 holds innovation identifiers; every other column is a language
//! whose cells mark whether it exhibits the innovation. Cells are kept as
//! text here and interpreted by [`FeatureIndex::build`](super::FeatureIndex::build).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{MattangError, Result};

/// One innovation and its membership cells, in language-column order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub innovation: String,
    pub cells: Vec<String>,
}

/// Unvalidated membership table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureTable {
    languages: Vec<String>,
    rows: Vec<FeatureRow>,
}

impl FeatureTable {
    /// Create an empty table with the given language columns
    pub fn new<S: Into<String>>(languages: impl IntoIterator<Item = S>) -> Self {
        Self {
            languages: languages.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append an innovation row
    pub fn push_row<S: Into<String>>(
        &mut self,
        innovation: impl Into<String>,
        cells: impl IntoIterator<Item = S>,
    ) {
        self.rows.push(FeatureRow {
            innovation: innovation.into(),
            cells: cells.into_iter().map(Into::into).collect(),
        });
    }

    /// Language identifiers, in column order
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    /// Read a tab-separated table. The first non-blank line is the header.
    pub fn from_tsv_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines().enumerate();

        let mut table = loop {
            let Some((_, line)) = lines.next() else {
                return Err(MattangError::MalformedInput("table is empty".to_string()));
            };
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
            if fields.len() < 2 {
                return Err(MattangError::MalformedInput(
                    "header has no language columns".to_string(),
                ));
            }
            break FeatureTable::new(fields[1..].iter().copied());
        };

        for (line_no, line) in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
            if fields.len() != table.languages.len() + 1 {
                return Err(MattangError::MalformedInput(format!(
                    "line {}: expected {} fields, found {}",
                    line_no + 1,
                    table.languages.len() + 1,
                    fields.len()
                )));
            }
            table.push_row(fields[0], fields[1..].iter().copied());
        }

        Ok(table)
    }

    pub fn from_tsv_str(text: &str) -> Result<Self> {
        Self::from_tsv_reader(text.as_bytes())
    }

    pub fn from_tsv_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_tsv_reader(BufReader::new(file))
    }
}

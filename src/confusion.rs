//! Confusion tables: per character pair error statistics for each edit operation.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::alignment::{Alignment, Edit, EditOp};
use crate::alphabet::{Alphabet, BOUNDARY};
use crate::frequency::CharCounts;
use crate::{CharPair, Error, Result};

/// `AccumulationMode` picks how much of a backtrace is charged to the tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccumulationMode {
    /// Every non-copy edit along the alignment.
    Full,
    /// Only the first non-copy edit met from the end of the words.
    FirstDifference,
}

impl Default for AccumulationMode {
    fn default() -> Self {
        Self::Full
    }
}

/// `ConfusionTable` maps a character pair to a raw count or, once normalized, a rate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfusionTable {
    entries: HashMap<CharPair, f64>,
}

impl ConfusionTable {
    /// `get` reads the entry for `pair`, zero when absent.
    #[must_use]
    pub fn get(&self, pair: CharPair) -> f64 {
        self.entries.get(&pair).copied().unwrap_or(0.0)
    }

    /// `add` increases the entry for `pair` by `amount`.
    pub fn add(&mut self, pair: CharPair, amount: f64) {
        *self.entries.entry(pair).or_insert(0.0) += amount;
    }

    /// `iter` visits every stored entry in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (CharPair, f64)> + '_ {
        self.entries.iter().map(|(pair, value)| (*pair, *value))
    }

    /// `len` is the number of stored pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `is_empty` reports whether no pair was ever recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `grid` renders the table as a fixed-width matrix over the boundary symbol and
    /// `alphabet`, rows being the first character of each pair.
    #[must_use]
    pub fn grid<'a>(&'a self, alphabet: &'a Alphabet) -> Grid<'a> {
        Grid {
            table: self,
            alphabet,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn divided_by(self, baseline: impl Fn(CharPair) -> u64) -> Self {
        let entries = self
            .entries
            .into_iter()
            .map(|(pair, count)| {
                let base = baseline(pair);
                if base == 0 {
                    log::debug!("no baseline for {:?}, dropping rate to zero", pair);
                    return (pair, 0.0);
                }
                (pair, count / base as f64)
            })
            .collect();
        Self { entries }
    }
}

/// Fixed-width rendering of a [`ConfusionTable`].
pub struct Grid<'a> {
    table: &'a ConfusionTable,
    alphabet: &'a Alphabet,
}

impl fmt::Display for Grid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<char> = std::iter::once(BOUNDARY).chain(self.alphabet.chars()).collect();

        let cells: Vec<Vec<String>> = labels
            .iter()
            .map(|&row| {
                labels
                    .iter()
                    .map(|&col| format_value(self.table.get((row, col))))
                    .collect()
            })
            .collect();
        let width = cells
            .iter()
            .flatten()
            .map(String::len)
            .max()
            .unwrap_or(0)
            .max(4)
            + 1;

        write!(f, "  ")?;
        for label in &labels {
            write!(f, "{:<width$}", label, width = width)?;
        }
        writeln!(f)?;

        for (label, row) in labels.iter().zip(&cells) {
            write!(f, "{} ", label)?;
            for cell in row {
                write!(f, "{:<width$}", cell, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value)
    } else {
        format!("{:.4}", value)
    }
}

/// `ConfusionTables` groups the insertion, deletion, substitution and transposition tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfusionTables {
    /// Keyed by (preceding character, inserted character).
    pub insertion: ConfusionTable,
    /// Keyed by (preceding character, deleted character).
    pub deletion: ConfusionTable,
    /// Keyed by (typed character, correct character).
    pub substitution: ConfusionTable,
    /// Keyed by the swapped characters in their correct order.
    pub transposition: ConfusionTable,
    normalized: bool,
}

impl ConfusionTables {
    /// `new` creates four empty raw-count tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `is_normalized` reports whether the entries are rates rather than raw counts.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// `table` returns the table an operation is charged to, `None` for copies and the origin.
    #[must_use]
    pub fn table(&self, op: EditOp) -> Option<&ConfusionTable> {
        match op {
            EditOp::Insertion => Some(&self.insertion),
            EditOp::Deletion => Some(&self.deletion),
            EditOp::Substitution => Some(&self.substitution),
            EditOp::Transposition => Some(&self.transposition),
            EditOp::Copy | EditOp::None => None,
        }
    }

    fn table_mut(&mut self, op: EditOp) -> Option<&mut ConfusionTable> {
        match op {
            EditOp::Insertion => Some(&mut self.insertion),
            EditOp::Deletion => Some(&mut self.deletion),
            EditOp::Substitution => Some(&mut self.substitution),
            EditOp::Transposition => Some(&mut self.transposition),
            EditOp::Copy | EditOp::None => None,
        }
    }

    /// `record` adds `weight` to the entry keyed by `edit`. Copies are ignored.
    #[allow(clippy::cast_precision_loss)]
    pub fn record(&mut self, edit: &Edit, weight: u64) {
        if let Some(table) = self.table_mut(edit.op) {
            log::trace!("{:?} {:?} += {}", edit.op, edit.pair, weight);
            table.add(edit.pair, weight as f64);
        }
    }

    /// `accumulate` aligns `truth` with `typo` and charges the edits found to the tables,
    /// returning how many were charged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyNormalized`] once the tables hold rates.
    pub fn accumulate(
        &mut self,
        truth: &str,
        typo: &str,
        weight: u64,
        mode: AccumulationMode,
    ) -> Result<usize> {
        if self.normalized {
            return Err(Error::AlreadyNormalized);
        }

        let alignment = Alignment::new(truth, typo);
        let mut edits = alignment.backtrace().filter(|edit| edit.op != EditOp::Copy);

        let mut charged = 0;
        match mode {
            AccumulationMode::Full => {
                for edit in edits {
                    self.record(&edit, weight);
                    charged += 1;
                }
            }
            AccumulationMode::FirstDifference => {
                if let Some(edit) = edits.next() {
                    self.record(&edit, weight);
                    charged = 1;
                }
            }
        }
        Ok(charged)
    }

    /// `normalize` converts raw counts to rates: insertion and substitution entries are
    /// divided by the unigram count of the pair's first character, deletion and
    /// transposition entries by the bigram count of the pair.
    #[must_use]
    pub fn normalize(self, baseline: &CharCounts) -> Self {
        if self.normalized {
            return self;
        }

        log::debug!(
            "normalizing {} insertion, {} deletion, {} substitution, {} transposition entries",
            self.insertion.len(),
            self.deletion.len(),
            self.substitution.len(),
            self.transposition.len()
        );

        Self {
            insertion: self.insertion.divided_by(|(first, _)| baseline.unigram(first)),
            deletion: self.deletion.divided_by(|pair| baseline.bigram(pair)),
            substitution: self
                .substitution
                .divided_by(|(first, _)| baseline.unigram(first)),
            transposition: self.transposition.divided_by(|pair| baseline.bigram(pair)),
            normalized: true,
        }
    }
}

/// `first_difference` is the last edit separating `truth` from `typo` in backtrace order,
/// `None` for equal words.
#[must_use]
pub fn first_difference(truth: &str, typo: &str) -> Option<Edit> {
    Alignment::new(truth, typo)
        .backtrace()
        .find(|edit| edit.op != EditOp::Copy)
}

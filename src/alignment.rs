//! Restricted Damerau-Levenshtein alignment with per-cell edit labels.
//!
//! Rows index prefixes of the correct word, columns prefixes of the misspelling.

use crate::alphabet::BOUNDARY;
use crate::CharPair;

/// `EditOp` names the single operation that produced a cell's minimum cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditOp {
    /// The grid origin.
    None,
    /// Matching characters, no cost.
    Copy,
    /// The misspelling has an extra character.
    Insertion,
    /// The misspelling lost a character.
    Deletion,
    /// One character typed in place of another.
    Substitution,
    /// Two adjacent characters swapped.
    Transposition,
}

/// `Edit` is one step of a backtrace: the operation and the character pair that keys its
/// confusion table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edit {
    /// The operation, never [`EditOp::None`].
    pub op: EditOp,
    /// The confusion table key.
    pub pair: CharPair,
}

/// `Alignment` holds the cost and label grids for one (correct, misspelled) comparison.
#[derive(Debug, Clone)]
pub struct Alignment {
    truth: Vec<char>,
    typo: Vec<char>,
    costs: Vec<usize>,
    labels: Vec<EditOp>,
}

impl Alignment {
    /// `new` fills both grids for `truth` (rows) against `typo` (columns).
    #[must_use]
    pub fn new(truth: &str, typo: &str) -> Self {
        let truth: Vec<char> = truth.chars().collect();
        let typo: Vec<char> = typo.chars().collect();
        let cols = typo.len() + 1;
        let size = (truth.len() + 1) * cols;

        let mut alignment = Self {
            costs: vec![0; size],
            labels: vec![EditOp::None; size],
            truth,
            typo,
        };

        for i in 1..alignment.rows() {
            alignment.set(i, 0, i, EditOp::Deletion);
        }
        for j in 1..cols {
            alignment.set(0, j, j, EditOp::Insertion);
        }

        for i in 1..alignment.rows() {
            for j in 1..cols {
                let (cost, label) = alignment.best(i, j);
                alignment.set(i, j, cost, label);
            }
        }

        alignment
    }

    fn best(&self, i: usize, j: usize) -> (usize, EditOp) {
        let same = self.truth[i - 1] == self.typo[j - 1];
        let del = self.cost(i - 1, j) + 1;
        let ins = self.cost(i, j - 1) + 1;
        let diag = self.cost(i - 1, j - 1) + usize::from(!same);
        let cost = del.min(ins).min(diag);

        // Deletion, then Insertion, then Copy, then Substitution.
        let mut label = if cost == del {
            EditOp::Deletion
        } else if cost == ins {
            EditOp::Insertion
        } else if same {
            EditOp::Copy
        } else {
            EditOp::Substitution
        };
        let mut cost = cost;

        if i >= 2
            && j >= 2
            && self.truth[i - 2] == self.typo[j - 1]
            && self.truth[i - 1] == self.typo[j - 2]
        {
            let swapped = self.cost(i - 2, j - 2) + 1;
            if swapped < cost {
                cost = swapped;
                label = EditOp::Transposition;
            }
        }

        (cost, label)
    }

    fn set(&mut self, i: usize, j: usize, cost: usize, label: EditOp) {
        let idx = self.index(i, j);
        self.costs[idx] = cost;
        self.labels[idx] = label;
    }

    fn index(&self, i: usize, j: usize) -> usize {
        i * self.cols() + j
    }

    /// `rows` is the length of the correct word plus one.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.truth.len() + 1
    }

    /// `cols` is the length of the misspelling plus one.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.typo.len() + 1
    }

    /// # Panics
    ///
    /// Panics if `(i, j)` lies outside the grid.
    #[must_use]
    pub fn cost(&self, i: usize, j: usize) -> usize {
        self.costs[self.index(i, j)]
    }

    /// # Panics
    ///
    /// Panics if `(i, j)` lies outside the grid.
    #[must_use]
    pub fn label(&self, i: usize, j: usize) -> EditOp {
        self.labels[self.index(i, j)]
    }

    /// `distance` is the cost of the terminal cell.
    #[must_use]
    pub fn distance(&self) -> usize {
        self.cost(self.truth.len(), self.typo.len())
    }

    /// `backtrace` walks from the terminal cell to the origin, yielding every step
    /// including copies.
    #[must_use]
    pub fn backtrace(&self) -> Backtrace<'_> {
        Backtrace {
            alignment: self,
            row: self.truth.len(),
            col: self.typo.len(),
        }
    }
}

/// Iterator over the steps of an [`Alignment`], last edit first.
#[derive(Debug)]
pub struct Backtrace<'a> {
    alignment: &'a Alignment,
    row: usize,
    col: usize,
}

impl Iterator for Backtrace<'_> {
    type Item = Edit;

    fn next(&mut self) -> Option<Edit> {
        let op = self.alignment.label(self.row, self.col);
        if op == EditOp::None {
            return None;
        }

        let a = self.row.checked_sub(1).map_or(BOUNDARY, |i| self.alignment.truth[i]);
        let b = self.col.checked_sub(1).map_or(BOUNDARY, |j| self.alignment.typo[j]);

        let pair = match op {
            EditOp::Insertion => {
                self.col -= 1;
                (a, b)
            }
            EditOp::Deletion => {
                self.row -= 1;
                (b, a)
            }
            EditOp::Copy | EditOp::Substitution => {
                self.row -= 1;
                self.col -= 1;
                (b, a)
            }
            EditOp::Transposition => {
                self.row -= 2;
                self.col -= 2;
                (b, a)
            }
            EditOp::None => unreachable!(),
        };

        Some(Edit { op, pair })
    }
}

/// `distance` is the restricted Damerau-Levenshtein distance between `a` and `b`.
#[must_use]
pub fn distance(a: &str, b: &str) -> usize {
    Alignment::new(a, b).distance()
}

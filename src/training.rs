//! Labeled misspellings and the training phase that turns them into a [`Model`].

use crate::confusion::{AccumulationMode, ConfusionTables};
use crate::frequency::{CharCounts, FrequencyModel};
use crate::{Config, Error, Result};

/// `TrainingPair` is one observed misspelling of a correct word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingPair {
    /// The intended word.
    pub correct: String,
    /// How it was typed.
    pub misspelling: String,
    /// How many times the misspelling was observed.
    pub count: u64,
}

/// `parse_spell_errors` reads lines of the form `correct: miss1, miss2*3`.
///
/// Whitespace is dropped, everything is lowercased and a `*n` suffix sets the repeat count
/// (default 1). Blank lines are skipped.
///
/// # Errors
///
/// Returns [`Error::Parse`] for a line without `:` or with a count that is not a number.
pub fn parse_spell_errors(text: &str) -> Result<Vec<TrainingPair>> {
    let mut pairs = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let parse_error = |reason: String| Error::Parse {
            line: idx + 1,
            reason,
        };

        let (correct, misspellings) = line
            .split_once(':')
            .ok_or_else(|| parse_error("missing ':' separator".into()))?;
        let correct = correct.trim().to_lowercase();

        let misspellings: String = misspellings
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        for item in misspellings.split(',').filter(|item| !item.is_empty()) {
            let (misspelling, count) = match item.split_once('*') {
                Some((word, count)) => {
                    let count = count
                        .parse::<u64>()
                        .map_err(|_| parse_error(format!("invalid count {:?}", count)))?;
                    (word, count)
                }
                None => (item, 1),
            };

            pairs.push(TrainingPair {
                correct: correct.clone(),
                misspelling: misspelling.to_string(),
                count,
            });
        }
    }

    Ok(pairs)
}

/// `Model` is the trained state shared read-only by every correction.
#[derive(Debug, Clone)]
pub struct Model {
    frequency: FrequencyModel,
    confusion: ConfusionTables,
}

impl Model {
    /// `new` bundles word counts and finished confusion tables.
    #[must_use]
    pub fn new(frequency: FrequencyModel, confusion: ConfusionTables) -> Self {
        Self {
            frequency,
            confusion,
        }
    }

    /// `frequency` is the word prior.
    #[must_use]
    pub fn frequency(&self) -> &FrequencyModel {
        &self.frequency
    }

    /// `confusion` is the error model.
    #[must_use]
    pub fn confusion(&self) -> &ConfusionTables {
        &self.confusion
    }
}

/// `Trainer` folds labeled pairs into raw confusion counts, one pair at a time.
#[derive(Debug)]
pub struct Trainer {
    frequency: FrequencyModel,
    confusion: ConfusionTables,
    mode: AccumulationMode,
    normalize: bool,
    pairs: usize,
    edits: usize,
}

impl Trainer {
    /// `new` starts a training phase over `frequency` with the mode and normalization of
    /// `config`.
    #[must_use]
    pub fn new(frequency: FrequencyModel, config: &Config) -> Self {
        Self {
            frequency,
            confusion: ConfusionTables::new(),
            mode: config.mode,
            normalize: config.normalize,
            pairs: 0,
            edits: 0,
        }
    }

    /// `train` charges the edits of one pair, weighted by its count.
    ///
    /// # Errors
    ///
    /// Never fails while the trainer owns the tables; the error comes from
    /// [`ConfusionTables::accumulate`].
    pub fn train(&mut self, pair: &TrainingPair) -> Result<usize> {
        let charged =
            self.confusion
                .accumulate(&pair.correct, &pair.misspelling, pair.count, self.mode)?;
        self.pairs += 1;
        self.edits += charged;
        Ok(charged)
    }

    /// `train_all` trains on every pair in order and returns the total edits charged.
    ///
    /// # Errors
    ///
    /// See [`Trainer::train`].
    pub fn train_all<'a>(&mut self, pairs: impl IntoIterator<Item = &'a TrainingPair>) -> Result<usize> {
        let mut charged = 0;
        for pair in pairs {
            charged += self.train(pair)?;
        }
        Ok(charged)
    }

    /// `finish` ends the training phase. When normalization is configured the raw counts
    /// are divided by character statistics of `baseline_text`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingBaseline`] if normalization is configured and no text is given.
    pub fn finish(self, baseline_text: Option<&str>) -> Result<Model> {
        log::debug!(
            "trained on {} pairs, {} edits charged",
            self.pairs,
            self.edits
        );

        let confusion = if self.normalize {
            let text = baseline_text.ok_or(Error::MissingBaseline)?;
            self.confusion.normalize(&CharCounts::from_text(text))
        } else {
            self.confusion
        };

        Ok(Model::new(self.frequency, confusion))
    }
}

//! Noisy-channel scoring: prior times error likelihood.

use crate::alignment::EditOp;
use crate::alphabet::SMOOTHING_DENOMINATOR;
use crate::candidates::Candidate;
use crate::confusion::ConfusionTables;
use crate::frequency::FrequencyModel;

/// `Scorer` ranks candidates by `P(candidate) * P(query | candidate)`.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    frequency: &'a FrequencyModel,
    confusion: &'a ConfusionTables,
    smoothing: bool,
}

impl<'a> Scorer<'a> {
    /// `new` scores against `frequency` and `confusion`, smoothing the likelihood if asked.
    #[must_use]
    pub fn new(frequency: &'a FrequencyModel, confusion: &'a ConfusionTables, smoothing: bool) -> Self {
        Self {
            frequency,
            confusion,
            smoothing,
        }
    }

    /// `likelihood` is the probability of the candidate's edit.
    ///
    /// Raw counts are divided by the unigram count of the pair's first character for
    /// insertions and substitutions, or by the bigram count of the pair for deletions and
    /// transpositions. With smoothing, 1 is added to the count and 26 to the baseline.
    /// Normalized tables are read as rates; smoothing then only gives unseen pairs 1/26.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn likelihood(&self, candidate: &Candidate) -> f64 {
        let Some(table) = self.confusion.table(candidate.op) else {
            return 0.0;
        };
        let count = table.get(candidate.pair);

        if self.confusion.is_normalized() {
            return if count == 0.0 && self.smoothing {
                1.0 / SMOOTHING_DENOMINATOR
            } else {
                count
            };
        }

        let chars = self.frequency.chars();
        let baseline = match candidate.op {
            EditOp::Insertion | EditOp::Substitution => chars.unigram(candidate.pair.0),
            EditOp::Deletion | EditOp::Transposition => chars.bigram(candidate.pair),
            EditOp::Copy | EditOp::None => return 0.0,
        } as f64;

        let (alpha, extra) = if self.smoothing {
            (1.0, SMOOTHING_DENOMINATOR)
        } else {
            (0.0, 0.0)
        };

        let denominator = baseline + extra;
        // An unseen baseline scores zero; it is not read as a neutral 1.
        if denominator == 0.0 {
            return 0.0;
        }
        (count + alpha) / denominator
    }

    /// `score` is the prior of the candidate word times its likelihood.
    #[must_use]
    pub fn score(&self, candidate: &Candidate) -> f64 {
        self.frequency.prior(&candidate.word) * self.likelihood(candidate)
    }

    /// `select` returns the first candidate with the strictly highest positive score.
    #[must_use]
    pub fn select<'c>(&self, candidates: &'c [Candidate]) -> Option<&'c Candidate> {
        let mut best = None;
        let mut max = 0.0;
        for candidate in candidates {
            let score = self.score(candidate);
            if score > max {
                best = Some(candidate);
                max = score;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::{Alphabet, BOUNDARY};
    use crate::candidates::generate;
    use crate::confusion::AccumulationMode;
    use crate::frequency::CharCounts;

    fn candidate(word: &str, op: EditOp, pair: (char, char)) -> Candidate {
        Candidate {
            word: word.into(),
            op,
            pair,
        }
    }

    #[test]
    fn trained_transposition_selects_the() {
        let vocab: FrequencyModel = vec![("the", 100), ("that", 10)].into_iter().collect();
        let mut tables = ConfusionTables::new();
        tables
            .accumulate("the", "teh", 1, AccumulationMode::Full)
            .unwrap();

        let scorer = Scorer::new(&vocab, &tables, false);
        let candidates = generate("teh", &vocab, &Alphabet::standard());
        let best = scorer.select(&candidates).unwrap();
        assert_eq!(best.word, "the");

        // one transposition over 100 weighted "he" bigrams
        assert!((scorer.likelihood(best) - 0.01).abs() < 1e-12);
    }

    #[test]
    fn unseen_pairs_score_zero_without_smoothing() {
        let vocab: FrequencyModel = vec![("cat", 10), ("bat", 50)].into_iter().collect();
        let tables = ConfusionTables::new();
        let scorer = Scorer::new(&vocab, &tables, false);

        let candidates = generate("hat", &vocab, &Alphabet::standard());
        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|c| scorer.score(c) == 0.0));
        assert_eq!(scorer.select(&candidates), None);
        assert_eq!(scorer.select(&[]), None);
    }

    #[test]
    fn smoothing_on_empty_tables_falls_back_to_the_prior() {
        let vocab: FrequencyModel = vec![("cat", 10), ("bat", 50)].into_iter().collect();
        let tables = ConfusionTables::new();
        let scorer = Scorer::new(&vocab, &tables, true);

        let candidates = generate("hat", &vocab, &Alphabet::standard());
        for c in &candidates {
            // no "h" in the vocabulary, so the baseline is zero
            assert!((scorer.likelihood(c) - 1.0 / 26.0).abs() < 1e-12);
        }
        assert_eq!(scorer.select(&candidates).unwrap().word, "bat");
    }

    #[test]
    fn smoothing_keeps_baselines() {
        let vocab: FrequencyModel = vec![("the", 4)].into_iter().collect();
        let tables = ConfusionTables::new();
        let scorer = Scorer::new(&vocab, &tables, true);

        let c = candidate("the", EditOp::Insertion, ('t', 'x'));
        assert!((scorer.likelihood(&c) - 1.0 / 30.0).abs() < 1e-12);

        let c = candidate("the", EditOp::Deletion, (BOUNDARY, 't'));
        assert!((scorer.likelihood(&c) - 1.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn receive_is_chosen_over_nothing() {
        let vocab: FrequencyModel = vec![("receive", 50), ("recieve", 0)].into_iter().collect();
        let mut tables = ConfusionTables::new();
        tables
            .accumulate("receive", "recieve", 1, AccumulationMode::Full)
            .unwrap();

        let scorer = Scorer::new(&vocab, &tables, false);
        let candidates = generate("recieve", &vocab, &Alphabet::standard());
        assert_eq!(scorer.select(&candidates).unwrap().word, "receive");
    }

    #[test]
    fn normalized_tables_are_read_as_rates() {
        let vocab: FrequencyModel = vec![("the", 100)].into_iter().collect();
        let mut tables = ConfusionTables::new();
        tables
            .accumulate("the", "teh", 1, AccumulationMode::Full)
            .unwrap();
        let tables = tables.normalize(&CharCounts::from_text("the he"));

        let scorer = Scorer::new(&vocab, &tables, false);
        let c = candidate("the", EditOp::Transposition, ('h', 'e'));
        assert!((scorer.likelihood(&c) - 0.5).abs() < 1e-12);

        let unseen = candidate("the", EditOp::Substitution, ('x', 'e'));
        assert_eq!(scorer.likelihood(&unseen), 0.0);
        let smoothed = Scorer::new(&vocab, &tables, true);
        assert!((smoothed.likelihood(&unseen) - 1.0 / 26.0).abs() < 1e-12);
    }

    #[test]
    fn ties_keep_the_first_candidate() {
        let vocab: FrequencyModel = vec![("ab", 5), ("ba", 5)].into_iter().collect();
        let tables = ConfusionTables::new();
        let scorer = Scorer::new(&vocab, &tables, true);

        let first = candidate("ab", EditOp::Substitution, ('q', 'a'));
        let second = candidate("ba", EditOp::Substitution, ('q', 'b'));
        let list = vec![first.clone(), second.clone()];
        assert_eq!(scorer.select(&list), Some(&first));
        let list = vec![second.clone(), first];
        assert_eq!(scorer.select(&list), Some(&second));
    }
}

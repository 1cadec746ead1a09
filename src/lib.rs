//! Noisy-channel spelling corrector in Rust.
//!
//! A misspelled word is corrected to the known word one edit away that maximizes
//! `P(word) * P(misspelling | word)`. The prior comes from word counts in a text corpus; the
//! error model comes from confusion tables learned by aligning labeled misspellings with
//! their corrections.

#![warn(clippy::all, clippy::pedantic, missing_docs)]
#![allow(clippy::module_name_repetitions)]

use std::path::Path;

use anyhow::Context;

pub mod alignment;
pub mod alphabet;
pub mod candidates;
pub mod config;
pub mod confusion;
mod error;
pub mod frequency;
pub mod scorer;
pub mod training;

pub use alignment::{Alignment, Edit, EditOp};
pub use alphabet::{Alphabet, BOUNDARY};
pub use candidates::Candidate;
pub use config::Config;
pub use confusion::{AccumulationMode, ConfusionTable, ConfusionTables};
pub use error::{Error, Result};
pub use frequency::FrequencyModel;
pub use scorer::Scorer;
pub use training::{parse_spell_errors, Model, Trainer, TrainingPair};

/// An ordered pair of characters keying a confusion table or a bigram count.
pub type CharPair = (char, char);

/// `SpellingCorrector` is a type that represents a trained noisy-channel spelling corrector.
#[derive(Debug, Clone)]
pub struct SpellingCorrector {
    model: Model,
    alphabet: Alphabet,
    smoothing: bool,
}

impl SpellingCorrector {
    /// `new` wraps a trained `model` for inference.
    ///
    /// # Arguments
    ///
    /// * `model` - Word counts and confusion tables from a [`Trainer`].
    /// * `config` - Selects smoothing and the candidate alphabet.
    ///
    /// # Example
    ///
    /// ```
    /// use spell::{Config, FrequencyModel, SpellingCorrector, Trainer, TrainingPair};
    ///
    /// let vocab: FrequencyModel = vec![("the", 100), ("that", 10)].into_iter().collect();
    /// let config = Config::default();
    ///
    /// let mut trainer = Trainer::new(vocab, &config);
    /// trainer.train(&TrainingPair {
    ///     correct: "the".into(),
    ///     misspelling: "teh".into(),
    ///     count: 1,
    /// })?;
    ///
    /// let sc = SpellingCorrector::new(trainer.finish(None)?, &config);
    /// assert_eq!(sc.correction("teh").as_deref(), Some("the"));
    /// # Ok::<(), spell::Error>(())
    /// ```
    #[must_use]
    pub fn new(model: Model, config: &Config) -> Self {
        Self {
            model,
            alphabet: config.alphabet(),
            smoothing: config.smoothing,
        }
    }

    /// `from_files` trains a corrector from a text corpus and a file of labeled misspellings.
    ///
    /// # Errors
    ///
    /// Returns error if either file cannot be read, if the misspellings file is malformed,
    /// or if training fails.
    ///
    /// # Arguments
    ///
    /// * `corpus` - A path to text data.
    /// * `spell_errors` - A path to lines of the form `correct: miss1, miss2*count`.
    /// * `config` - Training and scoring options.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use spell::{Config, SpellingCorrector};
    ///
    /// fn main() -> Result<(), anyhow::Error> {
    ///     let sc = SpellingCorrector::from_files("corpus.txt", "spell-errors.txt", &Config::default())?;
    ///     println!("{:?}", sc.correction("speling"));
    ///     Ok(())
    /// }
    /// ```
    pub fn from_files(
        corpus: impl AsRef<Path>,
        spell_errors: impl AsRef<Path>,
        config: &Config,
    ) -> anyhow::Result<Self> {
        let corpus = corpus.as_ref();
        let spell_errors = spell_errors.as_ref();

        let text = std::fs::read_to_string(corpus)
            .with_context(|| format!("reading corpus {}", corpus.display()))?;
        let frequency = FrequencyModel::from_text(&text)?;
        log::debug!(
            "{} distinct words, {} tokens in {}",
            frequency.len(),
            frequency.total(),
            corpus.display()
        );

        let errors = std::fs::read_to_string(spell_errors)
            .with_context(|| format!("reading misspellings {}", spell_errors.display()))?;
        let pairs = parse_spell_errors(&errors)
            .with_context(|| format!("parsing {}", spell_errors.display()))?;

        let mut trainer = Trainer::new(frequency, config);
        trainer.train_all(&pairs)?;
        let model = trainer.finish(Some(&text.to_lowercase()))?;

        Ok(Self::new(model, config))
    }

    /// `correction` computes the most probable spelling correction for `word`.
    ///
    /// Known words are returned unchanged. `None` means no known word one edit away has a
    /// positive score.
    ///
    /// # Arguments
    ///
    /// * `word` - A word.
    ///
    /// # Example
    ///
    /// ```
    /// use spell::{Config, ConfusionTables, FrequencyModel, Model, SpellingCorrector};
    ///
    /// let vocab: FrequencyModel = vec![("cat", 10), ("bat", 50)].into_iter().collect();
    /// let config = Config { smoothing: true, ..Config::default() };
    /// let sc = SpellingCorrector::new(Model::new(vocab, ConfusionTables::new()), &config);
    ///
    /// assert_eq!(sc.correction("cat").as_deref(), Some("cat"));
    /// assert_eq!(sc.correction("hat").as_deref(), Some("bat"));
    /// assert_eq!(sc.correction("zzzz"), None);
    /// ```
    #[must_use]
    pub fn correction(&self, word: &str) -> Option<String> {
        if self.model.frequency().contains(word) {
            return Some(word.to_string());
        }

        let candidates = self.candidates(word);
        self.scorer()
            .select(&candidates)
            .map(|candidate| candidate.word.clone())
    }

    /// `candidates` generates the known words one edit away from `word`.
    ///
    /// # Arguments
    ///
    /// * `word` - A word.
    #[must_use]
    pub fn candidates(&self, word: &str) -> Vec<Candidate> {
        candidates::generate(word, self.model.frequency(), &self.alphabet)
    }

    /// `p` computes a probability of `word`.
    ///
    /// # Arguments
    ///
    /// * `word` - A word.
    #[must_use]
    pub fn p(&self, word: &str) -> f64 {
        self.model.frequency().prior(word)
    }

    /// `model` is the trained state behind this corrector.
    #[must_use]
    pub fn model(&self) -> &Model {
        &self.model
    }

    fn scorer(&self) -> Scorer<'_> {
        Scorer::new(
            self.model.frequency(),
            self.model.confusion(),
            self.smoothing,
        )
    }
}

/// `accuracy` is the share of positions where the prediction equals the expected word.
/// Unresolved predictions count as wrong.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn accuracy(expected: &[String], predicted: &[Option<String>]) -> f64 {
    if expected.is_empty() {
        return 0.0;
    }

    let correct = expected
        .iter()
        .zip(predicted)
        .filter(|(actual, predict)| predict.as_deref() == Some(actual.as_str()))
        .count();
    correct as f64 / expected.len() as f64
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn corrector(words: Vec<(&str, u64)>, pairs: &str, config: &Config) -> SpellingCorrector {
        let vocab: FrequencyModel = words.into_iter().collect();
        let mut trainer = Trainer::new(vocab, config);
        trainer
            .train_all(&parse_spell_errors(pairs).unwrap())
            .unwrap();
        SpellingCorrector::new(trainer.finish(None).unwrap(), config)
    }

    #[test]
    fn known_words_are_returned_unchanged() {
        let sc = corrector(vec![("the", 100), ("teh", 1)], "the: teh*50", &Config::default());
        assert_eq!(sc.correction("teh").as_deref(), Some("teh"));
        assert_eq!(sc.correction("the").as_deref(), Some("the"));
    }

    #[test]
    fn untrained_errors_are_unresolved_without_smoothing() {
        let sc = corrector(vec![("the", 100), ("that", 10)], "the: teh", &Config::default());
        assert_eq!(sc.correction("teh").as_deref(), Some("the"));
        assert_eq!(sc.correction("tha"), None);
        assert_eq!(sc.correction("xyzzy"), None);
    }

    #[test]
    fn error_model_can_outweigh_the_prior() {
        // "thw" is one substitution from both; only one of them was ever typed that way.
        let words = vec![("the", 100), ("thy", 100), ("was", 10)];
        let sc = corrector(words.clone(), "the: thw*3", &Config::default());
        assert_eq!(sc.correction("thw").as_deref(), Some("the"));

        let sc = corrector(words, "thy: thw*3", &Config::default());
        assert_eq!(sc.correction("thw").as_deref(), Some("thy"));
    }

    #[test]
    fn doubled_letters_use_the_trained_pair() {
        let words = vec![("hello", 10), ("bat", 10), ("help", 5)];
        let sc = corrector(words, "hello: helo\nbat: batt", &Config::default());

        let found = sc.candidates("helo");
        let hello = found.iter().find(|c| c.word == "hello").unwrap();
        assert_eq!((hello.op, hello.pair), (EditOp::Deletion, ('l', 'l')));
        assert_eq!(sc.correction("helo").as_deref(), Some("hello"));

        let found = sc.candidates("batt");
        assert_eq!((found[0].op, found[0].pair), (EditOp::Insertion, ('t', 't')));
        assert_eq!(sc.correction("batt").as_deref(), Some("bat"));
    }

    #[test]
    fn candidates_and_prior() {
        let sc = corrector(vec![("the", 3), ("tea", 1)], "", &Config::default());
        assert!((sc.p("the") - 0.75).abs() < 1e-12);
        let words: Vec<String> = sc.candidates("teh").into_iter().map(|c| c.word).collect();
        assert_eq!(words, vec!["tea", "the"]);
    }

    #[test]
    fn accuracy_counts_exact_matches() {
        let expected = vec!["the".to_string(), "cat".to_string(), "dog".to_string(), "a".to_string()];
        let predicted = vec![Some("the".to_string()), None, Some("dig".to_string()), Some("a".to_string())];
        assert!((accuracy(&expected, &predicted) - 0.5).abs() < 1e-12);
        assert_eq!(accuracy(&[], &[]), 0.0);
    }

    #[test]
    fn from_files_trains_end_to_end() {
        let mut corpus = tempfile::NamedTempFile::new().unwrap();
        writeln!(corpus, "The receiver will receive it. The end!").unwrap();
        writeln!(corpus, "Did they receive 2 letters?").unwrap();

        let mut errors = tempfile::NamedTempFile::new().unwrap();
        writeln!(errors, "receive: recieve*2, receve").unwrap();

        let sc = SpellingCorrector::from_files(corpus.path(), errors.path(), &Config::default())
            .unwrap();
        assert_eq!(sc.model().frequency().count("receive"), 2);
        assert_eq!(sc.correction("recieve").as_deref(), Some("receive"));
        assert_eq!(sc.correction("receve").as_deref(), Some("receive"));

        let config = Config {
            normalize: true,
            ..Config::default()
        };
        let sc = SpellingCorrector::from_files(corpus.path(), errors.path(), &config).unwrap();
        assert!(sc.model().confusion().is_normalized());
        assert_eq!(sc.correction("recieve").as_deref(), Some("receive"));
    }
}

//! Word counts and the character statistics derived from them.

use std::collections::HashMap;

use regex::Regex;

use crate::alphabet::BOUNDARY;
use crate::CharPair;

/// `Tokenizer` splits raw corpus lines into lowercase word tokens.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    separators: Regex,
    word: Regex,
}

impl Tokenizer {
    /// `new` compiles the separator and word expressions.
    ///
    /// # Errors
    ///
    /// Returns error if an invalid expression is given to `regex::Regex::new`.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            separators: Regex::new(r#"[0-9.?!",'\-_;:=()\[\]/#><$*]"#)?,
            word: Regex::new(r"\w+")?,
        })
    }

    /// `tokenize` blanks out digits and punctuation, lowercases `line` and returns its word
    /// runs.
    #[must_use]
    pub fn tokenize(&self, line: &str) -> Vec<String> {
        let cleaned = self.separators.replace_all(line, " ").to_lowercase();
        self.word
            .find_iter(&cleaned)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// `CharCounts` holds unigram and bigram occurrence counts, the bigrams including pairs that
/// start at the word boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharCounts {
    unigrams: HashMap<char, u64>,
    bigrams: HashMap<CharPair, u64>,
}

impl CharCounts {
    /// `from_vocabulary` weights the characters of every word by that word's count.
    pub fn from_vocabulary<'a>(words: impl IntoIterator<Item = (&'a str, u64)>) -> Self {
        let mut counts = Self::default();
        for (word, weight) in words {
            counts.add_word(word, weight);
        }
        counts
    }

    /// `from_text` counts every whitespace-delimited run of `text` once, after lowercasing.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let lower = text.to_lowercase();
        Self::from_vocabulary(lower.split_whitespace().map(|run| (run, 1)))
    }

    fn add_word(&mut self, word: &str, weight: u64) {
        *self.unigrams.entry(BOUNDARY).or_insert(0) += weight;

        let mut prev = BOUNDARY;
        for curr in word.chars() {
            *self.unigrams.entry(curr).or_insert(0) += weight;
            *self.bigrams.entry((prev, curr)).or_insert(0) += weight;
            prev = curr;
        }
    }

    /// `unigram` is the occurrence count of `c`, zero when unseen.
    #[must_use]
    pub fn unigram(&self, c: char) -> u64 {
        self.unigrams.get(&c).copied().unwrap_or(0)
    }

    /// `bigram` is the occurrence count of the adjacent pair, zero when unseen.
    #[must_use]
    pub fn bigram(&self, pair: CharPair) -> u64 {
        self.bigrams.get(&pair).copied().unwrap_or(0)
    }
}

/// `FrequencyModel` is the language prior: how often each word occurs in the training corpus.
#[derive(Debug, Clone, Default)]
pub struct FrequencyModel {
    words: HashMap<String, u64>,
    total: u64,
    chars: CharCounts,
}

impl FrequencyModel {
    /// `from_text` tokenizes every line of `text` and counts the resulting words.
    ///
    /// # Errors
    ///
    /// Returns error if the tokenizer fails to build.
    pub fn from_text(text: &str) -> Result<Self, regex::Error> {
        let tokenizer = Tokenizer::new()?;
        Ok(text
            .lines()
            .flat_map(|line| tokenizer.tokenize(line))
            .map(|word| (word, 1))
            .collect())
    }

    /// `count` is the number of times `word` was seen, zero when unseen.
    #[must_use]
    pub fn count(&self, word: &str) -> u64 {
        self.words.get(word).copied().unwrap_or(0)
    }

    /// `contains` reports whether `word` was seen at least once.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.count(word) > 0
    }

    /// `prior` is `count(word) / total`, zero for an empty model.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn prior(&self, word: &str) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(word) as f64 / self.total as f64
    }

    /// `total` is the number of word tokens counted.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// `len` is the number of distinct words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// `is_empty` reports whether no word was counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// `chars` are the unigram and bigram counts weighted by word frequency.
    #[must_use]
    pub fn chars(&self) -> &CharCounts {
        &self.chars
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for FrequencyModel {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut words: HashMap<String, u64> = HashMap::new();
        for (word, count) in iter {
            let word = word.into();
            if word.is_empty() {
                continue;
            }
            *words.entry(word).or_insert(0) += count;
        }

        let total = words.values().sum();
        let chars = CharCounts::from_vocabulary(words.iter().map(|(w, c)| (w.as_str(), *c)));
        Self {
            words,
            total,
            chars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_strips_digits_and_punctuation() {
        let tokenizer = Tokenizer::new().unwrap();
        assert_eq!(
            tokenizer.tokenize("The 2 cats' well-known (tricks)!"),
            vec!["the", "cats", "well", "known", "tricks"]
        );
        assert!(tokenizer.tokenize("42 ... ?!").is_empty());
    }

    #[test]
    fn from_text_counts_words() {
        let model = FrequencyModel::from_text("the cat\nThe dog, the end.").unwrap();
        assert_eq!(model.count("the"), 3);
        assert_eq!(model.count("cat"), 1);
        assert_eq!(model.count("bird"), 0);
        assert_eq!(model.total(), 6);
        assert_eq!(model.len(), 4);
    }

    #[test]
    fn prior_is_relative_frequency() {
        let model: FrequencyModel = vec![("the", 100), ("that", 10)].into_iter().collect();
        assert!((model.prior("the") - 100.0 / 110.0).abs() < 1e-12);
        assert_eq!(model.prior("teh"), 0.0);
        assert_eq!(FrequencyModel::default().prior("the"), 0.0);
    }

    #[test]
    fn zero_counts_are_not_known() {
        let model: FrequencyModel = vec![("receive", 50), ("recieve", 0)].into_iter().collect();
        assert!(model.contains("receive"));
        assert!(!model.contains("recieve"));
    }

    #[test]
    fn char_counts_are_weighted_by_word_count() {
        let model: FrequencyModel = vec![("the", 100), ("that", 10)].into_iter().collect();
        let chars = model.chars();
        assert_eq!(chars.unigram(BOUNDARY), 110);
        assert_eq!(chars.unigram('t'), 100 + 20);
        assert_eq!(chars.unigram('h'), 110);
        assert_eq!(chars.bigram((BOUNDARY, 't')), 110);
        assert_eq!(chars.bigram(('h', 'e')), 100);
        assert_eq!(chars.bigram(('h', 'a')), 10);
        assert_eq!(chars.bigram(('e', 'h')), 0);
    }

    #[test]
    fn char_counts_from_text_match_vocabulary_weighting() {
        let from_text = CharCounts::from_text("ab ab\nAc");
        let from_vocab = CharCounts::from_vocabulary(vec![("ab", 2), ("ac", 1)]);
        assert_eq!(from_text, from_vocab);
    }
}

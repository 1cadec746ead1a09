//! Working alphabets and the start-of-word sentinel.

/// Sentinel standing in for "start of word" in character pairs.
pub const BOUNDARY: char = '#';

/// Denominator added to a likelihood ratio when additive smoothing is enabled.
pub const SMOOTHING_DENOMINATOR: f64 = 26.0;

const LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

/// `Alphabet` is the set of characters tried when generating deletion and substitution
/// candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    /// `standard` is the lowercase letters plus hyphen, underscore and period.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_chars(LETTERS.chars().chain("-_.".chars()))
    }

    /// `extended` is the standard alphabet with the question mark added.
    #[must_use]
    pub fn extended() -> Self {
        Self::from_chars(LETTERS.chars().chain("-_.?".chars()))
    }

    /// `letters` is `a` through `z` only.
    #[must_use]
    pub fn letters() -> Self {
        Self::from_chars(LETTERS.chars())
    }

    /// `from_chars` builds an alphabet from arbitrary characters, dropping repeats while
    /// keeping first-seen order.
    pub fn from_chars(chars: impl IntoIterator<Item = char>) -> Self {
        let mut out: Vec<char> = Vec::new();
        for c in chars {
            if !out.contains(&c) {
                out.push(c);
            }
        }
        Self { chars: out }
    }

    /// `chars` iterates the alphabet in insertion order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }

    /// `contains` reports whether `c` belongs to the alphabet.
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    /// `len` is the number of characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// `is_empty` reports whether the alphabet has no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::standard()
    }
}

//! Known words one edit away from a query.

use std::collections::HashSet;

use crate::alignment::EditOp;
use crate::alphabet::{Alphabet, BOUNDARY};
use crate::confusion::first_difference;
use crate::frequency::FrequencyModel;
use crate::CharPair;

/// `Candidate` is a known word one edit away from a query, tagged with the edit that turns
/// it into the query and the pair that keys the edit's confusion table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The known word.
    pub word: String,
    /// The edit that produced the query from `word`.
    pub op: EditOp,
    /// The key into the confusion table of `op`.
    pub pair: CharPair,
}

/// `generate` returns every known word reachable from `query` by one insertion, deletion,
/// substitution or adjacent transposition.
///
/// Candidates come out insertions first, then deletions, substitutions and transpositions,
/// each scanned left to right over the split points, and each word appears once. A word
/// reachable several ways, like `hello` from `helo`, is tagged with the edit training charges
/// for that pair of words, so its pair always keys what the tables learned.
#[must_use]
pub fn generate(query: &str, vocabulary: &FrequencyModel, alphabet: &Alphabet) -> Vec<Candidate> {
    let chars: Vec<char> = query.chars().collect();
    let splits = (0..=chars.len())
        .map(|i| (&chars[..i], &chars[i..]))
        .collect::<Vec<(&[char], &[char])>>();

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    let mut emit = |word: String, op: EditOp, pair: CharPair| {
        if !vocabulary.contains(&word) || seen.contains(&word) {
            return;
        }
        // Runs of a repeated letter give several splits; training charges the last one.
        let (op, pair) = first_difference(&word, query)
            .map_or((op, pair), |edit| (edit.op, edit.pair));
        log::trace!("candidate {} via {:?} {:?}", word, op, pair);
        seen.insert(word.clone());
        out.push(Candidate { word, op, pair });
    };

    // The query has an extra character: drop it.
    for &(l, r) in splits.iter().filter(|(_, r)| !r.is_empty()) {
        emit(join(&[l, &r[1..]]), EditOp::Insertion, (preceding(l), r[0]));
    }

    // The query lost a character: put one back.
    for &(l, r) in &splits {
        for c in alphabet.chars() {
            emit(join(&[l, &[c][..], r]), EditOp::Deletion, (preceding(l), c));
        }
    }

    for &(l, r) in splits.iter().filter(|(_, r)| !r.is_empty()) {
        for c in alphabet.chars().filter(|&c| c != r[0]) {
            emit(join(&[l, &[c][..], &r[1..]]), EditOp::Substitution, (r[0], c));
        }
    }

    for &(l, r) in splits.iter().filter(|(_, r)| r.len() > 1 && r[0] != r[1]) {
        emit(join(&[l, &[r[1], r[0]][..], &r[2..]]), EditOp::Transposition, (r[1], r[0]));
    }

    out
}

fn preceding(prefix: &[char]) -> char {
    prefix.last().copied().unwrap_or(BOUNDARY)
}

fn join(parts: &[&[char]]) -> String {
    parts.iter().flat_map(|part| part.iter()).collect()
}

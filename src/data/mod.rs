pub mod segmentation;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, InputContext, Result};

/// Bitmask over word-set positions; bit `i` stands for the `i`-th word
pub type Signature = u32;

/// Document identifier, `[0, number_of_documents)`
pub type DocId = u32;

/// Mask with the lowest `word_count` bits set
#[inline]
pub fn full_signature(word_count: usize) -> Signature {
    if word_count == 0 {
        0
    } else if word_count >= Signature::BITS as usize {
        Signature::MAX
    } else {
        Signature::MAX >> (Signature::BITS as usize - word_count)
    }
}

/// Which words act as segments and which as conditions for a coherence formula.
///
/// `segments[i]` is scored against every mask in `conditions[i]`,
/// so a one-pair definition is `segments = [s]`, `conditions = [[c]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentationDefinition {
    pub segments: Vec<Signature>,
    pub conditions: Vec<Vec<Signature>>,
}

impl SegmentationDefinition {
    pub fn new(segments: Vec<Signature>, conditions: Vec<Vec<Signature>>) -> Self {
        Self { segments, conditions }
    }

    /// One segment scored against one condition
    pub fn single(segment: Signature, condition: Signature) -> Self {
        Self {
            segments: vec![segment],
            conditions: vec![vec![condition]],
        }
    }

    /// Number of (segment, condition) pairs
    pub fn pair_count(&self) -> usize {
        self.conditions.iter().map(|c| c.len()).sum()
    }

    /// Iterate (segment, condition) pairs in definition order
    pub fn pairs(&self) -> impl Iterator<Item = (Signature, Signature)> + '_ {
        self.segments
            .iter()
            .zip(self.conditions.iter())
            .flat_map(|(&segment, conditions)| conditions.iter().map(move |&condition| (segment, condition)))
    }

    /// Signatures a formula reads from the counts: every segment, every
    /// condition and every `segment | condition`. Sorted, no repeats.
    pub fn needed_counts(&self) -> Vec<Signature> {
        let mut needed: Vec<Signature> = Vec::with_capacity(self.segments.len() + 2 * self.pair_count());
        needed.extend(self.segments.iter().copied());
        for (segment, condition) in self.pairs() {
            needed.push(condition);
            needed.push(segment | condition);
        }
        needed.sort_unstable();
        needed.dedup();
        needed
    }

    /// Check the definition against the size of its paired word set
    pub(crate) fn validate(&self, word_count: usize, index: usize) -> Result<()> {
        if self.segments.len() != self.conditions.len() {
            return Err(Error::invalid(
                InputContext::Definition(index),
                format!(
                    "{} segments but {} condition lists",
                    self.segments.len(),
                    self.conditions.len()
                ),
            ));
        }
        let allowed = full_signature(word_count);
        let all_masks = self
            .segments
            .iter()
            .chain(self.conditions.iter().flatten());
        for &mask in all_masks {
            if mask & !allowed != 0 {
                return Err(Error::invalid(
                    InputContext::Definition(index),
                    format!("mask {:#b} references words beyond a set of {}", mask, word_count),
                ));
            }
        }
        Ok(())
    }
}

/// Counts for one segmentation definition.
///
/// `counts[s]` is the number of documents containing at least every word whose
/// bit is set in `s`. `counts[0]` carries no meaning.
/// Definitions over the same word set share one counts array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountedSubsets {
    pub segments: Vec<Signature>,
    pub conditions: Vec<Vec<Signature>>,
    pub counts: Arc<[u32]>,
}

impl CountedSubsets {
    pub fn new(definition: &SegmentationDefinition, counts: Arc<[u32]>) -> Self {
        Self {
            segments: definition.segments.clone(),
            conditions: definition.conditions.clone(),
            counts,
        }
    }

    /// Size of the word set the counts were built for.
    /// A record whose counts length is not a power of two reports the largest
    /// word count it can fully index; empty counts report 0.
    pub fn word_count(&self) -> usize {
        self.counts.len().checked_ilog2().map_or(0, |bits| bits as usize)
    }

    pub fn full_signature(&self) -> Signature {
        full_signature(self.word_count())
    }

    /// Documents containing at least the words of `signature`; `None` if out of range
    #[inline]
    pub fn count(&self, signature: Signature) -> Option<u32> {
        self.counts.get(signature as usize).copied()
    }

    /// `count / number_of_documents`
    pub fn probability(&self, signature: Signature, number_of_documents: u32) -> Option<f64> {
        if number_of_documents == 0 {
            return None;
        }
        self.count(signature)
            .map(|count| count as f64 / number_of_documents as f64)
    }

    /// True when `other` was built from the same counts allocation
    pub fn shares_counts_with(&self, other: &CountedSubsets) -> bool {
        Arc::ptr_eq(&self.counts, &other.counts)
    }
}

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::config::MAX_WORDS;
use crate::data::{full_signature, SegmentationDefinition, Signature};
use crate::error::{Error, InputContext};

/// Segmentation schemes
/// Each scheme splits a word set of size `W` into (segment, condition) pairs.
/// Segments without any condition are left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segmentation {
    /// each word vs each other word
    OneOne,
    /// each word vs each earlier word
    OnePreceding,
    /// each word vs each later word
    OneSucceeding,
    /// each word vs all other words together
    OneAll,
    /// each word vs every non-empty subset of the other words
    /// limited to 16 words
    OneAny,
    /// each word vs the whole set
    OneSet,
    /// every non-empty subset vs every non-empty disjoint subset
    /// limited to 12 words
    AnyAny,
}

impl Segmentation {
    pub const ALL: [Segmentation; 7] = [
        Segmentation::OneOne,
        Segmentation::OnePreceding,
        Segmentation::OneSucceeding,
        Segmentation::OneAll,
        Segmentation::OneAny,
        Segmentation::OneSet,
        Segmentation::AnyAny,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Segmentation::OneOne => "one-one",
            Segmentation::OnePreceding => "one-pre",
            Segmentation::OneSucceeding => "one-suc",
            Segmentation::OneAll => "one-all",
            Segmentation::OneAny => "one-any",
            Segmentation::OneSet => "one-set",
            Segmentation::AnyAny => "any-any",
        }
    }

    /// Largest word set this scheme accepts.
    /// Schemes whose pair count grows exponentially get a tighter cap than `MAX_WORDS`.
    pub fn max_words(&self) -> u32 {
        match self {
            Segmentation::AnyAny => ANY_ANY_MAX_WORDS,
            Segmentation::OneAny => ONE_ANY_MAX_WORDS,
            _ => MAX_WORDS,
        }
    }

    /// Build the definition for a word set of `word_count` words.
    /// Callers are expected to respect `max_words`; the determiner does.
    pub fn definition(&self, word_count: usize) -> SegmentationDefinition {
        let full = full_signature(word_count);
        let pairs: Vec<(Signature, Vec<Signature>)> = match self {
            Segmentation::AnyAny => (1..=full)
                .map(|segment| (segment, non_empty_subsets(full & !segment)))
                .collect(),
            Segmentation::OneOne => per_word(word_count, |i| {
                (0..word_count).filter(|&j| j != i).map(bit).collect()
            }),
            Segmentation::OnePreceding => per_word(word_count, |i| (0..i).map(bit).collect()),
            Segmentation::OneSucceeding => {
                per_word(word_count, |i| (i + 1..word_count).map(bit).collect())
            }
            Segmentation::OneAll => per_word(word_count, |i| {
                let rest = full & !bit(i);
                if rest == 0 { Vec::new() } else { vec![rest] }
            }),
            Segmentation::OneAny => per_word(word_count, |i| non_empty_subsets(full & !bit(i))),
            Segmentation::OneSet => per_word(word_count, |_| vec![full]),
        };

        let (segments, conditions): (Vec<Signature>, Vec<Vec<Signature>>) = pairs
            .into_iter()
            .filter(|(_, conds)| !conds.is_empty())
            .unzip();
        SegmentationDefinition::new(segments, conditions)
    }
}

/// any-any yields about 3^W pairs
const ANY_ANY_MAX_WORDS: u32 = 12;
/// one-any yields W * 2^(W-1) pairs
const ONE_ANY_MAX_WORDS: u32 = 16;

/// One single-word segment per position
fn per_word<F>(word_count: usize, conditions_of: F) -> Vec<(Signature, Vec<Signature>)>
where
    F: Fn(usize) -> Vec<Signature>,
{
    (0..word_count).map(|i| (bit(i), conditions_of(i))).collect()
}

#[inline]
fn bit(i: usize) -> Signature {
    1 << i
}

/// Every non-empty sub-mask of `mask`, ascending
fn non_empty_subsets(mask: Signature) -> Vec<Signature> {
    let mut subsets = Vec::with_capacity((1usize << mask.count_ones()).saturating_sub(1));
    let mut sub = mask;
    while sub > 0 {
        subsets.push(sub);
        sub = (sub - 1) & mask;
    }
    subsets.reverse();
    subsets
}

impl fmt::Display for Segmentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Segmentation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Segmentation::ALL
            .iter()
            .copied()
            .find(|seg| seg.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::invalid(InputContext::Request, format!("unknown segmentation \"{}\"", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_one_pairs_every_word_with_every_other() {
        let def = Segmentation::OneOne.definition(3);
        assert_eq!(def.segments, vec![0b001, 0b010, 0b100]);
        assert_eq!(
            def.conditions,
            vec![vec![0b010, 0b100], vec![0b001, 0b100], vec![0b001, 0b010]]
        );
    }

    #[test]
    fn one_preceding_and_succeeding() {
        let def = Segmentation::OnePreceding.definition(3);
        assert_eq!(def.segments, vec![0b010, 0b100]);
        assert_eq!(def.conditions, vec![vec![0b001], vec![0b001, 0b010]]);

        let def = Segmentation::OneSucceeding.definition(3);
        assert_eq!(def.segments, vec![0b001, 0b010]);
        assert_eq!(def.conditions, vec![vec![0b010, 0b100], vec![0b100]]);
    }

    #[test]
    fn one_all_one_set_one_any() {
        let def = Segmentation::OneAll.definition(3);
        assert_eq!(def.conditions, vec![vec![0b110], vec![0b101], vec![0b011]]);

        let def = Segmentation::OneSet.definition(2);
        assert_eq!(def.segments, vec![0b01, 0b10]);
        assert_eq!(def.conditions, vec![vec![0b11], vec![0b11]]);

        let def = Segmentation::OneAny.definition(3);
        assert_eq!(def.conditions[0], vec![0b010, 0b100, 0b110]);
    }

    #[test]
    fn any_any_uses_disjoint_subsets() {
        let def = Segmentation::AnyAny.definition(3);
        // 0b111 has no disjoint partner
        assert_eq!(def.segments, vec![0b001, 0b010, 0b011, 0b100, 0b101, 0b110]);
        for (segment, condition) in def.pairs() {
            assert_eq!(segment & condition, 0);
            assert_ne!(condition, 0);
        }
        assert_eq!(def.pair_count(), 12);
    }

    #[test]
    fn degenerate_word_sets() {
        for seg in Segmentation::ALL {
            let def = seg.definition(0);
            assert!(def.segments.is_empty(), "{seg} on empty set");
        }
        assert!(Segmentation::OneOne.definition(1).segments.is_empty());
        assert_eq!(Segmentation::OneSet.definition(1).pair_count(), 1);
    }

    #[test]
    fn exponential_schemes_have_tighter_limits() {
        assert_eq!(Segmentation::AnyAny.max_words(), 12);
        assert_eq!(Segmentation::OneAny.max_words(), 16);
        assert_eq!(Segmentation::OnePreceding.max_words(), MAX_WORDS);
        assert_eq!(Segmentation::AnyAny.definition(12).pair_count(), 3usize.pow(12) - 2usize.pow(13) + 1);
    }

    #[test]
    fn names_round_trip() {
        for seg in Segmentation::ALL {
            assert_eq!(seg.to_string().parse::<Segmentation>().unwrap(), seg);
        }
        assert!("one-two".parse::<Segmentation>().is_err());
    }

    #[test]
    fn definitions_are_valid_for_their_size() {
        for seg in Segmentation::ALL {
            for w in 0..6 {
                assert!(seg.definition(w).validate(w, 0).is_ok());
            }
        }
    }
}

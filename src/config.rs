use serde::{Deserialize, Serialize};

/// Largest word-set size a signature can describe.
/// Signatures are `u32`; one bit stays free so `1 << W` never overflows a signed int.
pub const MAX_WORDS: u32 = 30;

/// How exact signature counts are turned into "at least" counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Propagation {
    /// Pairwise pass over every (subset, superset) pair, O(4^W)
    Naive,
    /// Bit-by-bit superset sums, O(W * 2^W)
    SubsetSum,
}

impl Default for Propagation {
    fn default() -> Self {
        Propagation::SubsetSum
    }
}

/// Determiner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeterminerConfig {
    pub propagation: Propagation,
    /// upper bound on accepted word-set size, clamped to `MAX_WORDS`
    pub max_words: u32,
    /// count distinct word sets of one request on the rayon pool
    pub parallel: bool,
}

impl Default for DeterminerConfig {
    fn default() -> Self {
        Self {
            propagation: Propagation::default(),
            max_words: MAX_WORDS,
            parallel: false,
        }
    }
}

impl DeterminerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_propagation(mut self, propagation: Propagation) -> Self {
        self.propagation = propagation;
        self
    }

    pub fn with_max_words(mut self, max_words: u32) -> Self {
        self.max_words = max_words.min(MAX_WORDS);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Effective word-set limit
    /// (deserialized configs may carry values above the cap)
    #[inline]
    pub fn word_limit(&self) -> u32 {
        self.max_words.min(MAX_WORDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = DeterminerConfig::default();
        assert_eq!(config.propagation, Propagation::SubsetSum);
        assert_eq!(config.word_limit(), MAX_WORDS);
        assert!(!config.parallel);
    }

    #[test]
    fn max_words_is_clamped() {
        let config = DeterminerConfig::new().with_max_words(64);
        assert_eq!(config.max_words, MAX_WORDS);

        let config = DeterminerConfig {
            max_words: 40,
            ..DeterminerConfig::default()
        };
        assert_eq!(config.word_limit(), MAX_WORDS);

        let config = DeterminerConfig::new().with_max_words(10);
        assert_eq!(config.word_limit(), 10);
    }
}

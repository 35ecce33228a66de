pub mod corpus;
pub mod counting;

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::config::{DeterminerConfig, Propagation};
use crate::data::{segmentation::Segmentation, CountedSubsets, DocId, SegmentationDefinition};
use crate::error::{Error, InputContext, Result};
use crate::utils::sort::sort_dedup_postings;
use self::corpus::CorpusAdapter;
use self::counting::{exact_counts, propagate};

/// Request-scoped word -> postings buffers, filled by the adapter in one call
type PostingMap = IndexMap<String, Vec<DocId>>;

/// Subset document-frequency determiner.
///
/// For each word set it merges the words' posting lists into exact per-signature
/// document counts and propagates them into "at least these words" counts.
/// Holds no state between requests apart from the corpus adapter.
#[derive(Debug, Clone)]
pub struct SubsetFrequencyDeterminer<A>
where
    A: CorpusAdapter,
{
    corpus: A,
    config: DeterminerConfig,
}

impl<A> SubsetFrequencyDeterminer<A>
where
    A: CorpusAdapter,
{
    /// Create a new determiner with the default configuration
    pub fn new(corpus: A) -> Self {
        Self::with_config(corpus, DeterminerConfig::default())
    }

    pub fn with_config(corpus: A, config: DeterminerConfig) -> Self {
        Self { corpus, config }
    }

    pub fn config(&self) -> &DeterminerConfig {
        &self.config
    }

    pub fn corpus(&self) -> &A {
        &self.corpus
    }

    /// Number of documents reported by the corpus adapter
    pub fn number_of_documents(&self) -> Result<u32> {
        self.corpus.number_of_documents()
    }

    /// Count every subset of every word set.
    ///
    /// `definitions[i]` belongs to `word_sets[i]`; one `CountedSubsets` is
    /// returned per definition, in input order. Identical word sets are counted
    /// once and share their counts array.
    ///
    /// # Errors
    /// * `InvalidInput` - mismatched lengths, oversized word sets, masks outside
    ///   their word set, or a corpus without documents
    /// * `AdapterFailure` - the adapter failed or handed out ids outside the corpus
    pub fn determine_counts<W, S>(
        &self,
        word_sets: &[W],
        definitions: &[SegmentationDefinition],
    ) -> Result<Vec<CountedSubsets>>
    where
        W: AsRef<[S]>,
        S: AsRef<str>,
    {
        if word_sets.len() != definitions.len() {
            return Err(Error::invalid(
                InputContext::Request,
                format!(
                    "{} word sets but {} segmentation definitions",
                    word_sets.len(),
                    definitions.len()
                ),
            ));
        }
        self.check_word_set_sizes(word_sets, self.config.word_limit())?;
        for (index, (words, definition)) in word_sets.iter().zip(definitions).enumerate() {
            definition.validate(words.as_ref().len(), index)?;
        }

        let doc_num = self.corpus.number_of_documents()?;
        if doc_num < 1 {
            return Err(Error::invalid(
                InputContext::Request,
                "the corpus reports no documents",
            ));
        }

        let postings = self.retrieve_postings(word_sets, doc_num)?;
        debug!(
            word_sets = word_sets.len(),
            distinct_words = postings.len(),
            documents = doc_num,
            "determining subset counts"
        );

        // 同じ単語集合は一度だけ数える
        let mut distinct: IndexSet<Vec<&str>> = IndexSet::new();
        let slots: Vec<usize> = word_sets
            .iter()
            .map(|words| {
                let key: Vec<&str> = words.as_ref().iter().map(|w| w.as_ref()).collect();
                distinct.insert_full(key).0
            })
            .collect();
        let distinct: Vec<Vec<&str>> = distinct.into_iter().collect();

        let propagation = self.config.propagation;
        let shared_counts: Vec<Arc<[u32]>> = if self.config.parallel {
            distinct
                .par_iter()
                .map(|words| count_word_set(words, &postings, propagation))
                .collect()
        } else {
            distinct
                .iter()
                .map(|words| count_word_set(words, &postings, propagation))
                .collect()
        };

        Ok(definitions
            .iter()
            .zip(slots)
            .map(|(definition, slot)| CountedSubsets::new(definition, Arc::clone(&shared_counts[slot])))
            .collect())
    }

    /// Count every subset of every word set, building each word set's
    /// definition from a segmentation scheme.
    pub fn determine_counts_with<W, S>(
        &self,
        word_sets: &[W],
        segmentation: Segmentation,
    ) -> Result<Vec<CountedSubsets>>
    where
        W: AsRef<[S]>,
        S: AsRef<str>,
    {
        // sizes first: schemes like any-any grow with 3^W
        let limit = self.config.word_limit().min(segmentation.max_words());
        self.check_word_set_sizes(word_sets, limit)?;
        let definitions: Vec<SegmentationDefinition> = word_sets
            .iter()
            .map(|words| segmentation.definition(words.as_ref().len()))
            .collect();
        self.determine_counts(word_sets, &definitions)
    }

    fn check_word_set_sizes<W, S>(&self, word_sets: &[W], limit: u32) -> Result<()>
    where
        W: AsRef<[S]>,
        S: AsRef<str>,
    {
        let limit = limit as usize;
        for (index, words) in word_sets.iter().enumerate() {
            let len = words.as_ref().len();
            if len > limit {
                return Err(Error::invalid(
                    InputContext::WordSet(index),
                    format!("{} words exceed the limit of {}", len, limit),
                ));
            }
        }
        Ok(())
    }

    /// One batched adapter call for the union of all words.
    /// Lists come back sorted, repeat-free and bounded by the document count.
    fn retrieve_postings<W, S>(&self, word_sets: &[W], doc_num: u32) -> Result<PostingMap>
    where
        W: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut postings = PostingMap::new();
        for words in word_sets {
            for word in words.as_ref() {
                let word = word.as_ref();
                if !postings.contains_key(word) {
                    postings.insert(word.to_owned(), Vec::new());
                }
            }
        }

        self.corpus.fill_postings(&mut postings)?;

        for (word, list) in postings.iter_mut() {
            sort_dedup_postings(list);
            if let Some(&last) = list.last() {
                if last >= doc_num {
                    return Err(Error::AdapterFailure(format!(
                        "postings of \"{}\" contain document {} but the corpus has {} documents",
                        word, last, doc_num
                    )));
                }
            }
        }
        Ok(postings)
    }
}

/// Exact counts + propagation for one word set.
/// Repeated words borrow the same list, so their bits always move together.
fn count_word_set(words: &[&str], postings: &PostingMap, propagation: Propagation) -> Arc<[u32]> {
    let lists: Vec<&[DocId]> = words
        .iter()
        .map(|word| postings.get(*word).map(Vec::as_slice).unwrap_or(&[]))
        .collect();

    let mut counts = exact_counts(&lists);
    trace!(
        words = words.len(),
        visited_documents = counts.iter().map(|&c| c as u64).sum::<u64>(),
        "merged postings"
    );
    propagate(&mut counts, propagation);
    Arc::from(counts)
}

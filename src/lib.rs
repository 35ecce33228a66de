/// This crate counts, for small word sets drawn from a corpus, how many documents
/// contain each combination of their words: the statistic coherence measures
/// (PMI, NPMI, UCI, UMass, ...) are computed from.
pub mod aggregation;
pub mod config;
pub mod data;
pub mod determiner;
pub mod error;
pub mod utils;

/// Subset Document-Frequency Determiner
/// The top-level struct of this crate.
/// Given word sets and one segmentation definition per word set, it returns one
/// `CountedSubsets` per definition.
///
/// Internally, per request, it:
/// - Collects the distinct words of all word sets
/// - Asks the corpus adapter for their postings in one batched call
/// - Sorts each posting list once
/// - Merges the lists of each word set into exact per-signature counts
/// - Propagates exact counts into "at least these words" counts
///
/// `SubsetFrequencyDeterminer<A>` has one generic parameter:
/// - `A`: Corpus adapter (e.g., `InMemoryCorpus`, `&InMemoryCorpus`, `Arc<dyn CorpusAdapter>`)
///
/// # Thread Safety
/// The determiner keeps no state between requests, so independent requests
/// may run concurrently as long as the adapter tolerates concurrent reads.
/// With `DeterminerConfig::parallel` set, distinct word sets of one request
/// are counted on the rayon thread pool.
pub use determiner::SubsetFrequencyDeterminer;

/// Corpus Adapter
/// The boundary to the corpus index.
/// It reports the number of documents and fills word -> document-id buffers.
///
/// `InMemoryCorpus` is a small boolean-document index implementing it, useful
/// for tests and for corpora that fit in memory.
pub use determiner::corpus::{CorpusAdapter, InMemoryCorpus};

/// Segmentation and Counted Subsets
/// - `Signature`: bitmask over word-set positions
/// - `SegmentationDefinition`: which signatures act as segments and which as conditions
/// - `CountedSubsets`: a definition together with the "at least" counts of its word set
/// - `Segmentation`: standard schemes (one-one, one-pre, one-suc, one-all, one-any, one-set, any-any)
pub use data::{segmentation::Segmentation, CountedSubsets, DocId, SegmentationDefinition, Signature};

/// Configuration
/// Propagation strategy, word-set size limit and parallelism.
pub use config::{DeterminerConfig, Propagation, MAX_WORDS};

/// Aggregation
/// Reduces per-pair coherence scores (optionally weighted) to one number.
///
/// Currently, the following strategies are supported:
/// - Arithmetic, geometric, harmonic and quadratic mean
/// - Median
/// - Min / Max
pub use aggregation::{summarize_unweighted, summarize_weighted, Aggregation};

/// Error types
pub use error::{Error, InputContext, Result};

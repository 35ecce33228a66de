use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::data::DocId;
use crate::error::{Error, Result};

/// Boolean-document view of a corpus.
///
/// The determiner asks for the document count once and fills every posting
/// buffer of a request in one batched `fill_postings` call.
/// Implementations must be safe for concurrent reads.
pub trait CorpusAdapter: Send + Sync {
    /// Number of documents in the corpus
    fn number_of_documents(&self) -> Result<u32>;

    /// Fill each word's (initially empty) buffer with the ids of the documents
    /// containing it. Order does not matter. Unknown words stay empty.
    fn fill_postings(&self, mapping: &mut IndexMap<String, Vec<DocId>>) -> Result<()>;
}

impl<T: CorpusAdapter + ?Sized> CorpusAdapter for &T {
    fn number_of_documents(&self) -> Result<u32> {
        (**self).number_of_documents()
    }

    fn fill_postings(&self, mapping: &mut IndexMap<String, Vec<DocId>>) -> Result<()> {
        (**self).fill_postings(mapping)
    }
}

impl<T: CorpusAdapter + ?Sized> CorpusAdapter for Box<T> {
    fn number_of_documents(&self) -> Result<u32> {
        (**self).number_of_documents()
    }

    fn fill_postings(&self, mapping: &mut IndexMap<String, Vec<DocId>>) -> Result<()> {
        (**self).fill_postings(mapping)
    }
}

impl<T: CorpusAdapter + ?Sized> CorpusAdapter for Arc<T> {
    fn number_of_documents(&self) -> Result<u32> {
        (**self).number_of_documents()
    }

    fn fill_postings(&self, mapping: &mut IndexMap<String, Vec<DocId>>) -> Result<()> {
        (**self).fill_postings(mapping)
    }
}

/// keep document count and word postings in memory
/// Each document is a set of words; ids are handed out in insertion order from 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryCorpus {
    /// number of documents added so far
    doc_num: u32,
    /// word -> ascending ids of the documents containing it
    postings: IndexMap<Box<str>, Vec<DocId>>,
}

impl InMemoryCorpus {
    /// Create a new instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from tokenized documents
    pub fn from_documents<I, D, T>(documents: I) -> Result<Self>
    where
        I: IntoIterator<Item = D>,
        D: AsRef<[T]>,
        T: AsRef<str>,
    {
        let mut corpus = Self::new();
        for doc in documents {
            corpus.add_document(doc.as_ref())?;
        }
        Ok(corpus)
    }

    /// Add a document's words to the corpus
    /// Repeated words inside one document are recorded once.
    pub fn add_document<T>(&mut self, words: &[T]) -> Result<DocId>
    where
        T: AsRef<str>,
    {
        let doc_id = self.doc_num;
        self.doc_num = self
            .doc_num
            .checked_add(1)
            .ok_or_else(|| Error::AdapterFailure("document id space exhausted".to_string()))?;
        for word in words {
            let list = self.postings.entry(word.as_ref().into()).or_default();
            // ids only grow, so a repeat can only be the last entry
            if list.last() != Some(&doc_id) {
                list.push(doc_id);
            }
        }
        Ok(doc_id)
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn num_docs(&self) -> u32 {
        self.doc_num
    }

    /// Number of documents containing `word`
    pub fn document_frequency(&self, word: &str) -> u32 {
        self.postings.get(word).map_or(0, |list| list.len() as u32)
    }

    /// Postings of `word`, ascending
    pub fn postings(&self, word: &str) -> Option<&[DocId]> {
        self.postings.get(word).map(Vec::as_slice)
    }

    /// Get the current vocabulary size (number of unique words)
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.postings.len()
    }

    /// Append another corpus; its document ids are shifted past ours
    pub fn merge_corpus(&mut self, other: &InMemoryCorpus) -> Result<()> {
        let offset = self.doc_num;
        self.doc_num = self
            .doc_num
            .checked_add(other.doc_num)
            .ok_or_else(|| Error::AdapterFailure("document id space exhausted".to_string()))?;
        for (word, other_list) in other.postings.iter() {
            self.postings
                .entry(word.clone())
                .or_default()
                .extend(other_list.iter().map(|&doc| doc + offset));
        }
        Ok(())
    }
}

impl CorpusAdapter for InMemoryCorpus {
    fn number_of_documents(&self) -> Result<u32> {
        Ok(self.doc_num)
    }

    fn fill_postings(&self, mapping: &mut IndexMap<String, Vec<DocId>>) -> Result<()> {
        for (word, buffer) in mapping.iter_mut() {
            if let Some(list) = self.postings.get(word.as_str()) {
                buffer.extend_from_slice(list);
            }
        }
        Ok(())
    }
}

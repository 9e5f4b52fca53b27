use crate::dictionary::TermDictionary;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

pub type TermId = u32;
pub type DocId = u32;

pub const INDEX_FORMAT_VERSION: u32 = 1;

/// One (term, document) record: how many times the term occurs there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub document_id: DocId,
    pub frequency: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexMeta {
    pub version: u32,
    pub created_at: String,
}

/// The fully built, immutable index: term dictionary, inverted index, and
/// positional index. Built once by the merger, then only read.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchIndex {
    pub meta: IndexMeta,
    pub term_index: TermDictionary,
    pub inverted_index: HashMap<TermId, Vec<Posting>>,
    pub positional_index: HashMap<TermId, BTreeMap<DocId, Vec<u32>>>,
}

impl SearchIndex {
    pub fn postings(&self, term_id: TermId) -> &[Posting] {
        self.inverted_index
            .get(&term_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 0-based token offsets of `term_id` in `document_id`, empty if absent.
    pub fn positions(&self, term_id: TermId, document_id: DocId) -> &[u32] {
        self.positional_index
            .get(&term_id)
            .and_then(|docs| docs.get(&document_id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn num_terms(&self) -> usize {
        self.term_index.len()
    }
}

/// Atomically published index snapshot. Queries clone the current `Arc` and
/// keep reading it even while a rebuild publishes a replacement.
#[derive(Default)]
pub struct IndexHandle {
    inner: RwLock<Option<Arc<SearchIndex>>>,
}

impl IndexHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Arc<SearchIndex>> {
        self.inner.read().clone()
    }

    pub fn publish(&self, index: Arc<SearchIndex>) {
        *self.inner.write() = Some(index);
    }
}

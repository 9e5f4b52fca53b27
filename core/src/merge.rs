use crate::dictionary::TermDictionary;
use crate::index::{DocId, IndexMeta, Posting, SearchIndex, TermId};
use crate::worker::DocTerms;
use std::collections::{BTreeMap, HashMap};

/// Single-writer reducer that folds per-document worker outputs into the
/// global dictionary, inverted index, and positional index.
///
/// The caller applies documents in ascending doc-id order, never arrival
/// order; together with the first-occurrence term order inside each
/// document, that makes term-id assignment reproducible across builds.
/// Being the sole writer, the merger needs no locking.
#[derive(Default)]
pub struct IndexMerger {
    dictionary: TermDictionary,
    inverted: HashMap<TermId, Vec<Posting>>,
    positional: HashMap<TermId, BTreeMap<DocId, Vec<u32>>>,
}

impl IndexMerger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, doc: DocTerms) {
        for (term, positions) in doc.terms {
            if positions.is_empty() {
                continue;
            }
            let term_id = self.dictionary.lookup_or_insert(&term);
            let postings = self.inverted.entry(term_id).or_default();
            // Each worker emits at most one entry per term per document, so
            // this pair cannot already exist.
            debug_assert!(postings.iter().all(|p| p.document_id != doc.doc_id));
            postings.push(Posting {
                document_id: doc.doc_id,
                frequency: positions.len() as u32,
            });
            self.positional
                .entry(term_id)
                .or_default()
                .insert(doc.doc_id, positions);
        }
    }

    pub fn finish(self, meta: IndexMeta) -> SearchIndex {
        SearchIndex {
            meta,
            term_index: self.dictionary,
            inverted_index: self.inverted,
            positional_index: self.positional,
        }
    }
}

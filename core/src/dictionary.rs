use crate::index::TermId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Bidirectional term <-> id map. Ids are 1-based and dense, assigned in
/// first-encounter order by the single-threaded merge phase; once the build
/// finishes the dictionary is only read.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TermDictionary {
    term_to_id: HashMap<String, TermId>,
    /// Term text for id `i` lives at `id_to_term[i - 1]`.
    id_to_term: Vec<String>,
}

impl TermDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-writer only: callers outside the merge phase use `lookup`.
    pub fn lookup_or_insert(&mut self, term: &str) -> TermId {
        if let Some(&id) = self.term_to_id.get(term) {
            return id;
        }
        let id = self.id_to_term.len() as TermId + 1;
        self.term_to_id.insert(term.to_string(), id);
        self.id_to_term.push(term.to_string());
        id
    }

    pub fn lookup(&self, term: &str) -> Option<TermId> {
        self.term_to_id.get(term).copied()
    }

    pub fn term(&self, id: TermId) -> Option<&str> {
        self.id_to_term.get(id.checked_sub(1)? as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.id_to_term.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_term.is_empty()
    }
}

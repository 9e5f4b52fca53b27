use crate::error::{EngineError, Result};
use crate::index::{DocId, SearchIndex, TermId};
use crate::tokenizer::tokenize;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub const MAX_QUERY_TOKENS: usize = 10;
pub const MAX_BATCH_QUERIES: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hit {
    pub docid: DocId,
    pub match_count: u32,
}

/// Structured answer for one query in a batch. `result` is false when the
/// query was dropped or matched nothing; `relevance` is ranked and capped.
#[derive(Debug, Clone, Serialize)]
pub struct QueryAnswer {
    pub request: usize,
    pub result: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub relevance: Vec<Hit>,
}

/// Positions of one resolved query term across matching documents, for
/// diagnostic inspection only; never feeds ranking.
#[derive(Debug, Clone, Serialize)]
pub struct TermPositions {
    pub term: String,
    pub term_id: TermId,
    pub documents: Vec<(DocId, Vec<u32>)>,
}

/// Answers queries against one immutable index snapshot.
pub struct QueryEngine {
    index: Arc<SearchIndex>,
    max_responses: usize,
}

impl QueryEngine {
    pub fn new(index: Arc<SearchIndex>, max_responses: usize) -> Self {
        Self { index, max_responses }
    }

    /// Normalize a query exactly like document text, then map each token to
    /// its term id. Unknown tokens resolve to `None` (no postings).
    /// Queries with 0 or more than 10 tokens after filtering are rejected.
    pub fn resolve(&self, query: &str) -> Result<Vec<Option<TermId>>> {
        let tokens = tokenize(query);
        if tokens.is_empty() || tokens.len() > MAX_QUERY_TOKENS {
            return Err(EngineError::QuerySyntax { tokens: tokens.len() });
        }
        Ok(tokens
            .iter()
            .map(|t| self.index.term_index.lookup(t))
            .collect())
    }

    /// Count, per document, how many distinct resolved query terms it
    /// contains. A term matching at several positions still counts once.
    pub fn match_documents(&self, resolved: &[Option<TermId>]) -> HashMap<DocId, u32> {
        let distinct: HashSet<TermId> = resolved.iter().flatten().copied().collect();
        let mut counts: HashMap<DocId, u32> = HashMap::new();
        for term_id in distinct {
            for posting in self.index.postings(term_id) {
                *counts.entry(posting.document_id).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Order by match count descending, ties broken by ascending document
    /// id, truncated to the configured response cap.
    pub fn rank(&self, counts: HashMap<DocId, u32>) -> Vec<Hit> {
        let mut ranked: Vec<Hit> = counts
            .into_iter()
            .map(|(docid, match_count)| Hit { docid, match_count })
            .collect();
        ranked.sort_by(|a, b| {
            b.match_count
                .cmp(&a.match_count)
                .then_with(|| a.docid.cmp(&b.docid))
        });
        ranked.truncate(self.max_responses);
        ranked
    }

    pub fn answer(&self, request: usize, query: &str) -> QueryAnswer {
        let resolved = match self.resolve(query) {
            Ok(resolved) => resolved,
            Err(err) => {
                tracing::warn!(request, query, %err, "query dropped");
                return QueryAnswer { request, result: false, relevance: Vec::new() };
            }
        };
        let relevance = self.rank(self.match_documents(&resolved));
        QueryAnswer { request, result: !relevance.is_empty(), relevance }
    }

    /// Process a batch of raw queries in order. The batch is capped at 1000
    /// queries; a dropped query yields a no-result answer and never aborts
    /// the rest of the batch.
    pub fn process_batch(&self, raw_queries: &[String]) -> Vec<QueryAnswer> {
        if raw_queries.len() > MAX_BATCH_QUERIES {
            tracing::warn!(
                total = raw_queries.len(),
                kept = MAX_BATCH_QUERIES,
                "query batch truncated"
            );
        }
        raw_queries
            .iter()
            .take(MAX_BATCH_QUERIES)
            .enumerate()
            .map(|(i, query)| self.answer(i + 1, query))
            .collect()
    }

    /// Raw token offsets of a term within one document; empty if absent.
    pub fn positions_for(&self, term_id: TermId, document_id: DocId) -> &[u32] {
        self.index.positions(term_id, document_id)
    }

    /// Per-term position lists across all matching documents for a query,
    /// documents in ascending id order. Dropped queries report nothing.
    pub fn position_report(&self, query: &str) -> Vec<TermPositions> {
        let resolved = match self.resolve(query) {
            Ok(resolved) => resolved,
            Err(_) => return Vec::new(),
        };
        let mut seen = HashSet::new();
        resolved
            .into_iter()
            .flatten()
            .filter(|term_id| seen.insert(*term_id))
            .map(|term_id| {
                let documents = self
                    .index
                    .positional_index
                    .get(&term_id)
                    .map(|docs| {
                        docs.iter()
                            .map(|(doc_id, positions)| (*doc_id, positions.clone()))
                            .collect()
                    })
                    .unwrap_or_default();
                let term = self
                    .index
                    .term_index
                    .term(term_id)
                    .unwrap_or_default()
                    .to_string();
                TermPositions { term, term_id, documents }
            })
            .collect()
    }
}

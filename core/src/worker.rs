use crate::error::{EngineError, Result};
use crate::index::DocId;
use crate::tokenizer::tokenize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// One document to index: its 1-based id and where to read it from. Ids come
/// from the stable enumeration order in the config layer and do not change
/// for the lifetime of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSource {
    pub id: DocId,
    pub path: PathBuf,
}

/// Per-document output of one worker. `terms` is ordered by first occurrence
/// within the document; each entry carries the strictly increasing 0-based
/// offsets of that term, so the term's frequency is `positions.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocTerms {
    pub doc_id: DocId,
    pub terms: Vec<(String, Vec<u32>)>,
}

/// Tokenize one document in isolation. Workers never touch the global
/// dictionary or indexes; all shared mutation happens later in the merger,
/// which is what keeps the parallel build race-free.
pub fn index_document(doc: &DocumentSource) -> Result<DocTerms> {
    let content = fs::read_to_string(&doc.path).map_err(|source| EngineError::DocumentAccess {
        path: doc.path.clone(),
        source,
    })?;
    Ok(index_text(doc.id, &content))
}

pub(crate) fn index_text(doc_id: DocId, content: &str) -> DocTerms {
    let tokens = tokenize(content);
    let mut order: Vec<String> = Vec::new();
    let mut positions: HashMap<String, Vec<u32>> = HashMap::new();
    for (pos, token) in tokens.into_iter().enumerate() {
        let entry = positions.entry(token.clone()).or_insert_with(|| {
            order.push(token);
            Vec::new()
        });
        entry.push(pos as u32);
    }
    let terms = order
        .into_iter()
        .map(|term| {
            let pos = positions.remove(&term).unwrap_or_default();
            (term, pos)
        })
        .collect();
    DocTerms { doc_id, terms }
}

use crate::config::Config;
use crate::error::{EngineError, Result};
use crate::index::{DocId, IndexMeta, SearchIndex, INDEX_FORMAT_VERSION};
use crate::merge::IndexMerger;
use crate::persist;
use crate::worker::{index_document, DocTerms, DocumentSource};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Cooperative cancellation flag for an in-flight build. Workers check it
/// between documents; a cancelled build discards all partial output.
#[derive(Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// A document left out of the index because it could not be read.
#[derive(Debug)]
pub struct SkippedDocument {
    pub id: DocId,
    pub path: PathBuf,
    pub reason: String,
}

pub struct BuildOutcome {
    pub index: SearchIndex,
    pub skipped: Vec<SkippedDocument>,
}

/// Build a fresh index over `docs`. Documents are tokenized by isolated
/// rayon workers, then merged single-threaded in ascending doc-id order so
/// term ids come out identical across builds regardless of worker timing.
/// Unreadable documents are skipped and reported; they never abort the
/// build.
pub fn build(docs: &[DocumentSource], cancel: &CancelToken) -> Result<BuildOutcome> {
    let results: Vec<(DocId, Result<DocTerms>)> = docs
        .par_iter()
        .map(|doc| {
            if cancel.is_cancelled() {
                return (doc.id, Err(EngineError::BuildAborted));
            }
            (doc.id, index_document(doc))
        })
        .collect();
    if cancel.is_cancelled() {
        return Err(EngineError::BuildAborted);
    }

    let mut indexed: Vec<DocTerms> = Vec::with_capacity(results.len());
    let mut skipped: Vec<SkippedDocument> = Vec::new();
    for (doc, (id, result)) in docs.iter().zip(results) {
        match result {
            Ok(terms) => indexed.push(terms),
            Err(err) => {
                tracing::warn!(doc_id = id, path = %doc.path.display(), %err, "document skipped");
                skipped.push(SkippedDocument { id, path: doc.path.clone(), reason: err.to_string() });
            }
        }
    }
    // Merge order, not arrival order, decides term-id assignment.
    indexed.sort_by_key(|d| d.doc_id);

    let mut merger = IndexMerger::new();
    for doc in indexed {
        merger.apply(doc);
    }
    let meta = IndexMeta {
        version: INDEX_FORMAT_VERSION,
        created_at: OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default(),
    };
    let index = merger.finish(meta);
    tracing::info!(
        num_docs = docs.len() - skipped.len(),
        num_terms = index.num_terms(),
        skipped = skipped.len(),
        "index build complete"
    );
    Ok(BuildOutcome { index, skipped })
}

/// Staleness check and rebuild. A stored index younger than the configured
/// update interval is loaded as-is; a missing, stale, or corrupt one
/// triggers a full rebuild that is persisted before being returned.
/// Enumeration failure is fatal and produces no index.
pub fn manage<P: AsRef<Path>>(
    config: &Config,
    index_path: P,
    cancel: &CancelToken,
) -> Result<(Arc<SearchIndex>, Vec<SkippedDocument>)> {
    let index_path = index_path.as_ref();
    if let Some(age) = index_age(index_path) {
        if age < Duration::from_secs(config.update_interval_seconds) {
            match persist::load_index(index_path) {
                Ok(index) => {
                    tracing::info!(age_secs = age.as_secs(), "index is fresh, skipping rebuild");
                    return Ok((Arc::new(index), Vec::new()));
                }
                Err(err) => {
                    tracing::warn!(%err, "stored index unreadable, rebuilding");
                }
            }
        } else {
            tracing::info!(age_secs = age.as_secs(), "index is stale, rebuilding");
        }
    }

    let docs = config.enumerate_documents()?;
    let outcome = build(&docs, cancel)?;
    persist::save_index(index_path, &outcome.index)?;
    Ok((Arc::new(outcome.index), outcome.skipped))
}

fn index_age(path: &Path) -> Option<Duration> {
    let modified = fs::metadata(path).ok()?.modified().ok()?;
    // A modification time in the future counts as just written.
    Some(
        SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO),
    )
}

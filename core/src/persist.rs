use crate::error::{EngineError, Result};
use crate::index::SearchIndex;
use crate::query::QueryAnswer;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Persist the built index as pretty JSON: term dictionary (both
/// directions), inverted index, and positional index, plus build metadata.
pub fn save_index<P: AsRef<Path>>(path: P, index: &SearchIndex) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(index)?;
    let mut f = File::create(path)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

/// Load a previously persisted index. Any read or parse failure surfaces as
/// `IndexCorrupt`, which the builder answers with a full rebuild.
pub fn load_index<P: AsRef<Path>>(path: P) -> Result<SearchIndex> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|e| EngineError::IndexCorrupt {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&raw).map_err(|e| EngineError::IndexCorrupt {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[derive(Serialize)]
struct AnswersFile<'a> {
    answers: &'a [QueryAnswer],
}

/// Write the per-query answers batch, in batch order.
pub fn write_answers<P: AsRef<Path>>(path: P, answers: &[QueryAnswer]) -> Result<()> {
    let json = serde_json::to_string_pretty(&AnswersFile { answers })?;
    let mut f = File::create(path)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

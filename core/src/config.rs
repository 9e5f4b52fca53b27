use crate::error::{EngineError, Result};
use crate::worker::DocumentSource;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Deserialize)]
struct ConfigFile {
    config: Option<EngineSection>,
    resources: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct EngineSection {
    name: Option<String>,
    version: Option<String>,
    max_responses: Option<i64>,
    time_update: Option<i64>,
}

/// Validated engine configuration loaded from `config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    pub engine_name: String,
    pub update_interval_seconds: u64,
    pub max_responses_per_query: usize,
    pub resources_dir: PathBuf,
}

const DEFAULT_MAX_RESPONSES: usize = 5;

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("cannot read {}: {e}", path.display())))?;
        let file: ConfigFile = serde_json::from_str(&raw)
            .map_err(|e| EngineError::Config(format!("{} is not valid JSON: {e}", path.display())))?;

        let section = file
            .config
            .ok_or_else(|| EngineError::Config("missing \"config\" section".into()))?;
        let engine_name = section
            .name
            .ok_or_else(|| EngineError::Config("missing \"name\" in config".into()))?;
        if let Some(version) = &section.version {
            if version != env!("CARGO_PKG_VERSION") {
                return Err(EngineError::Config(format!(
                    "config version {version} does not match engine version {}",
                    env!("CARGO_PKG_VERSION")
                )));
            }
        }
        let update_interval_seconds = match section.time_update {
            Some(secs) if secs > 0 => secs as u64,
            Some(secs) => {
                return Err(EngineError::Config(format!(
                    "time_update must be a positive integer, got {secs}"
                )))
            }
            None => return Err(EngineError::Config("missing \"time_update\" in config".into())),
        };
        let max_responses_per_query = match section.max_responses {
            Some(n) if n > 0 => n as usize,
            Some(n) => {
                return Err(EngineError::Config(format!(
                    "max_responses must be a positive integer, got {n}"
                )))
            }
            None => DEFAULT_MAX_RESPONSES,
        };
        let resources_dir = file
            .resources
            .ok_or_else(|| EngineError::Config("missing \"resources\" path".into()))?;

        Ok(Config {
            engine_name,
            update_interval_seconds,
            max_responses_per_query,
            resources_dir,
        })
    }

    /// Enumerate the document collection. Paths are sorted so document ids
    /// (1..=n) are stable across runs over the same tree.
    pub fn enumerate_documents(&self) -> Result<Vec<DocumentSource>> {
        let dir = &self.resources_dir;
        if !dir.is_dir() {
            return Err(EngineError::Enumeration {
                path: dir.clone(),
                reason: "not a directory".into(),
            });
        }
        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(dir) {
            let entry = entry.map_err(|e| EngineError::Enumeration {
                path: dir.clone(),
                reason: e.to_string(),
            })?;
            if entry.file_type().is_file() {
                paths.push(entry.into_path());
            }
        }
        paths.sort();
        Ok(paths
            .into_iter()
            .enumerate()
            .map(|(i, path)| DocumentSource { id: i as u32 + 1, path })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct RequestsFile {
    requests: Vec<String>,
}

/// Load the raw query batch from `requests.json`.
pub fn load_requests<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .map_err(|e| EngineError::Config(format!("cannot read {}: {e}", path.display())))?;
    let file: RequestsFile = serde_json::from_str(&raw)
        .map_err(|e| EngineError::Config(format!("{} is not valid JSON: {e}", path.display())))?;
    Ok(file.requests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_config(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("config.json");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn loads_valid_config() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"{"config":{"name":"engine","max_responses":5,"time_update":3600},"resources":"res"}"#,
        );
        let cfg = Config::load(path).unwrap();
        assert_eq!(cfg.engine_name, "engine");
        assert_eq!(cfg.update_interval_seconds, 3600);
        assert_eq!(cfg.max_responses_per_query, 5);
    }

    #[test]
    fn max_responses_defaults_when_absent() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"{"config":{"name":"engine","time_update":60},"resources":"res"}"#,
        );
        let cfg = Config::load(path).unwrap();
        assert_eq!(cfg.max_responses_per_query, 5);
    }

    #[test]
    fn rejects_missing_time_update() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), r#"{"config":{"name":"engine"},"resources":"res"}"#);
        assert!(matches!(Config::load(path), Err(EngineError::Config(_))));
    }

    #[test]
    fn rejects_non_positive_values() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"{"config":{"name":"engine","max_responses":0,"time_update":60},"resources":"res"}"#,
        );
        assert!(matches!(Config::load(path), Err(EngineError::Config(_))));
    }

    #[test]
    fn enumerates_sorted_with_dense_ids() {
        let dir = tempdir().unwrap();
        let res = dir.path().join("res");
        fs::create_dir(&res).unwrap();
        fs::write(res.join("b.txt"), "b").unwrap();
        fs::write(res.join("a.txt"), "a").unwrap();

        let cfg = Config {
            engine_name: "engine".into(),
            update_interval_seconds: 60,
            max_responses_per_query: 5,
            resources_dir: res.clone(),
        };
        let docs = cfg.enumerate_documents().unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, 1);
        assert_eq!(docs[0].path, res.join("a.txt"));
        assert_eq!(docs[1].id, 2);
        assert_eq!(docs[1].path, res.join("b.txt"));
    }

    #[test]
    fn missing_resources_dir_is_fatal() {
        let cfg = Config {
            engine_name: "engine".into(),
            update_interval_seconds: 60,
            max_responses_per_query: 5,
            resources_dir: PathBuf::from("/nonexistent/resources"),
        };
        assert!(matches!(
            cfg.enumerate_documents(),
            Err(EngineError::Enumeration { .. })
        ));
    }
}

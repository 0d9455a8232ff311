use anyhow::{Context, Result};
use speclens_analysis::{keys, Corpus};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const SUPPORT_DIRS: [&str; 2] = ["contracts", "checklists"];
const MAX_SUPPORT_DEPTH: usize = 2;
const MAX_SUPPORT_FILES: usize = 40;

/// File-backed document store over a spec-kit style feature directory:
/// `spec.md`, `plan.md`, `tasks.md`, `research.md`, `data-model.md`, plus
/// `contracts/` and `checklists/` subtrees. Absent files simply stay out
/// of the corpus; analysis degrades instead of failing.
pub(crate) struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub(crate) fn load(&self, constitution: Option<&Path>) -> Result<Corpus> {
        let mut corpus = Corpus::new();

        let named = [
            (keys::SPEC, "spec.md"),
            (keys::PLAN, "plan.md"),
            (keys::TASKS, "tasks.md"),
            (keys::RESEARCH, "research.md"),
            (keys::DATA_MODEL, "data-model.md"),
        ];
        for (key, file) in named {
            if let Some(text) = self.read_optional(&self.root.join(file)) {
                corpus.insert(key, text);
            }
        }

        let constitution_path = constitution
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.join("memory").join("constitution.md"));
        if let Some(text) = self.read_optional(&constitution_path) {
            corpus.insert(keys::CONSTITUTION, text);
        }

        for dir in SUPPORT_DIRS {
            self.load_support_dir(dir, &mut corpus);
        }

        Ok(corpus)
    }

    fn load_support_dir(&self, dir: &str, corpus: &mut Corpus) {
        let base = self.root.join(dir);
        if !base.is_dir() {
            return;
        }
        let mut loaded = 0;
        for entry in WalkDir::new(&base)
            .max_depth(MAX_SUPPORT_DEPTH)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            if loaded >= MAX_SUPPORT_FILES {
                log::warn!("{dir}: more than {MAX_SUPPORT_FILES} files, rest ignored");
                break;
            }
            let Some(stem) = entry.path().file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if let Some(text) = self.read_optional(entry.path()) {
                corpus.insert(format!("{dir}/{stem}"), text);
                loaded += 1;
            }
        }
    }

    /// Absent files are normal; unreadable or non-UTF-8 files are logged
    /// and treated as absent.
    fn read_optional(&self, path: &Path) -> Option<String> {
        if !path.is_file() {
            return None;
        }
        match fs::read_to_string(path) {
            Ok(text) => Some(text),
            Err(err) => {
                log::warn!("skipping {}: {err}", path.display());
                None
            }
        }
    }
}

/// Reads one required document, for the scan and answer operations.
pub(crate) fn read_required(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("cannot read document {}", path.display()))
}

/// Full-content replace via a sibling temp file and rename, so a failed
/// write leaves the original untouched.
pub(crate) fn write_document(path: &Path, content: &str) -> Result<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content).with_context(|| format!("cannot write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("cannot replace {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_maps_files_to_logical_keys() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("spec.md"), "spec body").unwrap();
        fs::write(dir.path().join("plan.md"), "plan body").unwrap();
        fs::create_dir_all(dir.path().join("contracts")).unwrap();
        fs::write(dir.path().join("contracts").join("auth.md"), "contract").unwrap();

        let corpus = DocumentStore::new(dir.path()).load(None).unwrap();
        assert_eq!(corpus.get(keys::SPEC), Some("spec body"));
        assert_eq!(corpus.get(keys::PLAN), Some("plan body"));
        assert_eq!(corpus.get("contracts/auth"), Some("contract"));
        assert!(corpus.get(keys::TASKS).is_none());
    }

    #[test]
    fn test_constitution_override_path() {
        let dir = TempDir::new().unwrap();
        let alt = dir.path().join("alt-constitution.md");
        fs::write(&alt, "Language: Rust").unwrap();
        let corpus = DocumentStore::new(dir.path()).load(Some(&alt)).unwrap();
        assert_eq!(corpus.get(keys::CONSTITUTION), Some("Language: Rust"));
    }

    #[test]
    fn test_write_document_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("spec.md");
        fs::write(&path, "old").unwrap();
        write_document(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert!(!path.with_extension("tmp").exists());
    }
}

use std::path::Path;

use walkdir::WalkDir;

use crate::WandbRequestError;

/// Top-level directories never uploaded with a code snapshot
const EXCLUDED_DIRS: &[&str] = &[
    ".git",
    "venv",
    ".venv",
    "wandb",
    ".wandb",
    "__pycache__",
    "target",
];

/// Files collected for a run's code snapshot
#[derive(Debug, Clone)]
pub struct CodeSnapshot {
    files: Vec<SnapshotFile>,
}

/// One file in a code snapshot
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    /// Path relative to the snapshot root, `/`-separated
    pub rel_path: String,
    pub contents: Vec<u8>,
}

impl CodeSnapshot {
    /// Walk `root` and collect every file the exclusion filter keeps,
    /// sorted by path.
    pub fn collect(root: &Path) -> Result<Self, WandbRequestError> {
        let mut files = Vec::new();
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry
                    .path()
                    .strip_prefix(root)
                    .map(|rel| !is_excluded(rel))
                    .unwrap_or(true)
            });
        for entry in walker {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(root) else {
                continue;
            };
            let contents = std::fs::read(entry.path())?;
            files.push(SnapshotFile {
                rel_path: rel_slash(rel),
                contents,
            });
        }
        Ok(Self { files })
    }

    pub fn files(&self) -> &[SnapshotFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Whether a path (relative to the snapshot root) is left out of the
/// snapshot: the secrets file, VCS metadata, virtual envs, tracking
/// caches, bytecode and build output.
pub fn is_excluded(rel: &Path) -> bool {
    let rel = rel_slash(rel);
    if rel.is_empty() {
        return false;
    }
    if rel == ".env" || rel.starts_with(".env/") {
        return true;
    }
    for dir in EXCLUDED_DIRS {
        if rel == *dir || rel.starts_with(&format!("{dir}/")) {
            return true;
        }
    }
    rel.ends_with(".pyc")
}

fn rel_slash(rel: &Path) -> String {
    rel.iter()
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

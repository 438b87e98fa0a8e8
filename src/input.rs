//! Finding the source documents.

use crate::errors::{self, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// A candidate source file.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceFile {
    pub path: PathBuf,
    /// File name without extension; identifies the document.
    pub stem: String,
}

/// All files in `dir` matching `pattern`, sorted by path, except those
/// whose stem contains `exclude`.
pub fn enumerate(dir: &Path, pattern: &str, exclude: &str) -> Result<Vec<SourceFile>> {
    if !dir.is_dir() {
        return Err(errors::invalid_input(format!(
            "not a directory: {}",
            dir.display()
        )));
    }
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let full = Path::new(&escaped).join(pattern);
    let mut files = vec![];
    for entry in glob::glob(&full.to_string_lossy())? {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!(target: "teimeta", "skipping unreadable entry: {e}");
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }
        let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };
        if !exclude.is_empty() && stem.contains(exclude) {
            debug!(target: "teimeta", "excluded: {}", path.display());
            continue;
        }
        files.push(SourceFile { path, stem });
    }
    files.sort();
    info!(target: "teimeta", "{} files in {}", files.len(), dir.display());
    Ok(files)
}

//! Walk a cloned working tree and list the files to upload.

use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

/// A regular file found under the clone root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeFile {
    /// Absolute path on disk.
    pub path: PathBuf,
    /// Path relative to the clone root, `/`-separated.
    pub relative: String,
}

/// List every regular file under `root`, recursively, in a stable order.
///
/// Symlinks are neither followed nor listed. Hidden entries (including
/// `.git/`) are included.
pub fn collect_files(root: &Path) -> Result<Vec<TreeFile>, walkdir::Error> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };

        files.push(TreeFile {
            path: entry.path().to_path_buf(),
            relative: slash_path(relative),
        });
    }

    Ok(files)
}

/// Join the normal components of `relative` with `/`.
pub fn slash_path(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

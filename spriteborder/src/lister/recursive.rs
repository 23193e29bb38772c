use super::FileLister;
use crate::error::{Result, SpriteError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const BUFFER_CAPACITY: usize = 256;

/// Walks a directory tree and collects the regular files with one extension.
pub struct RecursiveLister {
    extension: String,
}

impl RecursiveLister {
    pub fn new(extension: &str) -> Self {
        Self {
            extension: extension.trim_start_matches('.').to_ascii_lowercase(),
        }
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(&self.extension))
            .unwrap_or(false)
    }
}

impl FileLister for RecursiveLister {
    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            let reason = if root.exists() {
                "Path is not a directory"
            } else {
                "Path not found"
            };
            return Err(SpriteError::Scan {
                path: root.to_path_buf(),
                reason: reason.to_string(),
            });
        }

        let mut files = Vec::with_capacity(BUFFER_CAPACITY);
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|err| SpriteError::Scan {
                path: err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf()),
                reason: err.to_string(),
            })?;

            if entry.file_type().is_file() && self.has_extension(entry.path()) {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }
}

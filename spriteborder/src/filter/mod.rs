use std::path::{Path, PathBuf};

/// Classifies a single candidate by its base name (file name without extension).
pub trait FileFilter {
    fn matches(&self, base_name: &str) -> bool;

    fn filter_files(&self, files: &[PathBuf]) -> Vec<PathBuf> {
        files
            .iter()
            .filter(|path| self.matches(&base_name(path)))
            .cloned()
            .collect()
    }
}

/// Every candidate passes.
pub struct PassThrough;

impl FileFilter for PassThrough {
    fn matches(&self, _base_name: &str) -> bool {
        true
    }
}

pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

mod affix;
mod engine;
mod mode;
mod regex_filter;

pub use affix::{Affix, AffixFilter};
pub use engine::{filter_paths, select, FilterDiagnostic, Selection};
pub use mode::{FilterKind, FilterMode, FilterSettings};
pub use regex_filter::RegexFilter;

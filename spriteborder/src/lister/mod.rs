use crate::error::Result;
use std::path::{Path, PathBuf};

pub trait FileLister {
    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

mod recursive;

pub use recursive::RecursiveLister;

/// Extension of the assets a batch operates on.
pub const SPRITE_EXTENSION: &str = "png";

pub fn scan_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    RecursiveLister::new(extension).list_files(root)
}

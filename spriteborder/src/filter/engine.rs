use super::{AffixFilter, FileFilter, FilterMode, PassThrough, RegexFilter};
use crate::error::Result;
use crate::lister::scan_files;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterDiagnostic {
    InvalidPattern { pattern: String, reason: String },
}

impl fmt::Display for FilterDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterDiagnostic::InvalidPattern { pattern, reason } => {
                write!(f, "Invalid regex pattern: {}\n{}", pattern, reason)
            }
        }
    }
}

/// The candidates a filter accepted, in discovery order.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    pub matched: Vec<PathBuf>,
    pub diagnostics: Vec<FilterDiagnostic>,
}

impl Selection {
    pub fn len(&self) -> usize {
        self.matched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    pub fn base_names(&self) -> Vec<String> {
        self.matched.iter().map(|p| super::base_name(p)).collect()
    }
}

/// Scans `root` for files with `extension` and keeps the ones `mode` accepts.
pub fn select(root: &Path, extension: &str, mode: &FilterMode) -> Result<Selection> {
    let candidates = scan_files(root, extension)?;
    tracing::debug!(
        root = %root.display(),
        candidates = candidates.len(),
        filter = %mode,
        "scanned candidates"
    );
    Ok(filter_paths(&candidates, mode))
}

pub fn filter_paths(paths: &[PathBuf], mode: &FilterMode) -> Selection {
    let filter: Box<dyn FileFilter> = match mode {
        FilterMode::None => Box::new(PassThrough),
        FilterMode::Prefix(text) => Box::new(AffixFilter::prefix(text)),
        FilterMode::Postfix(text) => Box::new(AffixFilter::postfix(text)),
        // Empty pattern matches everything, same as an empty prefix or postfix.
        FilterMode::Regex(pattern) if pattern.is_empty() => Box::new(PassThrough),
        FilterMode::Regex(pattern) => match RegexFilter::new(pattern) {
            Ok(filter) => Box::new(filter),
            Err(err) => {
                tracing::debug!(pattern = %pattern, error = %err, "invalid regex pattern");
                return Selection {
                    matched: Vec::new(),
                    diagnostics: vec![FilterDiagnostic::InvalidPattern {
                        pattern: pattern.clone(),
                        reason: err.to_string(),
                    }],
                };
            }
        },
    };

    Selection {
        matched: filter.filter_files(paths),
        diagnostics: Vec::new(),
    }
}

use super::FileFilter;
use regex::Regex;

/// Unanchored, case-sensitive search against the base name.
pub struct RegexFilter {
    regex: Regex,
}

impl RegexFilter {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }
}

impl FileFilter for RegexFilter {
    fn matches(&self, base_name: &str) -> bool {
        self.regex.is_match(base_name)
    }
}

use crate::error::{ConfigErrorKind, Result, SpriteError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The active filter together with the text it filters by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterMode {
    None,
    Prefix(String),
    Postfix(String),
    Regex(String),
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::None => write!(f, "no filter"),
            FilterMode::Prefix(text) => write!(f, "prefix \"{}\"", text),
            FilterMode::Postfix(text) => write!(f, "postfix \"{}\"", text),
            FilterMode::Regex(pattern) => write!(f, "regex /{}/", pattern),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    #[default]
    None,
    Prefix,
    Postfix,
    Regex,
}

impl FilterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::None => "none",
            FilterKind::Prefix => "prefix",
            FilterKind::Postfix => "postfix",
            FilterKind::Regex => "regex",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = SpriteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(FilterKind::None),
            "prefix" => Ok(FilterKind::Prefix),
            "postfix" | "suffix" => Ok(FilterKind::Postfix),
            "regex" => Ok(FilterKind::Regex),
            _ => Err(SpriteError::Config(ConfigErrorKind::InvalidValue(
                "filter.active".to_string(),
                "must be one of: none, prefix, postfix, regex".to_string(),
            ))),
        }
    }
}

/// Persisted filter preferences. Each text is remembered on its own while
/// `active` names the single filter in effect.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSettings {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub postfix: String,
    #[serde(default)]
    pub regex: String,
    #[serde(default)]
    pub active: FilterKind,
}

impl FilterSettings {
    /// Makes `kind` the only active filter.
    pub fn activate(&mut self, kind: FilterKind) {
        self.active = kind;
    }

    pub fn deactivate(&mut self) {
        self.active = FilterKind::None;
    }

    /// Toggles `kind`: switching it on switches the others off, switching the
    /// active one off leaves no filter.
    pub fn toggle(&mut self, kind: FilterKind) {
        if self.active == kind {
            self.deactivate();
        } else {
            self.activate(kind);
        }
    }

    pub fn is_active(&self, kind: FilterKind) -> bool {
        kind != FilterKind::None && self.active == kind
    }

    /// Stores the text for the filter `mode` names and activates it.
    pub fn apply(&mut self, mode: FilterMode) {
        match mode {
            FilterMode::None => self.deactivate(),
            FilterMode::Prefix(text) => {
                self.prefix = text;
                self.activate(FilterKind::Prefix);
            }
            FilterMode::Postfix(text) => {
                self.postfix = text;
                self.activate(FilterKind::Postfix);
            }
            FilterMode::Regex(pattern) => {
                self.regex = pattern;
                self.activate(FilterKind::Regex);
            }
        }
    }

    pub fn mode(&self) -> FilterMode {
        match self.active {
            FilterKind::None => FilterMode::None,
            FilterKind::Prefix => FilterMode::Prefix(self.prefix.clone()),
            FilterKind::Postfix => FilterMode::Postfix(self.postfix.clone()),
            FilterKind::Regex => FilterMode::Regex(self.regex.clone()),
        }
    }
}

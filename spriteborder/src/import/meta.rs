use super::{ImportOutcome, ImportSettings, SkipReason, SpriteImporter};
use crate::error::{Result, SpriteError};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

const IMPORTER_KEY: &str = "TextureImporter:";
const SINGLE_SPRITE_MODE: i64 = 1;

/// Persists import settings into the `.meta` file stored next to each asset.
#[derive(Default)]
pub struct MetaFileImporter {
    written: usize,
}

impl MetaFileImporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `.meta` files whose content actually changed.
    pub fn files_written(&self) -> usize {
        self.written
    }

    pub fn meta_path(asset: &Path) -> PathBuf {
        let mut path = OsString::from(asset.as_os_str());
        path.push(".meta");
        PathBuf::from(path)
    }
}

impl SpriteImporter for MetaFileImporter {
    fn apply(&mut self, asset: &Path, settings: &ImportSettings) -> Result<ImportOutcome> {
        let meta_path = Self::meta_path(asset);
        if !meta_path.is_file() {
            return Ok(ImportOutcome::Skipped(SkipReason::MissingMeta));
        }

        let original = fs::read_to_string(&meta_path).map_err(|err| SpriteError::Import {
            path: meta_path.clone(),
            reason: err.to_string(),
        })?;

        let updated = match rewrite_meta(&original, settings) {
            Ok(updated) => updated,
            Err(reason) => return Ok(ImportOutcome::Skipped(reason)),
        };

        if updated != original {
            fs::write(&meta_path, updated).map_err(|err| SpriteError::Import {
                path: meta_path.clone(),
                reason: err.to_string(),
            })?;
            self.written += 1;
            tracing::debug!(meta = %meta_path.display(), "rewrote import settings");
        }

        Ok(ImportOutcome::Updated)
    }
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn format_number(value: f32) -> String {
    format!("{}", value)
}

fn find_child(block: &[String], child_indent: usize, key: &str) -> Option<usize> {
    let needle = format!("{}:", key);
    block.iter().position(|line| {
        indent_of(line) == child_indent && line.trim_start().starts_with(&needle)
    })
}

/// Rewrites the sprite keys among the direct children of the top-level
/// `TextureImporter` mapping. Nested mappings such as `spriteSheet` are left alone.
pub fn rewrite_meta(
    contents: &str,
    settings: &ImportSettings,
) -> std::result::Result<String, SkipReason> {
    let newline = if contents.contains("\r\n") { "\r\n" } else { "\n" };
    let mut lines: Vec<String> = contents.lines().map(String::from).collect();

    let start = lines
        .iter()
        .position(|line| line.trim_end() == IMPORTER_KEY)
        .ok_or(SkipReason::NoImporterBlock)?;

    let mut end = lines.len();
    for (offset, line) in lines[start + 1..].iter().enumerate() {
        if !is_blank(line) && indent_of(line) == 0 {
            end = start + 1 + offset;
            break;
        }
    }

    let child_indent = lines[start + 1..end]
        .iter()
        .find(|line| !is_blank(line))
        .map(|line| indent_of(line))
        .filter(|indent| *indent > 0)
        .ok_or(SkipReason::NoImporterBlock)?;

    let sprite_mode = find_child(&lines[start + 1..end], child_indent, "spriteMode")
        .map(|i| &lines[start + 1 + i])
        .and_then(|line| line.split_once(':').map(|(_, v)| v.trim().to_string()))
        .and_then(|v| v.parse::<i64>().ok());
    if sprite_mode != Some(SINGLE_SPRITE_MODE) {
        return Err(SkipReason::NotSingleSprite);
    }

    let border = settings.border;
    let mut entries = vec![
        ("alignment", settings.alignment.index().to_string()),
        (
            "spriteBorder",
            format!(
                "{{x: {}, y: {}, z: {}, w: {}}}",
                format_number(border.left),
                format_number(border.bottom),
                format_number(border.right),
                format_number(border.top)
            ),
        ),
    ];
    if let Some(pivot) = settings.pivot() {
        entries.push((
            "spritePivot",
            format!(
                "{{x: {}, y: {}}}",
                format_number(pivot.x),
                format_number(pivot.y)
            ),
        ));
    }

    let indent = " ".repeat(child_indent);
    let mut insert_at = end;
    while insert_at > start + 1 && is_blank(&lines[insert_at - 1]) {
        insert_at -= 1;
    }

    for (key, value) in entries {
        let rendered = format!("{}{}: {}", indent, key, value);
        match find_child(&lines[start + 1..end], child_indent, key) {
            Some(i) => lines[start + 1 + i] = rendered,
            None => {
                lines.insert(insert_at, rendered);
                insert_at += 1;
                end += 1;
            }
        }
    }

    let mut output = lines.join(newline);
    if contents.ends_with('\n') {
        output.push_str(newline);
    }
    Ok(output)
}

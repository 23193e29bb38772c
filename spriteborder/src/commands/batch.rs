use crate::error::Result;
use crate::filter::{base_name, select, FilterMode, Selection};
use crate::import::{ImportOutcome, ImportSettings, MetaFileImporter, SkipReason, SpriteImporter};
use crate::lister::SPRITE_EXTENSION;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct ListedSprite<'a> {
    name: String,
    path: &'a Path,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub updated: Vec<String>,
    pub skipped: Vec<(String, SkipReason)>,
}

/// Applies `settings` to every path in order. An importer error stops the batch.
pub fn apply_batch<I>(
    paths: &[PathBuf],
    settings: &ImportSettings,
    importer: &mut I,
    progress: Option<&ProgressBar>,
) -> Result<BatchReport>
where
    I: SpriteImporter + ?Sized,
{
    let mut report = BatchReport::default();

    for path in paths {
        let name = base_name(path);
        if let Some(pb) = progress {
            pb.set_message(name.clone());
        }

        match importer.apply(path, settings)? {
            ImportOutcome::Updated => report.updated.push(name),
            ImportOutcome::Skipped(reason) => {
                tracing::debug!(sprite = %name, %reason, "skipped");
                report.skipped.push((name, reason));
            }
        }

        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    Ok(report)
}

fn report_diagnostics(selection: &Selection) {
    for diagnostic in &selection.diagnostics {
        eprintln!("{} {}", "⚠".yellow(), diagnostic.to_string().yellow());
    }
}

pub fn run_list(root: &Path, mode: &FilterMode, json: bool) -> Result<()> {
    let selection = select(root, SPRITE_EXTENSION, mode)?;
    report_diagnostics(&selection);

    if json {
        let listed: Vec<ListedSprite> = selection
            .matched
            .iter()
            .map(|path| ListedSprite {
                name: base_name(path),
                path,
            })
            .collect();
        println!("{}", serde_json::to_string(&listed)?);
        return Ok(());
    }

    for name in selection.base_names() {
        println!("{}", name.cyan());
    }
    println!(
        "{} {} sprites match {} in {}",
        "ℹ".blue(),
        selection.len().to_string().bold(),
        mode,
        root.display()
    );
    Ok(())
}

fn create_progress_bar(len: usize) -> ProgressBar {
    if !atty::is(atty::Stream::Stdout) {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {wide_msg}") {
        pb.set_style(style.progress_chars("█▓░"));
    }
    pb
}

pub fn run_update(root: &Path, mode: &FilterMode, settings: &ImportSettings) -> Result<()> {
    let selection = select(root, SPRITE_EXTENSION, mode)?;
    report_diagnostics(&selection);

    let mut importer = MetaFileImporter::new();
    let pb = create_progress_bar(selection.len());
    let report = apply_batch(&selection.matched, settings, &mut importer, Some(&pb))?;
    pb.finish_and_clear();

    if !report.updated.is_empty() {
        println!("{}", "Updated sprites".bold());
        for name in &report.updated {
            println!("  {}", name.green());
        }
    }
    for (name, reason) in &report.skipped {
        println!("  {} {} ({})", "–".dimmed(), name.dimmed(), reason);
    }

    tracing::info!(
        updated = report.updated.len(),
        skipped = report.skipped.len(),
        written = importer.files_written(),
        "batch finished"
    );
    println!("✓ Updated {} sprites.", report.updated.len());
    Ok(())
}

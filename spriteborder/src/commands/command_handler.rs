use crate::commands::args::{Args, BatchArgs, Command, ImportOverrides};
use crate::commands::batch::{run_list, run_update};
use crate::config::{self, Config};
use crate::error::Result;
use crate::filter::FilterMode;
use colored::*;
use std::fs::{create_dir_all, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

fn generate_completion(shell: clap_complete::Shell, output_path: Option<&str>) -> Result<()> {
    let mut app = Args::get_cli();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut app, env!("CARGO_PKG_NAME"), &mut buf);

    match output_path {
        Some(path) => {
            if let Some(parent) = Path::new(path).parent() {
                create_dir_all(parent)?;
            }
            let mut file = File::create(path)?;
            file.write_all(&buf)?;
            println!(
                "✓ Generated {} shell completion to {}",
                format!("{:?}", shell).green(),
                path.cyan()
            );
        }
        None => io::stdout().write_all(&buf)?,
    }
    Ok(())
}

/// Folds command-line overrides into the config and returns the scan root and
/// filter for this invocation. The config is written back when it changed.
pub fn resolve_batch(
    batch: &BatchArgs,
    overrides: &ImportOverrides,
    config: &mut Config,
    config_path: &Path,
) -> Result<(PathBuf, FilterMode)> {
    let before = config.clone();

    if let Some(folder) = &batch.folder {
        config.target_folder_path = folder.clone();
    }
    if let Some(mode) = &batch.filter {
        config.filter.apply(mode.clone());
    }
    if let Some(border) = overrides.border {
        config.import.border = border;
    }
    if let Some(alignment) = overrides.alignment {
        config.import.alignment = alignment;
    }
    if let Some(pivot) = overrides.custom_pivot {
        config.import.custom_pivot = pivot;
    }

    if !batch.no_save && *config != before {
        config.save(config_path)?;
        tracing::debug!(path = %config_path.display(), "saved preferences");
    }

    Ok((config.target_folder(), config.filter.mode()))
}

pub fn handle_command(args: Args, config: &mut Config) -> Result<()> {
    let config_path = Config::get_config_path();

    match args.command {
        Command::List(batch) => {
            let (root, mode) =
                resolve_batch(&batch, &ImportOverrides::default(), config, &config_path)?;
            run_list(&root, &mode, batch.json)
        }
        Command::Update(batch, overrides) => {
            let (root, mode) = resolve_batch(&batch, &overrides, config, &config_path)?;
            run_update(&root, &mode, &config.import)
        }
        Command::Config(action) => config::handle_config_command(action, config),
        Command::Init => config::initialize_config(),
        Command::GenerateCompletion(shell, output) => generate_completion(shell, output.as_deref()),
    }
}

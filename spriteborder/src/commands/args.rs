use crate::error::{Result, SpriteError};
use crate::filter::FilterMode;
use crate::import::{Pivot, SpriteAlignment, SpriteBorder};
use clap::{App, Arg, ArgGroup, ArgMatches, SubCommand};
use clap_complete::Shell;
use std::ffi::OsString;

pub struct Args {
    pub verbose: u64,
    pub no_color: bool,
    pub command: Command,
}

pub enum Command {
    List(BatchArgs),
    Update(BatchArgs, ImportOverrides),
    Config(ConfigAction),
    Init,
    GenerateCompletion(Shell, Option<String>),
}

/// Options shared by every command that scans and filters sprites.
#[derive(Clone, Debug, Default)]
pub struct BatchArgs {
    pub folder: Option<String>,
    /// `None` keeps the filter stored in the config.
    pub filter: Option<FilterMode>,
    pub json: bool,
    pub no_save: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ImportOverrides {
    pub border: Option<SpriteBorder>,
    pub alignment: Option<SpriteAlignment>,
    pub custom_pivot: Option<Pivot>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigAction {
    View,
    Set(String, String),
    DiffDefault,
}

fn folder_arg() -> Arg<'static> {
    Arg::with_name("folder")
        .help("Folder to scan for .png sprites (defaults to the configured folder)")
        .index(1)
}

fn filter_args(app: App<'static>) -> App<'static> {
    app.arg(
        Arg::with_name("prefix")
            .long("prefix")
            .takes_value(true)
            .value_name("TEXT")
            .allow_hyphen_values(true)
            .help("Only sprites whose name starts with TEXT (case-insensitive)"),
    )
    .arg(
        Arg::with_name("postfix")
            .long("postfix")
            .alias("suffix")
            .takes_value(true)
            .value_name("TEXT")
            .allow_hyphen_values(true)
            .help("Only sprites whose name ends with TEXT (case-insensitive)"),
    )
    .arg(
        Arg::with_name("regex")
            .long("regex")
            .takes_value(true)
            .value_name("PATTERN")
            .allow_hyphen_values(true)
            .help("Only sprites whose name contains a match for PATTERN"),
    )
    .arg(
        Arg::with_name("no-filter")
            .long("no-filter")
            .help("Select every sprite, ignoring the configured filter"),
    )
    .group(
        ArgGroup::new("filter")
            .args(&["prefix", "postfix", "regex", "no-filter"]) // mutually exclusive
            .multiple(false),
    )
    .arg(
        Arg::with_name("no-save")
            .long("no-save")
            .help("Do not write folder, filter or import changes back to the config"),
    )
}

impl Args {
    fn build_cli() -> App<'static> {
        App::new(env!("CARGO_PKG_NAME"))
            .version(env!("CARGO_PKG_VERSION"))
            .author(env!("CARGO_PKG_AUTHORS"))
            .about(env!("CARGO_PKG_DESCRIPTION"))
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                Arg::with_name("verbose")
                    .short('v')
                    .long("verbose")
                    .multiple_occurrences(true)
                    .global(true)
                    .help("Increase log verbosity (-v, -vv, -vvv)"),
            )
            .arg(
                Arg::with_name("no-color")
                    .long("no-color")
                    .global(true)
                    .help("Disable all colors in the output"),
            )
            .subcommand(filter_args(
                SubCommand::with_name("list")
                    .about("Show the sprites the current filter selects, without changing them")
                    .arg(folder_arg())
                    .arg(
                        Arg::with_name("json")
                            .long("json")
                            .help("Output a single JSON array"),
                    ),
            ))
            .subcommand(filter_args(
                SubCommand::with_name("update")
                    .about("Apply border and pivot import settings to the selected sprites")
                    .arg(folder_arg())
                    .arg(
                        Arg::with_name("border")
                            .long("border")
                            .short('b')
                            .takes_value(true)
                            .value_name("L,B,R,T")
                            .help("Sprite border insets (left, bottom, right, top) or one value for all"),
                    )
                    .arg(
                        Arg::with_name("pivot")
                            .long("pivot")
                            .short('p')
                            .takes_value(true)
                            .value_name("ALIGNMENT")
                            .possible_values(SpriteAlignment::names())
                            .help("Pivot alignment"),
                    )
                    .arg(
                        Arg::with_name("custom-pivot")
                            .long("custom-pivot")
                            .takes_value(true)
                            .value_name("X,Y")
                            .allow_hyphen_values(true)
                            .help("Normalized pivot, used with --pivot custom"),
                    ),
            ))
            .subcommand(
                SubCommand::with_name("config")
                    .about("View or modify configuration")
                    .arg(
                        Arg::with_name("set")
                            .long("set")
                            .takes_value(true)
                            .number_of_values(2)
                            .value_names(&["KEY", "VALUE"])
                            .allow_hyphen_values(true)
                            .help("Set a configuration value (e.g., --set filter.active prefix)"),
                    )
                    .subcommand(
                        SubCommand::with_name("diff")
                            .about("Compare the configuration against built-in defaults"),
                    ),
            )
            .subcommand(
                SubCommand::with_name("init").about("Write the default configuration file"),
            )
            .subcommand(
                SubCommand::with_name("completion")
                    .about("Generate shell completion scripts")
                    .arg(
                        Arg::with_name("shell")
                            .help("Target shell")
                            .required(true)
                            .possible_values(["bash", "fish", "zsh", "powershell", "elvish"])
                            .index(1),
                    )
                    .arg(
                        Arg::with_name("output")
                            .long("output")
                            .short('o')
                            .help("Output path for the completion script (prints to stdout if not specified)")
                            .takes_value(true),
                    ),
            )
    }

    pub fn get_cli() -> App<'static> {
        Self::build_cli()
    }

    pub fn parse() -> Result<Self> {
        let matches = Self::build_cli().get_matches();
        Self::from_matches(&matches)
    }

    pub fn try_parse_from<I, T>(itr: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::build_cli()
            .try_get_matches_from(itr)
            .map_err(|err| SpriteError::Parse(err.to_string()))?;
        Self::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let command = match matches.subcommand() {
            Some(("list", sub)) => Command::List(batch_args(sub, sub.is_present("json"))),
            Some(("update", sub)) => {
                Command::Update(batch_args(sub, false), import_overrides(sub)?)
            }
            Some(("config", sub)) => {
                if let Some(values) = sub.values_of("set") {
                    let values: Vec<_> = values.collect();
                    Command::Config(ConfigAction::Set(
                        values[0].to_string(),
                        values[1].to_string(),
                    ))
                } else if sub.subcommand_matches("diff").is_some() {
                    Command::Config(ConfigAction::DiffDefault)
                } else {
                    Command::Config(ConfigAction::View)
                }
            }
            Some(("init", _)) => Command::Init,
            Some(("completion", sub)) => {
                let shell = match sub.value_of("shell").unwrap_or_default() {
                    "bash" => Shell::Bash,
                    "fish" => Shell::Fish,
                    "zsh" => Shell::Zsh,
                    "powershell" => Shell::PowerShell,
                    "elvish" => Shell::Elvish,
                    other => {
                        return Err(SpriteError::Parse(format!("Unsupported shell: {}", other)))
                    }
                };
                Command::GenerateCompletion(shell, sub.value_of("output").map(String::from))
            }
            _ => return Err(SpriteError::Parse("A command is required".into())),
        };

        // Global flags may be given before or after the subcommand.
        let sub = matches.subcommand().map(|(_, sub)| sub);
        let verbose = sub
            .map(|sub| sub.occurrences_of("verbose"))
            .unwrap_or(0)
            .max(matches.occurrences_of("verbose"));
        let no_color =
            matches.is_present("no-color") || sub.map_or(false, |sub| sub.is_present("no-color"));

        Ok(Args {
            verbose,
            no_color,
            command,
        })
    }
}

fn batch_args(matches: &ArgMatches, json: bool) -> BatchArgs {
    let filter = if let Some(text) = matches.value_of("prefix") {
        Some(FilterMode::Prefix(text.to_string()))
    } else if let Some(text) = matches.value_of("postfix") {
        Some(FilterMode::Postfix(text.to_string()))
    } else if let Some(pattern) = matches.value_of("regex") {
        Some(FilterMode::Regex(pattern.to_string()))
    } else if matches.is_present("no-filter") {
        Some(FilterMode::None)
    } else {
        None
    };

    BatchArgs {
        folder: matches.value_of("folder").map(String::from),
        filter,
        json,
        no_save: matches.is_present("no-save"),
    }
}

fn import_overrides(matches: &ArgMatches) -> Result<ImportOverrides> {
    Ok(ImportOverrides {
        border: matches.value_of("border").map(str::parse).transpose()?,
        alignment: matches.value_of("pivot").map(str::parse).transpose()?,
        custom_pivot: matches.value_of("custom-pivot").map(str::parse).transpose()?,
    })
}

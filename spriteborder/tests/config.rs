use spriteborder::commands::args::{Args, BatchArgs, Command, ConfigAction, ImportOverrides};
use spriteborder::commands::command_handler::resolve_batch;
use spriteborder::config::Config;
use spriteborder::error::{ConfigErrorKind, SpriteError};
use spriteborder::filter::{FilterKind, FilterMode};
use spriteborder::import::{Pivot, SpriteAlignment, SpriteBorder};
use std::fs;
use std::path::PathBuf;

#[test]
fn load_creates_defaults_when_missing() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nested").join("config.toml");

    let config = Config::load(&path).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.target_folder_path, "Assets/");
    assert_eq!(config.import.border, SpriteBorder::uniform(25.0));
    assert_eq!(config.filter.active, FilterKind::None);
    assert!(path.is_file());
}

#[test]
fn config_round_trips_through_toml() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.toml");

    let mut config = Config::default();
    config.target_folder_path = "Assets/Sprites/UI".into();
    config.filter.prefix = "btn_".into();
    config.filter.regex = "^icon_[0-9]+$".into();
    config.filter.activate(FilterKind::Regex);
    config.import.border = SpriteBorder::new(4.0, 8.0, 4.0, 8.0);
    config.import.alignment = SpriteAlignment::Custom;
    config.import.custom_pivot = Pivot::new(0.5, 0.25);
    config.save(&path).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("active = \"regex\""));
    assert!(contents.contains("alignment = \"custom\""));

    assert_eq!(Config::load(&path).unwrap(), config);
}

#[test]
fn partial_files_fill_in_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.toml");
    fs::write(&path, "[filter]\npostfix = \"_9s\"\nactive = \"postfix\"\n").unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.target_folder_path, "Assets/");
    assert_eq!(config.filter.mode(), FilterMode::Postfix("_9s".into()));
    assert_eq!(config.import.alignment, SpriteAlignment::Center);
}

#[test]
fn set_value_validates_keys_and_values() {
    let mut config = Config::default();

    config.set_value("filter.prefix", "hud_").unwrap();
    config.set_value("filter.active", "prefix").unwrap();
    config.set_value("import.border", "1,2,3,4").unwrap();
    config.set_value("import.alignment", "top-left").unwrap();
    config.set_value("import.custom_pivot", "0.1, 0.9").unwrap();
    assert_eq!(config.filter.mode(), FilterMode::Prefix("hud_".into()));
    assert_eq!(config.import.border, SpriteBorder::new(1.0, 2.0, 3.0, 4.0));
    assert_eq!(config.import.alignment, SpriteAlignment::TopLeft);
    assert_eq!(config.import.custom_pivot, Pivot::new(0.1, 0.9));

    config.set_value("filter.active", "regex").unwrap();
    assert!(!config.filter.is_active(FilterKind::Prefix));

    assert!(matches!(
        config.set_value("filter.regex", "(unclosed"),
        Err(SpriteError::Config(ConfigErrorKind::InvalidValue(_, _)))
    ));
    assert!(matches!(
        config.set_value("filter.active", "glob"),
        Err(SpriteError::Config(ConfigErrorKind::InvalidValue(_, _)))
    ));
    assert!(matches!(
        config.set_value("import.custom_pivot", "1"),
        Err(SpriteError::Config(ConfigErrorKind::InvalidValue(_, _)))
    ));
    assert!(matches!(
        config.set_value("theme", "dark"),
        Err(SpriteError::Config(ConfigErrorKind::UnknownKey(_)))
    ));
    assert!(config.set_value("target_folder_path", "  ").is_err());
}

#[test]
fn batch_overrides_are_written_back() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.toml");
    let mut config = Config::load(&path).unwrap();

    let batch = BatchArgs {
        folder: Some("Art/Sprites".into()),
        filter: Some(FilterMode::Postfix("_hover".into())),
        ..BatchArgs::default()
    };
    let overrides = ImportOverrides {
        border: Some(SpriteBorder::uniform(12.0)),
        ..ImportOverrides::default()
    };

    let (root, mode) = resolve_batch(&batch, &overrides, &mut config, &path).unwrap();
    assert_eq!(root, PathBuf::from("Art/Sprites"));
    assert_eq!(mode, FilterMode::Postfix("_hover".into()));

    let stored = Config::load(&path).unwrap();
    assert_eq!(stored.target_folder_path, "Art/Sprites");
    assert_eq!(stored.filter.active, FilterKind::Postfix);
    assert_eq!(stored.import.border, SpriteBorder::uniform(12.0));
}

#[test]
fn no_save_leaves_the_stored_config_alone() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.toml");
    let mut config = Config::load(&path).unwrap();

    let batch = BatchArgs {
        filter: Some(FilterMode::Regex("[".into())),
        no_save: true,
        ..BatchArgs::default()
    };
    let (_, mode) = resolve_batch(&batch, &ImportOverrides::default(), &mut config, &path).unwrap();

    assert_eq!(mode, FilterMode::Regex("[".into()));
    assert_eq!(Config::load(&path).unwrap(), Config::default());
}

#[test]
fn cli_filter_flags_are_mutually_exclusive() {
    let args = Args::try_parse_from(["spriteborder", "list", "Assets", "--prefix", "a_"]).unwrap();
    match args.command {
        Command::List(batch) => {
            assert_eq!(batch.folder.as_deref(), Some("Assets"));
            assert_eq!(batch.filter, Some(FilterMode::Prefix("a_".into())));
        }
        _ => panic!("expected list"),
    }

    assert!(Args::try_parse_from([
        "spriteborder",
        "list",
        "--prefix",
        "a_",
        "--regex",
        "^b"
    ])
    .is_err());
}

#[test]
fn cli_parses_import_overrides_and_config_actions() {
    let args = Args::try_parse_from([
        "spriteborder",
        "-v",
        "update",
        "--border",
        "5",
        "--pivot",
        "custom",
        "--custom-pivot",
        "0.5,-0.25",
        "--no-filter",
    ])
    .unwrap();
    assert_eq!(args.verbose, 1);
    match args.command {
        Command::Update(batch, overrides) => {
            assert_eq!(batch.filter, Some(FilterMode::None));
            assert_eq!(overrides.border, Some(SpriteBorder::uniform(5.0)));
            assert_eq!(overrides.alignment, Some(SpriteAlignment::Custom));
            assert_eq!(overrides.custom_pivot, Some(Pivot::new(0.5, -0.25)));
        }
        _ => panic!("expected update"),
    }

    let args =
        Args::try_parse_from(["spriteborder", "config", "--set", "filter.active", "none"]).unwrap();
    match args.command {
        Command::Config(action) => assert_eq!(
            action,
            ConfigAction::Set("filter.active".into(), "none".into())
        ),
        _ => panic!("expected config"),
    }
}

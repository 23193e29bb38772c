use crate::commands::args::ConfigAction;
use crate::error::{ConfigErrorKind, Result, SpriteError};
use crate::filter::{FilterKind, FilterSettings, RegexFilter};
use crate::import::{ImportSettings, Pivot, SpriteAlignment, SpriteBorder};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_HEADER: &str = "\
# spriteborder configuration
#
# target_folder_path  folder scanned for .png sprites (relative to the working directory)
# [filter]            prefix/postfix/regex texts; `active` selects at most one of them
# [import]            border = [left, bottom, right, top], alignment, custom_pivot = [x, y]
";

fn default_target_folder() -> String {
    "Assets/".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_target_folder")]
    pub target_folder_path: String,
    #[serde(default)]
    pub filter: FilterSettings,
    #[serde(default)]
    pub import: ImportSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_folder_path: default_target_folder(),
            filter: FilterSettings::default(),
            import: ImportSettings::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save(path)?;
            Ok(config)
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.generate_config_content()?)?;
        Ok(())
    }

    fn generate_config_content(&self) -> Result<String> {
        let body = toml::to_string_pretty(self)?;
        Ok(format!("{}\n{}", CONFIG_HEADER, body))
    }

    pub fn get_config_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config")
            .join("spriteborder")
            .join("config.toml")
    }

    /// The folder to scan, with a leading `~/` expanded.
    pub fn target_folder(&self) -> PathBuf {
        expand_tilde(&self.target_folder_path)
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_folder_path.trim().is_empty() {
            return Err(SpriteError::Config(ConfigErrorKind::ValidationError(
                "target_folder_path cannot be empty".to_string(),
            )));
        }

        let border: [f32; 4] = self.import.border.into();
        if border.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(SpriteError::Config(ConfigErrorKind::ValidationError(
                "import.border values must be finite and non-negative".to_string(),
            )));
        }

        let pivot = self.import.custom_pivot;
        if !pivot.x.is_finite() || !pivot.y.is_finite() {
            return Err(SpriteError::Config(ConfigErrorKind::ValidationError(
                "import.custom_pivot values must be finite".to_string(),
            )));
        }

        Ok(())
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key.split('.').collect::<Vec<_>>().as_slice() {
            ["target_folder_path"] => {
                if value.trim().is_empty() {
                    return Err(SpriteError::Config(ConfigErrorKind::InvalidValue(
                        key.to_string(),
                        "cannot be empty".to_string(),
                    )));
                }
                self.target_folder_path = value.to_string();
            }
            ["filter", "prefix"] => self.filter.prefix = value.to_string(),
            ["filter", "postfix"] => self.filter.postfix = value.to_string(),
            ["filter", "regex"] => {
                if !value.is_empty() {
                    RegexFilter::new(value).map_err(|err| {
                        SpriteError::Config(ConfigErrorKind::InvalidValue(
                            key.to_string(),
                            err.to_string(),
                        ))
                    })?;
                }
                self.filter.regex = value.to_string();
            }
            ["filter", "active"] => {
                let kind: FilterKind = value.parse()?;
                self.filter.activate(kind);
            }
            ["import", "border"] => {
                let border: SpriteBorder = value.parse().map_err(|err: SpriteError| {
                    SpriteError::Config(ConfigErrorKind::InvalidValue(
                        key.to_string(),
                        err.to_string(),
                    ))
                })?;
                self.import.border = border;
            }
            ["import", "alignment"] => {
                self.import.alignment = value.parse::<SpriteAlignment>()?;
            }
            ["import", "custom_pivot"] => {
                let pivot: Pivot = value.parse().map_err(|err: SpriteError| {
                    SpriteError::Config(ConfigErrorKind::InvalidValue(
                        key.to_string(),
                        err.to_string(),
                    ))
                })?;
                self.import.custom_pivot = pivot;
            }
            _ => {
                return Err(SpriteError::Config(ConfigErrorKind::UnknownKey(
                    key.to_string(),
                )))
            }
        }

        Ok(())
    }
}

fn expand_tilde(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

pub fn initialize_config() -> Result<()> {
    let config_path = Config::get_config_path();
    if config_path.exists() {
        println!("Config file already exists at {:?}", config_path);
        println!("Use `spriteborder config` to view or modify the configuration.");
        return Ok(());
    }

    Config::default().save(&config_path)?;
    println!("Created default configuration at {:?}", config_path);
    Ok(())
}

pub fn handle_config_command(action: ConfigAction, config: &mut Config) -> Result<()> {
    match action {
        ConfigAction::View => view_config(config),
        ConfigAction::Set(key, value) => {
            config.set_value(&key, &value)?;
            config.save(&Config::get_config_path())?;
            println!("Updated {} = {}", key, value);
            Ok(())
        }
        ConfigAction::DiffDefault => diff_with_defaults(config),
    }
}

pub fn view_config(config: &Config) -> Result<()> {
    println!("Current configuration at {:?}:", Config::get_config_path());
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn diff_with_defaults(config: &Config) -> Result<()> {
    let defaults = flatten_config(&Config::default())?;
    let current = flatten_config(config)?;

    let mut any = false;
    for (key, value) in &current {
        let default_value = defaults.get(key);
        if default_value == Some(value) {
            continue;
        }
        if !any {
            println!("Overrides compared to built-in defaults:\n");
            any = true;
        }
        println!("{}", key);
        println!("  default : {}", option_value_to_string(default_value));
        println!("  current : {}", json_value_to_string(value));
        println!();
    }

    if !any {
        println!("Configuration matches built-in defaults.");
    }
    Ok(())
}

fn flatten_config(config: &Config) -> Result<BTreeMap<String, JsonValue>> {
    let root = serde_json::to_value(config)?;
    let mut map = BTreeMap::new();
    flatten_json("", &root, &mut map);
    Ok(map)
}

fn flatten_json(prefix: &str, value: &JsonValue, map: &mut BTreeMap<String, JsonValue>) {
    match value {
        JsonValue::Object(obj) => {
            for (key, child) in obj {
                let next_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_json(&next_prefix, child, map);
            }
        }
        _ => {
            if !prefix.is_empty() {
                map.insert(prefix.to_string(), value.clone());
            }
        }
    }
}

fn option_value_to_string(value: Option<&JsonValue>) -> String {
    value
        .map(json_value_to_string)
        .unwrap_or_else(|| "<unset>".to_string())
}

fn json_value_to_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => format!("\"{}\"", s),
        JsonValue::Array(arr) => {
            let items: Vec<String> = arr.iter().map(json_value_to_string).collect();
            format!("[{}]", items.join(", "))
        }
        other => other.to_string(),
    }
}

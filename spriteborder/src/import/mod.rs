//! Sprite import parameters and the collaborator that persists them.
//!
//! The values here are pass-through configuration: the batch never computes
//! them, it hands the same [`ImportSettings`] to the importer for every
//! selected asset.

use crate::error::{ConfigErrorKind, Result, SpriteError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

mod meta;

pub use meta::{rewrite_meta, MetaFileImporter};

/// 9-slice insets in pixels. Negative values are clamped to zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct SpriteBorder {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl SpriteBorder {
    pub fn new(left: f32, bottom: f32, right: f32, top: f32) -> Self {
        Self {
            left: clamp_inset(left),
            bottom: clamp_inset(bottom),
            right: clamp_inset(right),
            top: clamp_inset(top),
        }
    }

    pub fn uniform(inset: f32) -> Self {
        Self::new(inset, inset, inset, inset)
    }
}

fn clamp_inset(value: f32) -> f32 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
}

impl Default for SpriteBorder {
    fn default() -> Self {
        Self::uniform(25.0)
    }
}

impl From<[f32; 4]> for SpriteBorder {
    fn from([left, bottom, right, top]: [f32; 4]) -> Self {
        Self::new(left, bottom, right, top)
    }
}

impl From<SpriteBorder> for [f32; 4] {
    fn from(border: SpriteBorder) -> Self {
        [border.left, border.bottom, border.right, border.top]
    }
}

impl FromStr for SpriteBorder {
    type Err = SpriteError;

    /// Accepts `"L,B,R,T"` or a single value applied to every edge.
    fn from_str(s: &str) -> Result<Self> {
        let values = parse_floats(s, "border")?;
        match values.as_slice() {
            [inset] => Ok(Self::uniform(*inset)),
            [left, bottom, right, top] => Ok(Self::new(*left, *bottom, *right, *top)),
            _ => Err(SpriteError::Parse(format!(
                "Border expects 1 or 4 comma-separated values, got {}",
                values.len()
            ))),
        }
    }
}

impl fmt::Display for SpriteBorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "L {} B {} R {} T {}",
            self.left, self.bottom, self.right, self.top
        )
    }
}

/// Normalized pivot coordinate, used when the alignment is [`SpriteAlignment::Custom`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Pivot {
    pub x: f32,
    pub y: f32,
}

impl Pivot {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<[f32; 2]> for Pivot {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Pivot> for [f32; 2] {
    fn from(pivot: Pivot) -> Self {
        [pivot.x, pivot.y]
    }
}

impl FromStr for Pivot {
    type Err = SpriteError;

    fn from_str(s: &str) -> Result<Self> {
        match parse_floats(s, "pivot")?.as_slice() {
            [x, y] if x.is_finite() && y.is_finite() => Ok(Self::new(*x, *y)),
            _ => Err(SpriteError::Parse(format!(
                "Pivot expects two finite comma-separated values, got '{}'",
                s
            ))),
        }
    }
}

fn parse_floats(s: &str, what: &str) -> Result<Vec<f32>> {
    s.split(',')
        .map(|part| {
            part.trim().parse::<f32>().map_err(|_| {
                SpriteError::Parse(format!("Invalid {} value '{}'", what, part.trim()))
            })
        })
        .collect()
}

/// Anchor point of a sprite. Discriminants follow the importer's stored index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpriteAlignment {
    #[default]
    Center = 0,
    TopLeft = 1,
    TopCenter = 2,
    TopRight = 3,
    LeftCenter = 4,
    RightCenter = 5,
    BottomLeft = 6,
    BottomCenter = 7,
    BottomRight = 8,
    Custom = 9,
}

impl SpriteAlignment {
    pub const ALL: [SpriteAlignment; 10] = [
        SpriteAlignment::Center,
        SpriteAlignment::TopLeft,
        SpriteAlignment::TopCenter,
        SpriteAlignment::TopRight,
        SpriteAlignment::LeftCenter,
        SpriteAlignment::RightCenter,
        SpriteAlignment::BottomLeft,
        SpriteAlignment::BottomCenter,
        SpriteAlignment::BottomRight,
        SpriteAlignment::Custom,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SpriteAlignment::Center => "center",
            SpriteAlignment::TopLeft => "top-left",
            SpriteAlignment::TopCenter => "top-center",
            SpriteAlignment::TopRight => "top-right",
            SpriteAlignment::LeftCenter => "left-center",
            SpriteAlignment::RightCenter => "right-center",
            SpriteAlignment::BottomLeft => "bottom-left",
            SpriteAlignment::BottomCenter => "bottom-center",
            SpriteAlignment::BottomRight => "bottom-right",
            SpriteAlignment::Custom => "custom",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|a| a.as_str()).collect()
    }
}

impl fmt::Display for SpriteAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpriteAlignment {
    type Err = SpriteError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == normalized || a.index().to_string() == normalized)
            .ok_or_else(|| {
                SpriteError::Config(ConfigErrorKind::InvalidValue(
                    "import.alignment".to_string(),
                    format!("must be one of: {}", Self::names().join(", ")),
                ))
            })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportSettings {
    #[serde(default)]
    pub border: SpriteBorder,
    #[serde(default)]
    pub alignment: SpriteAlignment,
    #[serde(default)]
    pub custom_pivot: Pivot,
}

impl ImportSettings {
    /// The pivot to write, present only for a custom alignment.
    pub fn pivot(&self) -> Option<Pivot> {
        match self.alignment {
            SpriteAlignment::Custom => Some(self.custom_pivot),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    MissingMeta,
    NoImporterBlock,
    NotSingleSprite,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingMeta => write!(f, "no .meta file"),
            SkipReason::NoImporterBlock => write!(f, "no TextureImporter settings"),
            SkipReason::NotSingleSprite => write!(f, "not imported as a single sprite"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportOutcome {
    Updated,
    Skipped(SkipReason),
}

/// Writes sprite import settings for one asset.
pub trait SpriteImporter {
    fn apply(&mut self, asset: &Path, settings: &ImportSettings) -> Result<ImportOutcome>;
}

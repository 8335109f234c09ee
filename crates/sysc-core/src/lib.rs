//! Core types shared by the sysc crates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Animation effect selectable from the command line or config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    #[default]
    Fire,
    Matrix,
    Rain,
    Fireworks,
    Decrypt,
    Pour,
    Print,
    Beams,
}

impl EffectKind {
    /// Every effect, in the order the `e` key cycles through them.
    pub const ALL: [EffectKind; 8] = [
        EffectKind::Fire,
        EffectKind::Matrix,
        EffectKind::Rain,
        EffectKind::Fireworks,
        EffectKind::Decrypt,
        EffectKind::Pour,
        EffectKind::Print,
        EffectKind::Beams,
    ];

    /// Name used on the command line and in config files.
    pub fn name(self) -> &'static str {
        match self {
            EffectKind::Fire => "fire",
            EffectKind::Matrix => "matrix",
            EffectKind::Rain => "rain",
            EffectKind::Fireworks => "fireworks",
            EffectKind::Decrypt => "decrypt",
            EffectKind::Pour => "pour",
            EffectKind::Print => "print",
            EffectKind::Beams => "beams",
        }
    }

    /// Cycle to the next effect.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Whether the effect reveals input text rather than running forever.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            EffectKind::Decrypt | EffectKind::Pour | EffectKind::Print | EffectKind::Beams
        )
    }

    /// Recommended interval between frames in milliseconds.
    pub fn frame_interval_ms(self) -> u64 {
        match self {
            EffectKind::Print => 30,
            _ => 50,
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when an effect name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEffectError {
    name: String,
}

impl fmt::Display for ParseEffectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let available: Vec<&str> = EffectKind::ALL.iter().map(|k| k.name()).collect();
        write!(
            f,
            "unknown effect '{}' (available: {})",
            self.name,
            available.join(", ")
        )
    }
}

impl std::error::Error for ParseEffectError {}

impl FromStr for EffectKind {
    type Err = ParseEffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        EffectKind::ALL
            .into_iter()
            .find(|k| k.name() == needle)
            .ok_or_else(|| ParseEffectError {
                name: s.to_string(),
            })
    }
}

/// Named color theme.
///
/// Theme names coming from users are kept as strings until palettes are
/// resolved, so an unknown name can still fall back to a default palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Dracula,
    Gruvbox,
    Nord,
    TokyoNight,
    Catppuccin,
    Material,
    Solarized,
    Monochrome,
    TransIsHardJob,
}

impl Theme {
    /// Every built-in theme, in cycling order.
    pub const ALL: [Theme; 9] = [
        Theme::Dracula,
        Theme::Gruvbox,
        Theme::Nord,
        Theme::TokyoNight,
        Theme::Catppuccin,
        Theme::Material,
        Theme::Solarized,
        Theme::Monochrome,
        Theme::TransIsHardJob,
    ];

    /// Look up a theme by name. Case-insensitive; `_` and a missing dash are
    /// accepted for `tokyo-night`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase().replace('_', "-");
        match name.as_str() {
            "dracula" => Some(Theme::Dracula),
            "gruvbox" => Some(Theme::Gruvbox),
            "nord" => Some(Theme::Nord),
            "tokyo-night" | "tokyonight" => Some(Theme::TokyoNight),
            "catppuccin" => Some(Theme::Catppuccin),
            "material" => Some(Theme::Material),
            "solarized" => Some(Theme::Solarized),
            "monochrome" => Some(Theme::Monochrome),
            "transishardjob" => Some(Theme::TransIsHardJob),
            _ => None,
        }
    }

    /// Canonical theme name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::Dracula => "dracula",
            Theme::Gruvbox => "gruvbox",
            Theme::Nord => "nord",
            Theme::TokyoNight => "tokyo-night",
            Theme::Catppuccin => "catppuccin",
            Theme::Material => "material",
            Theme::Solarized => "solarized",
            Theme::Monochrome => "monochrome",
            Theme::TransIsHardJob => "transishardjob",
        }
    }

    /// Short description shown in `--help`.
    pub fn description(self) -> &'static str {
        match self {
            Theme::Dracula => "Purple and pink vampiric vibes",
            Theme::Gruvbox => "Retro warm colors",
            Theme::Nord => "Cool arctic palette",
            Theme::TokyoNight => "Neon Tokyo nights",
            Theme::Catppuccin => "Soothing pastel tones",
            Theme::Material => "Google Material colors",
            Theme::Solarized => "Classic precision colors",
            Theme::Monochrome => "Grayscale aesthetic",
            Theme::TransIsHardJob => "Trans pride colors",
        }
    }

    /// Cycle to the next theme.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! Configuration file handling for sysc.
//!
//! Settings live in `<config dir>/sysc/config.toml`. Every field is optional;
//! missing fields take their defaults and command line flags override
//! whatever the file says.

use std::{
    fs,
    path::{Path, PathBuf},
};

use color_eyre::eyre::{OptionExt, Result, WrapErr};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sysc_core::EffectKind;

/// Default run length in seconds.
pub const DEFAULT_DURATION: u64 = 10;

/// Default theme name.
pub const DEFAULT_THEME: &str = "dracula";

/// Contents of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Effect to run.
    pub effect: EffectKind,
    /// Theme name. Unknown names fall back to each effect's default colors.
    pub theme: String,
    /// Seconds to run for, 0 runs until quit.
    pub duration: u64,
    /// Text file for the text effects.
    pub file: Option<PathBuf>,
    /// Fixed random seed.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            effect: EffectKind::default(),
            theme: DEFAULT_THEME.to_string(),
            duration: DEFAULT_DURATION,
            file: None,
            seed: None,
        }
    }
}

impl Config {
    /// Location of the configuration file for this platform.
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "sysc").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load the default configuration file.
    ///
    /// A missing file gives the defaults silently; an unreadable or malformed
    /// one is logged and also gives the defaults.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config");
                config
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), "using default config: {err:#}");
                Self::default()
            }
        }
    }

    /// Load a configuration file that must exist and parse.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .wrap_err_with(|| format!("failed to parse config file {}", path.display()))
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Write the commented default configuration file, returning its path.
    pub fn write_default() -> Result<PathBuf> {
        let path = Self::path().ok_or_eyre("could not determine config directory")?;
        let dir = path.parent().ok_or_eyre("invalid config path")?;
        fs::create_dir_all(dir)
            .wrap_err_with(|| format!("failed to create config directory {}", dir.display()))?;
        fs::write(&path, DEFAULT_CONFIG)
            .wrap_err_with(|| format!("failed to write config file {}", path.display()))?;
        Ok(path)
    }
}

/// Template written by `sysc --init`.
pub const DEFAULT_CONFIG: &str = r##"## sysc configuration file
## All fields are optional; command line flags take precedence.

## fire, matrix, rain, fireworks, decrypt, pour, print or beams
effect = "fire"

## dracula, gruvbox, nord, tokyo-night, catppuccin, material, solarized,
## monochrome or transishardjob
theme = "dracula"

## Seconds to run for, 0 runs until quit
duration = 10

## Text file for decrypt, pour, print and beams
# file = "/path/to/text.txt"

## Fixed random seed for reproducible runs
# seed = 42
"##;

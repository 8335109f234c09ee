//! Theme palettes for every effect family.
//!
//! Palettes are resolved from a closed table keyed by (family, theme). An
//! unknown theme name never fails: it resolves to the family's default row.

use rand::Rng;
use ratatui::style::Color;
use sysc_core::Theme;

use crate::color::{WHITE, hex_to_color, luminance};

/// Group of effects that share a palette shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteFamily {
    /// Fire heat ramp, coolest to hottest.
    Fire,
    /// Matrix trail ramp, dimmest to brightest.
    Matrix,
    /// Rain drop colors, drawn uniformly.
    Rain,
    /// Firework spark colors, drawn uniformly.
    Fireworks,
    /// Decrypt ciphertext colors.
    DecryptCipher,
    /// Decrypt final gradient stops.
    DecryptFinal,
    /// Pour final gradient stops.
    Pour,
    /// Print final gradient stops.
    Print,
    /// Beams beam gradient stops.
    BeamsBeam,
    /// Beams final gradient stops.
    BeamsFinal,
}

/// Non-empty ordered list of colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Build a palette; an empty list degrades to plain white.
    pub fn new(colors: Vec<Color>) -> Self {
        if colors.is_empty() {
            return Self {
                colors: vec![WHITE],
            };
        }
        Self { colors }
    }

    /// Build a palette from `#rrggbb` strings, skipping invalid entries.
    pub fn from_hex(hex: &[&str]) -> Self {
        Self::new(hex.iter().filter_map(|h| hex_to_color(h)).collect())
    }

    /// Resolve the palette for a family and theme name.
    pub fn resolve(family: PaletteFamily, theme: &str) -> Self {
        let theme = Theme::from_name(theme);
        if theme.is_none() {
            tracing::debug!(?family, "unknown theme, using default palette");
        }
        Self::from_hex(table(family, theme))
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn first(&self) -> Color {
        self.colors[0]
    }

    pub fn last(&self) -> Color {
        self.colors[self.colors.len() - 1]
    }

    /// Color at `idx`, clamped to the last entry.
    pub fn get(&self, idx: usize) -> Color {
        self.colors[idx.min(self.colors.len() - 1)]
    }

    /// Uniformly random entry.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        self.colors[rng.gen_range(0..self.colors.len())]
    }

    /// Map `value` in `0..=max` onto the ordered entries.
    pub fn bucket(&self, value: u32, max: u32) -> Color {
        if max == 0 {
            return self.last();
        }
        let idx = value.min(max) as usize * (self.colors.len() - 1) / max as usize;
        self.colors[idx]
    }

    /// Entry with the highest perceived brightness.
    pub fn brightest(&self) -> Color {
        self.colors
            .iter()
            .copied()
            .max_by_key(|c| luminance(*c))
            .unwrap_or(WHITE)
    }
}

fn table(family: PaletteFamily, theme: Option<Theme>) -> &'static [&'static str] {
    match family {
        PaletteFamily::Fire => fire_table(theme),
        PaletteFamily::Matrix => matrix_table(theme),
        PaletteFamily::Rain => rain_table(theme),
        PaletteFamily::Fireworks => fireworks_table(theme),
        PaletteFamily::DecryptCipher => match theme {
            Some(Theme::Monochrome) => &["#808080", "#a0a0a0", "#c0c0c0"],
            _ => &["#008000", "#00cb00", "#00ff00"],
        },
        PaletteFamily::DecryptFinal => match theme {
            Some(Theme::Dracula) => &["#ff79c6"],
            Some(Theme::Gruvbox) => &["#fe8019"],
            Some(Theme::Nord) => &["#88c0d0"],
            Some(Theme::TokyoNight) => &["#9ece6a"],
            Some(Theme::Catppuccin) => &["#cba6f7"],
            Some(Theme::Material) => &["#03dac6"],
            Some(Theme::Solarized) => &["#268bd2"],
            Some(Theme::Monochrome) => &["#ffffff"],
            Some(Theme::TransIsHardJob) => &["#55cdfc"],
            None => &["#eda000"],
        },
        PaletteFamily::Pour => match theme {
            Some(Theme::Dracula) => &["#ff79c6", "#bd93f9", "#ffffff"],
            Some(Theme::Gruvbox) => &["#fe8019", "#fabd2f", "#ffffff"],
            Some(Theme::Nord) => &["#88c0d0", "#81a1c1", "#ffffff"],
            Some(Theme::TokyoNight) => &["#9ece6a", "#e0af68", "#ffffff"],
            Some(Theme::Catppuccin) => &["#cba6f7", "#f5c2e7", "#ffffff"],
            Some(Theme::Material) => &["#03dac6", "#bb86fc", "#ffffff"],
            Some(Theme::Solarized) => &["#268bd2", "#2aa198", "#ffffff"],
            Some(Theme::Monochrome) => &["#808080", "#c0c0c0", "#ffffff"],
            Some(Theme::TransIsHardJob) => &["#55cdfc", "#f7a8b8", "#ffffff"],
            None => &["#8A008A", "#00D1FF", "#FFFFFF"],
        },
        PaletteFamily::Print => match theme {
            Some(Theme::Dracula) => &["#ff79c6", "#bd93f9", "#8be9fd"],
            Some(Theme::Gruvbox) => &["#fe8019", "#fabd2f", "#b8bb26"],
            Some(Theme::Nord) => &["#88c0d0", "#81a1c1", "#5e81ac"],
            Some(Theme::TokyoNight) => &["#9ece6a", "#e0af68", "#bb9af7"],
            Some(Theme::Catppuccin) => &["#cba6f7", "#f5c2e7", "#f5e0dc"],
            Some(Theme::Material) => &["#03dac6", "#bb86fc", "#cf6679"],
            Some(Theme::Solarized) => &["#268bd2", "#2aa198", "#859900"],
            Some(Theme::Monochrome) => &["#808080", "#c0c0c0", "#ffffff"],
            Some(Theme::TransIsHardJob) => &["#55cdfc", "#f7a8b8", "#ffffff"],
            None => &["#8A008A", "#00D1FF", "#FFFFFF"],
        },
        PaletteFamily::BeamsBeam => match theme {
            Some(Theme::Dracula) => &["#ffffff", "#8be9fd", "#bd93f9"],
            Some(Theme::Gruvbox) => &["#ffffff", "#fabd2f", "#fe8019"],
            Some(Theme::Nord) => &["#ffffff", "#88c0d0", "#81a1c1"],
            Some(Theme::TokyoNight) => &["#ffffff", "#7dcfff", "#bb9af7"],
            Some(Theme::Catppuccin) => &["#ffffff", "#89dceb", "#cba6f7"],
            Some(Theme::Material) => &["#ffffff", "#89ddff", "#bb86fc"],
            Some(Theme::Solarized) => &["#ffffff", "#2aa198", "#268bd2"],
            Some(Theme::Monochrome) => &["#ffffff", "#c0c0c0", "#808080"],
            Some(Theme::TransIsHardJob) => &["#ffffff", "#55cdfc", "#f7a8b8"],
            None => &["#ffffff", "#00D1FF", "#8A008A"],
        },
        PaletteFamily::BeamsFinal => match theme {
            Some(Theme::Dracula) => &["#6272a4", "#bd93f9", "#f8f8f2"],
            Some(Theme::Gruvbox) => &["#504945", "#fabd2f", "#ebdbb2"],
            Some(Theme::Nord) => &["#434c5e", "#88c0d0", "#eceff4"],
            Some(Theme::TokyoNight) => &["#414868", "#7aa2f7", "#c0caf5"],
            Some(Theme::Catppuccin) => &["#45475a", "#cba6f7", "#cdd6f4"],
            Some(Theme::Material) => &["#546e7a", "#89ddff", "#eceff1"],
            Some(Theme::Solarized) => &["#586e75", "#2aa198", "#fdf6e3"],
            Some(Theme::Monochrome) => &["#3a3a3a", "#9a9a9a", "#ffffff"],
            Some(Theme::TransIsHardJob) => &["#55cdfc", "#f7a8b8", "#ffffff"],
            None => &["#4A4A4A", "#00D1FF", "#FFFFFF"],
        },
    }
}

fn fire_table(theme: Option<Theme>) -> &'static [&'static str] {
    match theme {
        Some(Theme::Dracula) => &[
            "#44475a", "#6272a4", "#bd93f9", "#ff79c6", "#ff5555", "#ffb86c", "#f1fa8c", "#f8f8f2",
        ],
        Some(Theme::Gruvbox) => &[
            "#3c3836", "#9d0006", "#cc241d", "#d65d0e", "#fe8019", "#fabd2f", "#fbf1c7",
        ],
        Some(Theme::Nord) => &[
            "#2e3440", "#4c566a", "#5e81ac", "#81a1c1", "#88c0d0", "#8fbcbb", "#eceff4",
        ],
        Some(Theme::TokyoNight) => &[
            "#1a1b26", "#414868", "#f7768e", "#ff9e64", "#e0af68", "#c0caf5",
        ],
        Some(Theme::Catppuccin) => &[
            "#313244", "#eba0ac", "#f38ba8", "#fab387", "#f9e2af", "#f5e0dc",
        ],
        Some(Theme::Material) => &[
            "#263238", "#b71c1c", "#e53935", "#ff7043", "#ffa726", "#ffee58", "#ffffff",
        ],
        Some(Theme::Solarized) => &[
            "#073642", "#dc322f", "#cb4b16", "#b58900", "#eee8d5", "#fdf6e3",
        ],
        Some(Theme::Monochrome) => &[
            "#1c1c1c", "#3a3a3a", "#585858", "#808080", "#a8a8a8", "#d0d0d0", "#ffffff",
        ],
        Some(Theme::TransIsHardJob) => &["#55cdfc", "#7fd6fc", "#f7a8b8", "#f9c3cf", "#ffffff"],
        // Classic PSX Doom ramp
        None => &[
            "#070707", "#470f07", "#8f2707", "#c74707", "#df5707", "#cf6f0f", "#c78f17", "#bf9f1f",
            "#b7b72f", "#ffffff",
        ],
    }
}

fn matrix_table(theme: Option<Theme>) -> &'static [&'static str] {
    match theme {
        Some(Theme::Dracula) => &[
            "#282a36", "#44475a", "#6272a4", "#bd93f9", "#ff79c6", "#f8f8f2",
        ],
        Some(Theme::Gruvbox) => &[
            "#1d2021", "#3c3836", "#79740e", "#98971a", "#b8bb26", "#ebdbb2",
        ],
        Some(Theme::Nord) => &[
            "#2e3440", "#3b4252", "#5e81ac", "#81a1c1", "#88c0d0", "#eceff4",
        ],
        Some(Theme::TokyoNight) => &[
            "#1a1b26", "#24283b", "#414868", "#7aa2f7", "#7dcfff", "#c0caf5",
        ],
        Some(Theme::Catppuccin) => &[
            "#1e1e2e", "#313244", "#45475a", "#a6e3a1", "#94e2d5", "#cdd6f4",
        ],
        Some(Theme::Material) => &[
            "#263238", "#37474f", "#00695c", "#00897b", "#1de9b6", "#eceff1",
        ],
        Some(Theme::Solarized) => &[
            "#002b36", "#073642", "#586e75", "#859900", "#2aa198", "#fdf6e3",
        ],
        Some(Theme::Monochrome) => &[
            "#1c1c1c", "#3a3a3a", "#585858", "#808080", "#c0c0c0", "#ffffff",
        ],
        Some(Theme::TransIsHardJob) => &[
            "#1c2a33", "#55cdfc", "#7fd6fc", "#f7a8b8", "#f9c3cf", "#ffffff",
        ],
        None => &[
            "#001100", "#003b00", "#006600", "#008f11", "#00cc33", "#00ff41", "#ccffcc",
        ],
    }
}

fn rain_table(theme: Option<Theme>) -> &'static [&'static str] {
    match theme {
        Some(Theme::Dracula) => &["#6272a4", "#8be9fd", "#bd93f9", "#ff79c6", "#f8f8f2"],
        Some(Theme::Gruvbox) => &["#458588", "#83a598", "#689d6a", "#8ec07c", "#ebdbb2"],
        Some(Theme::Nord) => &["#5e81ac", "#81a1c1", "#88c0d0", "#8fbcbb", "#d8dee9"],
        Some(Theme::TokyoNight) => &["#7aa2f7", "#7dcfff", "#2ac3de", "#bb9af7", "#c0caf5"],
        Some(Theme::Catppuccin) => &["#89b4fa", "#74c7ec", "#89dceb", "#b4befe", "#cdd6f4"],
        Some(Theme::Material) => &["#2196f3", "#03a9f4", "#00bcd4", "#80deea", "#e1f5fe"],
        Some(Theme::Solarized) => &["#268bd2", "#2aa198", "#6c71c4", "#93a1a1", "#eee8d5"],
        Some(Theme::Monochrome) => &["#585858", "#808080", "#a8a8a8", "#d0d0d0", "#ffffff"],
        Some(Theme::TransIsHardJob) => &["#55cdfc", "#f7a8b8", "#ffffff"],
        None => &["#00aaff", "#0088cc", "#66ccff", "#99ddff"],
    }
}

fn fireworks_table(theme: Option<Theme>) -> &'static [&'static str] {
    match theme {
        Some(Theme::Dracula) => &[
            "#ff79c6", "#bd93f9", "#8be9fd", "#50fa7b", "#f1fa8c", "#ffb86c", "#ff5555",
        ],
        Some(Theme::Gruvbox) => &[
            "#fb4934", "#b8bb26", "#fabd2f", "#83a598", "#d3869b", "#8ec07c", "#fe8019",
        ],
        Some(Theme::Nord) => &[
            "#bf616a", "#d08770", "#ebcb8b", "#a3be8c", "#b48ead", "#88c0d0",
        ],
        Some(Theme::TokyoNight) => &[
            "#f7768e", "#ff9e64", "#e0af68", "#9ece6a", "#7dcfff", "#bb9af7",
        ],
        Some(Theme::Catppuccin) => &[
            "#f38ba8", "#fab387", "#f9e2af", "#a6e3a1", "#89dceb", "#cba6f7", "#f5c2e7",
        ],
        Some(Theme::Material) => &[
            "#ff5252", "#ffab40", "#ffff00", "#69f0ae", "#40c4ff", "#e040fb",
        ],
        Some(Theme::Solarized) => &[
            "#dc322f", "#cb4b16", "#b58900", "#859900", "#2aa198", "#268bd2", "#d33682",
        ],
        Some(Theme::Monochrome) => &["#808080", "#a8a8a8", "#d0d0d0", "#ffffff"],
        Some(Theme::TransIsHardJob) => &["#55cdfc", "#f7a8b8", "#ffffff"],
        None => &[
            "#ff0000", "#ff8800", "#ffff00", "#00ff00", "#00ffff", "#0088ff", "#ff00ff",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    const FAMILIES: [PaletteFamily; 10] = [
        PaletteFamily::Fire,
        PaletteFamily::Matrix,
        PaletteFamily::Rain,
        PaletteFamily::Fireworks,
        PaletteFamily::DecryptCipher,
        PaletteFamily::DecryptFinal,
        PaletteFamily::Pour,
        PaletteFamily::Print,
        PaletteFamily::BeamsBeam,
        PaletteFamily::BeamsFinal,
    ];

    #[test]
    fn every_table_entry_parses() {
        for family in FAMILIES {
            let themes = Theme::ALL.into_iter().map(Some).chain([None]);
            for theme in themes {
                let hex = table(family, theme);
                let palette = Palette::from_hex(hex);
                assert_eq!(palette.len(), hex.len(), "{family:?} {theme:?}");
            }
        }
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        for family in FAMILIES {
            let palette = Palette::resolve(family, "no-such-theme");
            assert_eq!(palette, Palette::from_hex(table(family, None)));
            assert!(!palette.is_empty());
        }
    }

    #[test]
    fn known_theme_resolves_its_row() {
        let nord = Palette::resolve(PaletteFamily::Pour, "NORD");
        assert_eq!(nord.first(), Color::Rgb(0x88, 0xc0, 0xd0));
        assert_eq!(nord.last(), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn empty_palette_degrades_to_white() {
        let palette = Palette::from_hex(&["bogus", ""]);
        assert_eq!(palette.colors(), &[WHITE]);
    }

    #[test]
    fn bucket_maps_ends_to_first_and_last() {
        let palette = Palette::resolve(PaletteFamily::Fire, "gruvbox");
        assert_eq!(palette.bucket(0, 36), palette.first());
        assert_eq!(palette.bucket(36, 36), palette.last());
        assert_eq!(palette.bucket(99, 36), palette.last());
        assert_eq!(palette.bucket(5, 0), palette.last());
    }

    #[test]
    fn pick_stays_in_palette() {
        let palette = Palette::resolve(PaletteFamily::Rain, "dracula");
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(palette.colors().contains(&palette.pick(&mut rng)));
        }
    }

    #[test]
    fn brightest_picks_highest_luminance() {
        let palette = Palette::resolve(PaletteFamily::DecryptCipher, "dracula");
        assert_eq!(palette.brightest(), Color::Rgb(0, 255, 0));
    }
}

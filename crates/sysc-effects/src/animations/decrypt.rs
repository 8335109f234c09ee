//! Decrypt: ciphertext that resolves into the real text.

use rand::{Rng, rngs::StdRng, seq::SliceRandom};

use super::{Animation, grid_size};
use crate::canvas::Canvas;
use crate::chars::CIPHER_CHARS;
use crate::gradient::{Gradient, GradientDirection, GradientSpec, build_gradient};
use crate::layout::{TextCell, layout_text, text_or};
use crate::palette::{Palette, PaletteFamily};

/// Text shown when no input text is given.
pub const PLACEHOLDER: &str = "DECRYPT ME";

/// Order in which cells are revealed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RevealOrder {
    /// Reading order: left to right, top to bottom.
    #[default]
    Sequential,
    /// A shuffle chosen once when the effect is built.
    Random,
}

/// Decrypt settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DecryptConfig {
    pub width: u16,
    pub height: u16,
    pub text: String,
    /// Colors of the scrambled glyphs.
    pub cipher_palette: Palette,
    /// Colors the revealed text settles on.
    pub final_gradient: GradientSpec,
    /// Cells revealed per tick.
    pub typing_speed: usize,
    /// Chance per tick that an unrevealed glyph changes.
    pub scramble_chance: f64,
    pub order: RevealOrder,
}

impl Default for DecryptConfig {
    fn default() -> Self {
        Self::for_theme(80, 24, "")
    }
}

impl DecryptConfig {
    /// Default settings with the theme's cipher and final colors.
    pub fn for_theme(width: u16, height: u16, theme: &str) -> Self {
        let stops = Palette::resolve(PaletteFamily::DecryptFinal, theme);
        Self {
            width,
            height,
            text: PLACEHOLDER.to_string(),
            cipher_palette: Palette::resolve(PaletteFamily::DecryptCipher, theme),
            final_gradient: GradientSpec::new(
                stops.colors().to_vec(),
                12,
                2,
                GradientDirection::Vertical,
            ),
            typing_speed: 2,
            scramble_chance: 0.25,
            order: RevealOrder::Sequential,
        }
    }
}

/// Scrambled cipher glyphs revealed a few cells per tick.
#[derive(Debug)]
pub struct DecryptEffect {
    config: DecryptConfig,
    cells: Vec<TextCell>,
    /// Cell indices in reveal order.
    order: Vec<usize>,
    /// Per-cell fade from the brightest cipher color to the final color.
    transitions: Vec<Gradient>,
    /// Number of entries of `order` already revealed.
    revealed: usize,
    rng: StdRng,
    canvas: Canvas,
}

impl DecryptEffect {
    pub fn new(mut config: DecryptConfig, mut rng: StdRng) -> Self {
        let (width, height) = grid_size(config.width, config.height);
        config.width = width;
        config.height = height;
        config.typing_speed = config.typing_speed.max(1);
        config.scramble_chance = config.scramble_chance.clamp(0.0, 1.0);

        let layout = layout_text(text_or(&config.text, PLACEHOLDER), width, height);
        let finals = config.final_gradient.build();
        let start = config.cipher_palette.brightest();
        let transitions = layout
            .cells
            .iter()
            .map(|cell| {
                let end = finals.spatial(cell.x, cell.y, layout.bounds, config.final_gradient.direction);
                build_gradient(
                    &[start, end],
                    config.final_gradient.steps.max(1),
                    config.final_gradient.frames,
                )
            })
            .collect();

        let mut order: Vec<usize> = (0..layout.cells.len()).collect();
        if config.order == RevealOrder::Random {
            order.shuffle(&mut rng);
        }

        let mut decrypt = Self {
            config,
            cells: layout.cells,
            order,
            transitions,
            revealed: 0,
            rng,
            canvas: Canvas::new(width, height),
        };
        tracing::debug!(
            width,
            height,
            cells = decrypt.cells.len(),
            order = ?decrypt.config.order,
            "decrypt effect created"
        );
        decrypt.scramble_all();
        decrypt.paint();
        decrypt
    }

    pub fn cells(&self) -> &[TextCell] {
        &self.cells
    }

    fn scramble_all(&mut self) {
        for cell in &mut self.cells {
            cell.progress = 0;
            cell.glyph = cipher_glyph(&mut self.rng);
            cell.color = Some(self.config.cipher_palette.pick(&mut self.rng));
        }
    }

    fn paint(&mut self) {
        self.canvas.clear();
        for cell in &self.cells {
            self.canvas
                .paint(cell.x as i32, cell.y as i32, cell.glyph, cell.color);
        }
    }
}

fn cipher_glyph(rng: &mut StdRng) -> char {
    CIPHER_CHARS[rng.gen_range(0..CIPHER_CHARS.len())]
}

impl Animation for DecryptEffect {
    fn update(&mut self) {
        for (cell, transition) in self.cells.iter_mut().zip(&self.transitions) {
            if cell.progress == 0 {
                if self.rng.gen_bool(self.config.scramble_chance) {
                    cell.glyph = cipher_glyph(&mut self.rng);
                    cell.color = Some(self.config.cipher_palette.pick(&mut self.rng));
                }
            } else if cell.progress <= transition.settle_tick() {
                cell.progress += 1;
                cell.color = Some(transition.color_at(cell.progress - 1));
            }
        }

        let end = (self.revealed + self.config.typing_speed).min(self.order.len());
        for &idx in &self.order[self.revealed..end] {
            let cell = &mut self.cells[idx];
            cell.glyph = cell.target;
            cell.progress = 1;
            cell.color = Some(self.transitions[idx].color_at(0));
        }
        self.revealed = end;

        self.paint();
    }

    fn reset(&mut self) {
        self.revealed = 0;
        self.scramble_all();
        tracing::debug!("decrypt reset");
        self.paint();
    }

    fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    fn is_complete(&self) -> bool {
        self.revealed >= self.order.len()
            && self
                .cells
                .iter()
                .zip(&self.transitions)
                .all(|(cell, t)| cell.progress > t.settle_tick())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn decrypt(text: &str, width: u16, height: u16) -> DecryptEffect {
        let config = DecryptConfig {
            text: text.to_string(),
            ..DecryptConfig::for_theme(width, height, "dracula")
        };
        DecryptEffect::new(config, StdRng::seed_from_u64(5))
    }

    #[test]
    fn starts_fully_scrambled() {
        let fx = decrypt("HELLO", 20, 3);
        assert_eq!(fx.cells().len(), 5);
        assert!(fx.cells().iter().all(|c| c.progress == 0));
        assert!(fx.cells().iter().all(|c| CIPHER_CHARS.contains(&c.glyph)));
    }

    #[test]
    fn reveals_typing_speed_cells_per_tick_in_reading_order() {
        let mut fx = decrypt("ABCDE", 20, 3);
        fx.update();
        let revealed: Vec<char> = fx
            .cells()
            .iter()
            .filter(|c| c.progress > 0)
            .map(|c| c.glyph)
            .collect();
        assert_eq!(revealed, vec!['A', 'B']);
        fx.update();
        assert_eq!(fx.cells().iter().filter(|c| c.progress > 0).count(), 4);
    }

    #[test]
    fn revealed_cell_fades_to_final_color() {
        let mut fx = decrypt("A", 5, 1);
        let brightest = fx.config.cipher_palette.brightest();
        let last = fx.transitions[0].last();
        fx.update();
        assert_eq!(fx.cells()[0].color, Some(brightest));
        let settle = fx.transitions[0].settle_tick();
        for _ in 0..settle {
            fx.update();
        }
        assert_eq!(fx.cells()[0].color, Some(last));
        assert!(fx.is_complete());
    }

    #[test]
    fn completes_with_stable_frame() {
        let mut fx = decrypt("SECRET\nMESSAGE", 30, 6);
        let mut ticks = 0;
        while !fx.is_complete() {
            fx.update();
            ticks += 1;
            assert!(ticks < 1_000);
        }
        let frame = fx.render();
        fx.update();
        assert_eq!(fx.render(), frame);
        let text = fx.canvas().plain_text();
        assert!(text.contains("SECRET"));
        assert!(text.contains("MESSAGE"));
    }

    #[test]
    fn random_order_reveals_same_glyphs() {
        let config = DecryptConfig {
            text: "RANDOM ORDER".to_string(),
            order: RevealOrder::Random,
            ..DecryptConfig::for_theme(30, 3, "nord")
        };
        let mut fx = DecryptEffect::new(config, StdRng::seed_from_u64(8));
        while !fx.is_complete() {
            fx.update();
        }
        let mut shown: Vec<char> = fx.cells().iter().map(|c| c.glyph).collect();
        let mut expected: Vec<char> = "RANDOMORDER".chars().collect();
        shown.sort_unstable();
        expected.sort_unstable();
        assert_eq!(shown, expected);
    }

    #[test]
    fn empty_text_uses_placeholder() {
        let fx = decrypt("   ", 30, 3);
        let targets: String = fx.cells().iter().map(|c| c.target).collect();
        assert_eq!(targets, "DECRYPTME");
    }

    #[test]
    fn reset_rescrambles() {
        let mut fx = decrypt("HI", 10, 3);
        fx.update();
        fx.reset();
        assert!(fx.cells().iter().all(|c| c.progress == 0));
        assert!(!fx.is_complete());
    }
}

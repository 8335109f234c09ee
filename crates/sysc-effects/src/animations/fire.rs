//! Fire effect (cellular automaton).
//!
//! Heat is the whole state: a grid of `u8` one row taller than the canvas,
//! whose hidden bottom row is the heat source. Every tick first reseeds the
//! source row, then computes each visible cell from the three cells below it
//! in the *previous* tick's grid into a second buffer, and swaps the buffers.
//! Heat therefore climbs exactly one row per tick.

use rand::{Rng, rngs::StdRng};

use super::{Animation, grid_size};
use crate::canvas::Canvas;
use crate::chars::FIRE_CHARS;
use crate::palette::{Palette, PaletteFamily};

/// Fire settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FireConfig {
    pub width: u16,
    pub height: u16,
    /// Heat ramp, coolest to hottest.
    pub palette: Palette,
    /// Largest heat value.
    pub max_heat: u8,
    /// Lowest heat the source row is reseeded with.
    pub source_min: u8,
    /// Largest random cooling applied per row.
    pub cooling: u8,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            palette: Palette::resolve(PaletteFamily::Fire, ""),
            max_heat: 36,
            source_min: 30,
            cooling: 3,
        }
    }
}

impl FireConfig {
    /// Default settings with the theme's fire palette.
    pub fn for_theme(width: u16, height: u16, theme: &str) -> Self {
        Self {
            width,
            height,
            palette: Palette::resolve(PaletteFamily::Fire, theme),
            ..Self::default()
        }
    }
}

/// Rising, cooling flames.
#[derive(Debug)]
pub struct FireEffect {
    config: FireConfig,
    /// Current heat, row-major, `height + 1` rows.
    heat: Vec<u8>,
    /// Buffer the next tick is written into.
    next: Vec<u8>,
    rng: StdRng,
    canvas: Canvas,
}

impl FireEffect {
    pub fn new(mut config: FireConfig, rng: StdRng) -> Self {
        let (width, height) = grid_size(config.width, config.height);
        config.width = width;
        config.height = height;
        config.max_heat = config.max_heat.max(1);
        config.source_min = config.source_min.min(config.max_heat);

        let len = width as usize * (height as usize + 1);
        let mut fire = Self {
            config,
            heat: vec![0; len],
            next: vec![0; len],
            rng,
            canvas: Canvas::new(width, height),
        };
        tracing::debug!(width, height, "fire effect created");
        fire.seed_source();
        fire.paint();
        fire
    }

    /// Assign near-maximum heat with jitter to the hidden source row.
    fn seed_source(&mut self) {
        let w = self.config.width as usize;
        let start = self.config.height as usize * w;
        let (lo, hi) = (self.config.source_min, self.config.max_heat);
        for v in &mut self.heat[start..start + w] {
            *v = self.rng.gen_range(lo..=hi);
        }
    }

    /// Propagate heat one row upward, reading only the previous grid.
    fn spread(&mut self) {
        let w = self.config.width as usize;
        let h = self.config.height as usize;
        let cooling = self.config.cooling;

        for y in 0..h {
            let below = (y + 1) * w;
            for x in 0..w {
                let left = self.heat[below + x.saturating_sub(1)] as u16;
                let centre = self.heat[below + x] as u16;
                let right = self.heat[below + (x + 1).min(w - 1)] as u16;
                let avg = ((left + centre + right) / 3) as u8;
                let decay = self.rng.gen_range(0..=cooling);
                self.next[y * w + x] = avg.saturating_sub(decay);
            }
        }

        let source = h * w;
        self.next[source..].copy_from_slice(&self.heat[source..]);
        std::mem::swap(&mut self.heat, &mut self.next);
    }

    fn paint(&mut self) {
        let w = self.config.width as usize;
        let max = self.config.max_heat as u32;
        let top = FIRE_CHARS.len() - 1;

        for (i, &v) in self.heat[..w * self.config.height as usize].iter().enumerate() {
            let (x, y) = ((i % w) as i32, (i / w) as i32);
            if v == 0 {
                self.canvas.paint(x, y, ' ', None);
                continue;
            }
            let glyph_idx = (v as usize * top / max as usize).clamp(1, top);
            let color = self.config.palette.bucket(v as u32, max);
            self.canvas.paint(x, y, FIRE_CHARS[glyph_idx], Some(color));
        }
    }
}

impl Animation for FireEffect {
    fn update(&mut self) {
        self.seed_source();
        self.spread();
        self.paint();
    }

    fn reset(&mut self) {
        self.heat.fill(0);
        self.next.fill(0);
        self.seed_source();
        self.paint();
    }

    fn canvas(&self) -> &Canvas {
        &self.canvas
    }
}

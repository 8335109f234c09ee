//! Character rain (particle stream).

use rand::{Rng, rngs::StdRng, seq::SliceRandom};
use ratatui::style::Color;

use super::{Animation, grid_size};
use crate::canvas::Canvas;
use crate::chars::RAIN_CHARS;
use crate::palette::{Palette, PaletteFamily};

/// Rain settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RainConfig {
    pub width: u16,
    pub height: u16,
    /// Drop colors, drawn uniformly.
    pub palette: Palette,
    /// Drop glyphs.
    pub glyphs: Vec<char>,
    /// Chance per attempt of spawning another drop while below the cap.
    pub spawn_chance: f64,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            palette: Palette::resolve(PaletteFamily::Rain, ""),
            glyphs: RAIN_CHARS.to_vec(),
            spawn_chance: 0.3,
        }
    }
}

impl RainConfig {
    /// Default settings with the theme's rain palette.
    pub fn for_theme(width: u16, height: u16, theme: &str) -> Self {
        Self {
            width,
            height,
            palette: Palette::resolve(PaletteFamily::Rain, theme),
            ..Self::default()
        }
    }
}

/// A single falling glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drop {
    pub x: i32,
    pub y: i32,
    /// Rows fallen per tick.
    pub speed: i32,
    pub glyph: char,
    pub color: Color,
}

/// Falling rain drops.
///
/// Drops that leave the bottom are recycled in place above the screen, so the
/// drop list only ever grows (up to `2 × width`) and never reallocates.
#[derive(Debug)]
pub struct RainEffect {
    config: RainConfig,
    drops: Vec<Drop>,
    max_drops: usize,
    rng: StdRng,
    canvas: Canvas,
}

impl RainEffect {
    pub fn new(mut config: RainConfig, rng: StdRng) -> Self {
        let (width, height) = grid_size(config.width, config.height);
        config.width = width;
        config.height = height;
        if config.glyphs.is_empty() {
            config.glyphs = RAIN_CHARS.to_vec();
        }
        config.spawn_chance = config.spawn_chance.clamp(0.0, 1.0);

        let max_drops = width as usize * 2;
        let mut rain = Self {
            config,
            drops: Vec::with_capacity(max_drops),
            max_drops,
            rng,
            canvas: Canvas::new(width, height),
        };
        tracing::debug!(width, height, max_drops, "rain effect created");
        rain.seed();
        rain.paint();
        rain
    }

    /// Current drops.
    pub fn drops(&self) -> &[Drop] {
        &self.drops
    }

    /// Upper bound on the number of drops.
    pub fn max_drops(&self) -> usize {
        self.max_drops
    }

    /// Scatter an initial third of a row's worth of drops above the screen.
    fn seed(&mut self) {
        let height = self.config.height as i32;
        for _ in 0..self.config.width / 3 {
            let mut drop = spawn_drop(&mut self.rng, &self.config);
            drop.y = -self.rng.gen_range(0..height);
            self.drops.push(drop);
        }
    }

    fn paint(&mut self) {
        self.canvas.clear();
        for drop in &self.drops {
            self.canvas
                .paint(drop.x, drop.y, drop.glyph, Some(drop.color));
        }
    }
}

/// A fresh drop just above the screen.
fn spawn_drop(rng: &mut StdRng, config: &RainConfig) -> Drop {
    Drop {
        x: rng.gen_range(0..config.width as i32),
        y: -rng.gen_range(1..=10),
        speed: rng.gen_range(1..=3),
        glyph: *config.glyphs.choose(rng).unwrap_or(&'|'),
        color: config.palette.pick(rng),
    }
}

impl Animation for RainEffect {
    fn update(&mut self) {
        let height = self.config.height as i32;
        for drop in &mut self.drops {
            drop.y += drop.speed;
            if drop.y >= height {
                *drop = spawn_drop(&mut self.rng, &self.config);
            }
        }

        while self.drops.len() < self.max_drops && self.rng.gen_bool(self.config.spawn_chance) {
            let drop = spawn_drop(&mut self.rng, &self.config);
            self.drops.push(drop);
        }

        self.paint();
    }

    fn reset(&mut self) {
        self.drops.clear();
        self.seed();
        self.paint();
    }

    fn canvas(&self) -> &Canvas {
        &self.canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rain(width: u16, height: u16, seed: u64) -> RainEffect {
        RainEffect::new(
            RainConfig::for_theme(width, height, "nord"),
            StdRng::seed_from_u64(seed),
        )
    }

    #[test]
    fn recycled_drops_restart_above_screen() {
        let mut fx = rain(40, 12, 3);
        let mut recycled = 0;
        for _ in 0..300 {
            let before: Vec<Drop> = fx.drops().to_vec();
            fx.update();
            for (old, new) in before.iter().zip(fx.drops()) {
                if old.y + old.speed >= 12 {
                    recycled += 1;
                    assert!((-10..0).contains(&new.y), "recycled y {}", new.y);
                    assert!((0..40).contains(&new.x));
                    assert!((1..=3).contains(&new.speed));
                }
            }
            assert!(fx.drops().len() <= fx.max_drops());
        }
        assert!(recycled > 0);
    }

    #[test]
    fn colors_come_from_palette() {
        let mut fx = rain(20, 10, 9);
        for _ in 0..50 {
            fx.update();
        }
        let palette = Palette::resolve(PaletteFamily::Rain, "nord");
        assert!(fx.drops().iter().all(|d| palette.colors().contains(&d.color)));
    }

    #[test]
    fn population_grows_towards_cap() {
        let mut fx = rain(10, 5, 11);
        let start = fx.drops().len();
        for _ in 0..500 {
            fx.update();
        }
        assert!(fx.drops().len() > start);
        assert_eq!(fx.max_drops(), 20);
    }

    #[test]
    fn only_on_grid_drops_are_painted() {
        let mut fx = rain(15, 6, 5);
        for _ in 0..20 {
            fx.update();
        }
        let visible = fx
            .drops()
            .iter()
            .filter(|d| (0..6).contains(&d.y))
            .count();
        let painted = fx
            .canvas()
            .rows()
            .flatten()
            .filter(|c| c.color.is_some())
            .count();
        // Drops may share a cell, never exceed the visible count
        assert!(painted <= visible);
        assert!(fx.canvas().rows().all(|row| row.len() == 15));
    }

    #[test]
    fn reset_restores_initial_population() {
        let mut fx = rain(30, 8, 2);
        for _ in 0..200 {
            fx.update();
        }
        fx.reset();
        assert_eq!(fx.drops().len(), 10);
        assert!(fx.drops().iter().all(|d| d.y <= 0));
    }
}

//! Matrix digital rain (stateful streaks).

use rand::{Rng, rngs::StdRng};

use super::{Animation, grid_size};
use crate::canvas::Canvas;
use crate::chars::MATRIX_CHARS;
use crate::palette::{Palette, PaletteFamily};

/// Matrix settings.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixConfig {
    pub width: u16,
    pub height: u16,
    /// Trail ramp, dimmest to brightest. The head uses the last entry.
    pub palette: Palette,
    /// Chance per attempt of spawning another streak while below the cap.
    pub spawn_chance: f64,
    /// Chance per tick that a streak swaps its glyphs.
    pub flicker_chance: f64,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            palette: Palette::resolve(PaletteFamily::Matrix, ""),
            spawn_chance: 0.3,
            flicker_chance: 0.05,
        }
    }
}

impl MatrixConfig {
    /// Default settings with the theme's matrix palette.
    pub fn for_theme(width: u16, height: u16, theme: &str) -> Self {
        Self {
            width,
            height,
            palette: Palette::resolve(PaletteFamily::Matrix, theme),
            ..Self::default()
        }
    }
}

/// State for a single falling streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stream {
    /// Column the streak falls in.
    pub column: i32,
    /// Row of the bright head.
    pub head: i32,
    /// Number of glyphs including the head.
    pub length: i32,
    /// Rows fallen per tick.
    pub speed: i32,
    /// Seed for glyph selection.
    pub seed: usize,
}

/// Falling streaks of glyphs that fade with distance from the head.
#[derive(Debug)]
pub struct MatrixEffect {
    config: MatrixConfig,
    streams: Vec<Stream>,
    max_streams: usize,
    rng: StdRng,
    canvas: Canvas,
}

impl MatrixEffect {
    pub fn new(mut config: MatrixConfig, rng: StdRng) -> Self {
        let (width, height) = grid_size(config.width, config.height);
        config.width = width;
        config.height = height;
        config.spawn_chance = config.spawn_chance.clamp(0.0, 1.0);
        config.flicker_chance = config.flicker_chance.clamp(0.0, 1.0);

        let max_streams = width as usize;
        let mut matrix = Self {
            config,
            streams: Vec::with_capacity(max_streams),
            max_streams,
            rng,
            canvas: Canvas::new(width, height),
        };
        tracing::debug!(width, height, max_streams, "matrix effect created");
        matrix.seed();
        matrix.paint();
        matrix
    }

    /// Current streaks.
    pub fn streams(&self) -> &[Stream] {
        &self.streams
    }

    /// Upper bound on the number of streaks.
    pub fn max_streams(&self) -> usize {
        self.max_streams
    }

    /// Stagger a quarter of the columns above the screen.
    fn seed(&mut self) {
        let height = self.config.height as i32;
        for _ in 0..self.max_streams / 4 {
            let mut stream = spawn_stream(&mut self.rng, &self.config);
            stream.head = -self.rng.gen_range(0..height * 2);
            self.streams.push(stream);
        }
    }

    fn paint(&mut self) {
        self.canvas.clear();
        let palette = &self.config.palette;
        let trail_top = palette.len().saturating_sub(2);
        for stream in &self.streams {
            for k in 0..stream.length {
                let y = stream.head - k;
                if y < 0 || y >= self.config.height as i32 {
                    continue;
                }
                let glyph = MATRIX_CHARS[stream.seed.wrapping_add(y as usize) % MATRIX_CHARS.len()];
                let color = if k == 0 {
                    palette.last()
                } else {
                    let remaining = (stream.length - k) as usize;
                    palette.get(trail_top * remaining / stream.length as usize)
                };
                self.canvas.paint(stream.column, y, glyph, Some(color));
            }
        }
    }
}

/// A fresh streak just above the screen.
fn spawn_stream(rng: &mut StdRng, config: &MatrixConfig) -> Stream {
    let max_len = (config.height as i32 * 2 / 3).max(5);
    Stream {
        column: rng.gen_range(0..config.width as i32),
        head: -rng.gen_range(1..=10),
        length: rng.gen_range(4..=max_len),
        speed: rng.gen_range(1..=2),
        seed: rng.r#gen(),
    }
}

impl Animation for MatrixEffect {
    fn update(&mut self) {
        let height = self.config.height as i32;
        for stream in &mut self.streams {
            stream.head += stream.speed;
            if stream.head - stream.length + 1 >= height {
                *stream = spawn_stream(&mut self.rng, &self.config);
            } else if self.rng.gen_bool(self.config.flicker_chance) {
                stream.seed = stream.seed.wrapping_add(1);
            }
        }

        while self.streams.len() < self.max_streams
            && self.rng.gen_bool(self.config.spawn_chance)
        {
            let stream = spawn_stream(&mut self.rng, &self.config);
            self.streams.push(stream);
        }

        self.paint();
    }

    fn reset(&mut self) {
        self.streams.clear();
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

    fn matrix(width: u16, height: u16) -> MatrixEffect {
        MatrixEffect::new(
            MatrixConfig::for_theme(width, height, "gruvbox"),
            StdRng::seed_from_u64(17),
        )
    }

    #[test]
    fn stream_count_is_capped_and_recycles_above_screen() {
        let mut fx = matrix(24, 10);
        let mut recycled = 0;
        for _ in 0..400 {
            let before: Vec<Stream> = fx.streams().to_vec();
            fx.update();
            assert!(fx.streams().len() <= fx.max_streams());
            for (old, new) in before.iter().zip(fx.streams()) {
                if old.head + old.speed - old.length + 1 >= 10 {
                    recycled += 1;
                    assert!((-10..0).contains(&new.head));
                    assert!((0..24).contains(&new.column));
                }
            }
        }
        assert!(recycled > 0);
    }

    #[test]
    fn off_screen_streams_are_recycled_at_once() {
        let mut fx = matrix(20, 6);
        for _ in 0..300 {
            fx.update();
            for stream in fx.streams() {
                assert!(stream.head - stream.length + 1 < 6, "{stream:?}");
            }
        }
    }

    #[test]
    fn rows_are_exactly_grid_width() {
        let mut fx = MatrixEffect::new(MatrixConfig::for_theme(16, 8, "solarized"), StdRng::seed_from_u64(5));
        for _ in 0..40 {
            fx.update();
            for line in fx.canvas().lines() {
                assert_eq!(line.width(), 16);
            }
        }
    }

    #[test]
    fn head_is_brightest() {
        let mut fx = matrix(12, 30);
        let palette = Palette::resolve(PaletteFamily::Matrix, "gruvbox");
        for _ in 0..60 {
            fx.update();
        }
        let streams = fx.streams().to_vec();
        let on_grid = streams.iter().find(|s| (0..30).contains(&s.head));
        if let Some(stream) = on_grid {
            // Another streak may overlap; only check an unshared column
            let shared = streams
                .iter()
                .filter(|s| s.column == stream.column)
                .count();
            if shared == 1 {
                let cell = fx
                    .canvas()
                    .get(stream.column as u16, stream.head as u16)
                    .copied();
                assert_eq!(cell.and_then(|c| c.color), Some(palette.last()));
            }
        }
    }

    #[test]
    fn trail_fades_with_distance() {
        let mut fx = matrix(1, 20);
        fx.streams.clear();
        fx.streams.push(Stream {
            column: 0,
            head: 10,
            length: 6,
            speed: 1,
            seed: 0,
        });
        fx.paint();
        let palette = Palette::resolve(PaletteFamily::Matrix, "gruvbox");
        let idx = |y: u16| {
            let color = fx.canvas().get(0, y).and_then(|c| c.color);
            palette.colors().iter().position(|c| Some(*c) == color)
        };
        assert_eq!(idx(10), Some(palette.len() - 1));
        let trail: Vec<usize> = (5..10).rev().filter_map(idx).collect();
        assert_eq!(trail.len(), 5);
        assert!(trail.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(fx.canvas().get(0, 4).and_then(|c| c.color), None);
    }

    #[test]
    fn reset_reseeds_streams() {
        let mut fx = matrix(40, 10);
        for _ in 0..100 {
            fx.update();
        }
        fx.reset();
        assert_eq!(fx.streams().len(), 10);
        assert!(fx.streams().iter().all(|s| s.head <= 0));
    }
}

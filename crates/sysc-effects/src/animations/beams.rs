//! Beams: light beams sweep across the text, then a diagonal wipe settles it.
//!
//! Every text row gets a row beam and every text column a column beam. Beams
//! launch in a shuffled order, one every `beam_delay` ticks, and light each
//! cell their head passes. Once the last beam has left, a wipe sweeps the
//! block diagonal by diagonal and fades every cell to its final color.

use std::ops::RangeInclusive;

use rand::{Rng, rngs::StdRng, seq::SliceRandom};
use ratatui::layout::Rect;

use super::{Animation, grid_size};
use crate::canvas::Canvas;
use crate::chars::{BEAM_COLUMN_CHARS, BEAM_ROW_CHARS};
use crate::gradient::{Gradient, GradientDirection, GradientSpec, build_gradient};
use crate::layout::{TextCell, layout_text, text_or};
use crate::palette::{Palette, PaletteFamily};

/// Text shown when no input text is given.
pub const PLACEHOLDER: &str = "BEAMS EFFECT";

/// Beams settings. Speeds are in tenths of a cell per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct BeamsConfig {
    pub width: u16,
    pub height: u16,
    pub text: String,
    /// Row beam glyphs, head first.
    pub row_symbols: Vec<char>,
    /// Column beam glyphs, head first.
    pub column_symbols: Vec<char>,
    /// Ticks between beam launches.
    pub beam_delay: u32,
    pub row_speed: RangeInclusive<u32>,
    pub column_speed: RangeInclusive<u32>,
    pub beam_gradient: GradientSpec,
    pub final_gradient: GradientSpec,
    /// Diagonals the final wipe advances per tick.
    pub final_wipe_speed: usize,
}

impl Default for BeamsConfig {
    fn default() -> Self {
        Self::for_theme(80, 24, "")
    }
}

impl BeamsConfig {
    pub fn for_theme(width: u16, height: u16, theme: &str) -> Self {
        let beam = Palette::resolve(PaletteFamily::BeamsBeam, theme);
        let finals = Palette::resolve(PaletteFamily::BeamsFinal, theme);
        Self {
            width,
            height,
            text: PLACEHOLDER.to_string(),
            row_symbols: BEAM_ROW_CHARS.to_vec(),
            column_symbols: BEAM_COLUMN_CHARS.to_vec(),
            beam_delay: 2,
            row_speed: 20..=80,
            column_speed: 15..=30,
            beam_gradient: GradientSpec::new(
                beam.colors().to_vec(),
                5,
                1,
                GradientDirection::Horizontal,
            ),
            final_gradient: GradientSpec::new(
                finals.colors().to_vec(),
                8,
                1,
                GradientDirection::Diagonal,
            ),
            final_wipe_speed: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Row(u16),
    Column(u16),
}

/// A beam travelling along one row or column of the text block.
#[derive(Debug, Clone)]
struct Beam {
    axis: Axis,
    /// First coordinate along the axis.
    start: i32,
    /// +1 or -1.
    step: i32,
    /// Cells to travel, excluding the start.
    distance: i32,
    /// Distance covered so far, in tenths of a cell.
    travelled: i32,
    speed: i32,
    /// Furthest offset already lit.
    lit_through: i32,
}

impl Beam {
    fn head(&self) -> i32 {
        self.travelled / 10
    }

    fn point(&self, offset: i32) -> (i32, i32) {
        let along = self.start + self.step * offset;
        match self.axis {
            Axis::Row(y) => (along, y as i32),
            Axis::Column(x) => (x as i32, along),
        }
    }
}

#[derive(Debug)]
pub struct BeamsEffect {
    config: BeamsConfig,
    cells: Vec<TextCell>,
    /// Cell index for each canvas position.
    grid: Vec<Option<usize>>,
    bounds: Rect,
    beam_colors: Gradient,
    /// Lit color run: the beam gradient ending on the first final stop.
    lit: Gradient,
    /// Per-cell fade driven by the wipe.
    finals: Vec<Gradient>,
    /// Beams in launch order, all built up front.
    beams: Vec<Beam>,
    launched: usize,
    active: Vec<Beam>,
    launch_timer: u32,
    /// Diagonals covered by the final wipe, once it has started.
    wipe: Option<usize>,
    canvas: Canvas,
}

impl BeamsEffect {
    pub fn new(mut config: BeamsConfig, mut rng: StdRng) -> Self {
        let (width, height) = grid_size(config.width, config.height);
        config.width = width;
        config.height = height;
        config.final_wipe_speed = config.final_wipe_speed.max(1);
        if config.row_symbols.is_empty() {
            config.row_symbols = BEAM_ROW_CHARS.to_vec();
        }
        if config.column_symbols.is_empty() {
            config.column_symbols = BEAM_COLUMN_CHARS.to_vec();
        }

        let layout = layout_text(text_or(&config.text, PLACEHOLDER), width, height);
        let bounds = layout.bounds;

        let mut grid = vec![None; width as usize * height as usize];
        for (idx, cell) in layout.cells.iter().enumerate() {
            grid[cell.y as usize * width as usize + cell.x as usize] = Some(idx);
        }

        let beam_colors = config.beam_gradient.build();
        let final_colors = config.final_gradient.build();
        let settle_color = final_colors.get(0);
        let mut lit_stops = config.beam_gradient.stops.clone();
        lit_stops.push(settle_color);
        let lit = build_gradient(
            &lit_stops,
            config.beam_gradient.steps.max(1) + 1,
            config.beam_gradient.frames,
        );
        let finals = layout
            .cells
            .iter()
            .map(|cell| {
                let end = final_colors.spatial(cell.x, cell.y, bounds, config.final_gradient.direction);
                build_gradient(
                    &[settle_color, end],
                    config.final_gradient.steps.max(1),
                    config.final_gradient.frames,
                )
            })
            .collect();

        let beams = plan_beams(&layout.cells, bounds, &config, &mut rng);

        let mut effect = Self {
            config,
            cells: layout.cells,
            grid,
            bounds,
            beam_colors,
            lit,
            finals,
            beams,
            launched: 0,
            active: Vec::new(),
            launch_timer: 0,
            wipe: None,
            canvas: Canvas::new(width, height),
        };
        tracing::debug!(width, height, beams = effect.beams.len(), "beams effect created");
        effect.paint();
        effect
    }

    pub fn cells(&self) -> &[TextCell] {
        &self.cells
    }

    fn cell_at(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.config.width as i32 || y >= self.config.height as i32 {
            return None;
        }
        self.grid[y as usize * self.config.width as usize + x as usize]
    }

    /// Progress at which a lit cell has finished its beam color run.
    fn lit_end(&self) -> u32 {
        self.lit.settle_tick() + 1
    }

    /// Progress a cell jumps to when the wipe reaches it.
    fn wiped_start(&self) -> u32 {
        self.lit_end() + 1
    }

    fn max_diagonal(&self) -> usize {
        (self.bounds.width as usize + self.bounds.height as usize).saturating_sub(2)
    }

    fn diagonal(&self, cell: &TextCell) -> usize {
        (cell.x - self.bounds.x) as usize + (cell.y - self.bounds.y) as usize
    }

    fn age_cells(&mut self) {
        let lit_end = self.lit_end();
        let wiped_start = self.wiped_start();
        for (cell, finals) in self.cells.iter_mut().zip(&self.finals) {
            let p = cell.progress;
            if (p > 0 && p < lit_end) || (p >= wiped_start && p < wiped_start + finals.settle_tick()) {
                cell.progress += 1;
            }
        }
    }

    fn launch(&mut self) {
        if self.launch_timer > 0 {
            self.launch_timer -= 1;
            return;
        }
        if let Some(beam) = self.beams.get(self.launched) {
            self.active.push(beam.clone());
            self.launched += 1;
            self.launch_timer = self.config.beam_delay.saturating_sub(1);
        }
    }

    fn move_beams(&mut self) {
        let mut i = 0;
        while i < self.active.len() {
            let beam = &mut self.active[i];
            beam.travelled += beam.speed;
            let reach = beam.head().min(beam.distance);
            let from = beam.lit_through + 1;
            beam.lit_through = beam.lit_through.max(reach);
            let beam = beam.clone();
            for offset in from..=reach {
                let (x, y) = beam.point(offset);
                if let Some(idx) = self.cell_at(x, y) {
                    let cell = &mut self.cells[idx];
                    if cell.progress == 0 {
                        cell.progress = 1;
                    }
                }
            }
            let trail = self.symbols(beam.axis).len() as i32;
            if beam.head() >= beam.distance + trail {
                self.active.swap_remove(i);
            } else {
                i += 1;
            }
        }
    }

    fn advance_wipe(&mut self) {
        if self.launched < self.beams.len() || !self.active.is_empty() {
            return;
        }
        let wipe = match self.wipe {
            None => {
                tracing::debug!("beams finished, starting final wipe");
                self.config.final_wipe_speed
            }
            Some(w) => w + self.config.final_wipe_speed,
        };
        self.wipe = Some(wipe);

        let wiped_start = self.wiped_start();
        for idx in 0..self.cells.len() {
            if self.diagonal(&self.cells[idx]) < wipe && self.cells[idx].progress < wiped_start {
                self.cells[idx].progress = wiped_start;
            }
        }
    }

    fn symbols(&self, axis: Axis) -> &[char] {
        match axis {
            Axis::Row(_) => &self.config.row_symbols,
            Axis::Column(_) => &self.config.column_symbols,
        }
    }

    fn paint(&mut self) {
        self.canvas.clear();
        let lit_end = self.lit_end();
        let wiped_start = self.wiped_start();
        for (idx, cell) in self.cells.iter().enumerate() {
            let color = match cell.progress {
                0 => continue,
                p if p >= wiped_start => self.finals[idx].color_at(p - wiped_start),
                p => self.lit.color_at(p.min(lit_end) - 1),
            };
            self.canvas
                .paint(cell.x as i32, cell.y as i32, cell.target, Some(color));
        }

        for beam in &self.active {
            let symbols = match beam.axis {
                Axis::Row(_) => &self.config.row_symbols,
                Axis::Column(_) => &self.config.column_symbols,
            };
            for (k, &glyph) in symbols.iter().enumerate() {
                let offset = beam.head() - k as i32;
                if offset < 0 || offset > beam.distance {
                    continue;
                }
                let (x, y) = beam.point(offset);
                self.canvas.paint(x, y, glyph, Some(self.beam_colors.get(k)));
            }
        }
    }
}

/// One beam per text row and per text column, shuffled.
fn plan_beams(cells: &[TextCell], bounds: Rect, config: &BeamsConfig, rng: &mut StdRng) -> Vec<Beam> {
    let mut rows: Vec<u16> = cells.iter().map(|c| c.y).collect();
    rows.sort_unstable();
    rows.dedup();
    let mut columns: Vec<u16> = cells.iter().map(|c| c.x).collect();
    columns.sort_unstable();
    columns.dedup();

    let left = bounds.x as i32;
    let right = left + bounds.width as i32 - 1;
    let top = bounds.y as i32;
    let bottom = top + bounds.height as i32 - 1;

    let mut beams: Vec<Beam> = Vec::with_capacity(rows.len() + columns.len());
    let axes = rows
        .into_iter()
        .map(Axis::Row)
        .chain(columns.into_iter().map(Axis::Column));
    for axis in axes {
        let (lo, hi, speed) = match axis {
            Axis::Row(_) => (left, right, config.row_speed.clone()),
            Axis::Column(_) => (top, bottom, config.column_speed.clone()),
        };
        let forward = rng.gen_bool(0.5);
        let speed: u32 = if speed.is_empty() { 10 } else { rng.gen_range(speed) };
        beams.push(Beam {
            axis,
            start: if forward { lo } else { hi },
            step: if forward { 1 } else { -1 },
            distance: hi - lo,
            travelled: 0,
            speed: speed.max(1) as i32,
            lit_through: -1,
        });
    }
    beams.shuffle(rng);
    beams
}

impl Animation for BeamsEffect {
    fn update(&mut self) {
        self.age_cells();
        self.launch();
        self.move_beams();
        self.advance_wipe();
        self.paint();
    }

    fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.progress = 0;
        }
        self.launched = 0;
        self.active.clear();
        self.launch_timer = 0;
        self.wipe = None;
        tracing::debug!("beams reset");
        self.paint();
    }

    fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    fn is_complete(&self) -> bool {
        let wiped = self.wipe.is_some_and(|w| w > self.max_diagonal());
        let wiped_start = self.wiped_start();
        wiped
            && self
                .cells
                .iter()
                .zip(&self.finals)
                .all(|(cell, f)| cell.progress >= wiped_start + f.settle_tick())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn beams(text: &str, width: u16, height: u16) -> BeamsEffect {
        let config = BeamsConfig {
            text: text.to_string(),
            ..BeamsConfig::for_theme(width, height, "tokyo-night")
        };
        BeamsEffect::new(config, StdRng::seed_from_u64(21))
    }

    #[test]
    fn plans_one_beam_per_row_and_column() {
        let fx = beams("AB\nC", 10, 4);
        let rows = fx.beams.iter().filter(|b| matches!(b.axis, Axis::Row(_))).count();
        let columns = fx.beams.len() - rows;
        assert_eq!((rows, columns), (2, 2));
        for beam in &fx.beams {
            let range = match beam.axis {
                Axis::Row(_) => 20..=80,
                Axis::Column(_) => 15..=30,
            };
            assert!(range.contains(&beam.speed));
        }
    }

    #[test]
    fn beams_launch_every_delay_ticks() {
        let mut fx = beams("ABCDEFGH\nIJKLMNOP", 40, 6);
        fx.update();
        assert_eq!(fx.launched, 1);
        fx.update();
        assert_eq!(fx.launched, 1);
        fx.update();
        assert_eq!(fx.launched, 2);
    }

    #[test]
    fn passed_cells_light_up_with_target_glyph() {
        let mut fx = beams("HELLO", 20, 1);
        for _ in 0..3 {
            fx.update();
        }
        let lit: Vec<&TextCell> = fx.cells().iter().filter(|c| c.progress > 0).collect();
        assert!(!lit.is_empty());
        for cell in lit {
            let glyph = fx.canvas().get(cell.x, cell.y).map(|c| c.glyph);
            // A beam may still be drawn over the cell
            let beam_glyph = glyph.is_some_and(|g| {
                BEAM_ROW_CHARS.contains(&g) || BEAM_COLUMN_CHARS.contains(&g)
            });
            assert!(glyph == Some(cell.target) || beam_glyph);
        }
    }

    #[test]
    fn wipe_waits_for_beams() {
        let mut fx = beams("AB", 10, 2);
        fx.update();
        assert!(fx.wipe.is_none());
        let mut ticks = 0;
        while fx.wipe.is_none() {
            fx.update();
            ticks += 1;
            assert!(ticks < 500);
        }
        assert_eq!(fx.launched, fx.beams.len());
        assert!(fx.active.is_empty());
    }

    #[test]
    fn completes_on_spatial_final_colors() {
        let mut fx = beams(PLACEHOLDER, 30, 5);
        let mut ticks = 0;
        while !fx.is_complete() {
            fx.update();
            ticks += 1;
            assert!(ticks < 2_000);
        }
        for (cell, finals) in fx.cells().iter().zip(&fx.finals) {
            let painted = fx.canvas().get(cell.x, cell.y).copied();
            assert_eq!(painted.map(|c| c.glyph), Some(cell.target));
            assert_eq!(painted.and_then(|c| c.color), Some(finals.last()));
        }
        let frame = fx.render();
        fx.update();
        assert_eq!(fx.render(), frame);
    }

    #[test]
    fn reset_darkens_text() {
        let mut fx = beams("RESET", 20, 3);
        for _ in 0..40 {
            fx.update();
        }
        fx.reset();
        assert!(fx.cells().iter().all(|c| c.progress == 0));
        assert!(fx.canvas().plain_text().trim().is_empty());
    }
}

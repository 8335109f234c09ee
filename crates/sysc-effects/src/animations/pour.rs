//! Pour: characters stream in from one edge and stack up into the text.

use rand::rngs::StdRng;
use ratatui::style::Color;

use super::{Animation, grid_size};
use crate::canvas::Canvas;
use crate::color::WHITE;
use crate::gradient::{Gradient, GradientDirection, GradientSpec, build_gradient};
use crate::layout::{TextCell, layout_text, text_or};
use crate::palette::{Palette, PaletteFamily};

/// Text shown when no input text is given.
pub const PLACEHOLDER: &str = "POUR EFFECT\nDEMO TEXT\nTHIRD LINE";

/// Direction characters travel in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PourDirection {
    #[default]
    Down,
    Up,
    Left,
    Right,
}

impl PourDirection {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "down" => Some(Self::Down),
            "up" => Some(Self::Up),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    fn is_vertical(self) -> bool {
        matches!(self, Self::Down | Self::Up)
    }
}

/// Pour settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PourConfig {
    pub width: u16,
    pub height: u16,
    pub text: String,
    pub direction: PourDirection,
    /// Rows (or columns, for sideways pours) released per tick.
    pub pour_speed: usize,
    /// Fraction of the travel distance covered per tick, 0.0-1.0.
    pub movement_speed: f32,
    /// Idle ticks between releases.
    pub gap: u32,
    /// Color of a character while it travels.
    pub starting_color: Color,
    pub final_gradient: GradientSpec,
}

impl Default for PourConfig {
    fn default() -> Self {
        Self::for_theme(80, 24, "")
    }
}

impl PourConfig {
    pub fn for_theme(width: u16, height: u16, theme: &str) -> Self {
        let stops = Palette::resolve(PaletteFamily::Pour, theme);
        Self {
            width,
            height,
            text: PLACEHOLDER.to_string(),
            direction: PourDirection::Down,
            pour_speed: 3,
            movement_speed: 0.2,
            gap: 1,
            starting_color: WHITE,
            final_gradient: GradientSpec::new(
                stops.colors().to_vec(),
                12,
                5,
                GradientDirection::Horizontal,
            ),
        }
    }
}

/// Characters released group by group that glide to their place.
///
/// A cell's `progress` is 0 while it waits, counts travel ticks up to
/// `travel`, then counts the color transition until it settles.
#[derive(Debug)]
pub struct PourEffect {
    config: PourConfig,
    cells: Vec<TextCell>,
    /// Cell indices per group, in release order.
    groups: Vec<Vec<usize>>,
    transitions: Vec<Gradient>,
    /// Ticks a cell spends travelling.
    travel: u32,
    group: usize,
    gap_left: u32,
    canvas: Canvas,
}

impl PourEffect {
    /// Pour is fully deterministic; the generator is accepted for a uniform
    /// constructor shape and otherwise unused.
    pub fn new(mut config: PourConfig, _rng: StdRng) -> Self {
        let (width, height) = grid_size(config.width, config.height);
        config.width = width;
        config.height = height;
        config.pour_speed = config.pour_speed.max(1);
        config.movement_speed = config.movement_speed.clamp(0.01, 1.0);

        let layout = layout_text(text_or(&config.text, PLACEHOLDER), width, height);
        let finals = config.final_gradient.build();
        let transitions = layout
            .cells
            .iter()
            .map(|cell| {
                let end = finals.spatial(cell.x, cell.y, layout.bounds, config.final_gradient.direction);
                build_gradient(
                    &[config.starting_color, end],
                    config.final_gradient.steps.max(1),
                    config.final_gradient.frames,
                )
            })
            .collect();

        let groups = group_cells(&layout.cells, config.direction);
        let travel = (1.0 / config.movement_speed).ceil() as u32;

        let mut pour = Self {
            config,
            cells: layout.cells,
            groups,
            transitions,
            travel,
            group: 0,
            gap_left: 0,
            canvas: Canvas::new(width, height),
        };
        tracing::debug!(
            width,
            height,
            groups = pour.groups.len(),
            travel,
            "pour effect created"
        );
        pour.paint();
        pour
    }

    pub fn cells(&self) -> &[TextCell] {
        &self.cells
    }

    /// Progress value at which a cell stops changing.
    fn terminal(&self, idx: usize) -> u32 {
        self.travel + 1 + self.transitions[idx].settle_tick()
    }

    fn release(&mut self) {
        if self.gap_left > 0 {
            self.gap_left -= 1;
            return;
        }
        let end = (self.group + self.config.pour_speed).min(self.groups.len());
        for &idx in self.groups[self.group..end].iter().flatten() {
            self.cells[idx].progress = 1;
        }
        self.group = end;
        if self.group < self.groups.len() {
            self.gap_left = self.config.gap;
        }
    }

    /// Where a travelling cell is drawn after `progress` ticks.
    fn position(&self, cell: &TextCell) -> (i32, i32) {
        let t = (cell.progress as f32 / self.travel as f32).min(1.0);
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        let glide = |from: f32, to: u16| (from + (to as f32 - from) * eased).round() as i32;
        let (w, h) = (self.config.width, self.config.height);
        match self.config.direction {
            PourDirection::Down => (cell.x as i32, glide(0.0, cell.y)),
            PourDirection::Up => (cell.x as i32, glide((h - 1) as f32, cell.y)),
            PourDirection::Left => (glide((w - 1) as f32, cell.x), cell.y as i32),
            PourDirection::Right => (glide(0.0, cell.x), cell.y as i32),
        }
    }

    fn paint(&mut self) {
        self.canvas.clear();
        for (idx, cell) in self.cells.iter().enumerate() {
            if cell.progress == 0 {
                continue;
            }
            let (x, y, color) = if cell.progress < self.travel {
                let (x, y) = self.position(cell);
                (x, y, self.config.starting_color)
            } else {
                let since_landing = cell.progress - self.travel;
                let color = self.transitions[idx].color_at(since_landing.saturating_sub(1));
                (cell.x as i32, cell.y as i32, color)
            };
            self.canvas.paint(x, y, cell.target, Some(color));
        }
    }
}

/// Split cells into rows or columns, farthest group along the pour first.
fn group_cells(cells: &[TextCell], direction: PourDirection) -> Vec<Vec<usize>> {
    let key = |cell: &TextCell| {
        if direction.is_vertical() {
            cell.y
        } else {
            cell.x
        }
    };
    let mut keys: Vec<u16> = cells.iter().map(key).collect();
    keys.sort_unstable();
    keys.dedup();
    if matches!(direction, PourDirection::Down | PourDirection::Right) {
        keys.reverse();
    }

    keys.iter()
        .map(|&k| (0..cells.len()).filter(|&i| key(&cells[i]) == k).collect())
        .collect()
}

impl Animation for PourEffect {
    fn update(&mut self) {
        for idx in 0..self.cells.len() {
            let terminal = self.terminal(idx);
            let cell = &mut self.cells[idx];
            if cell.progress > 0 && cell.progress < terminal {
                cell.progress += 1;
            }
        }
        self.release();
        self.paint();
    }

    fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.progress = 0;
        }
        self.group = 0;
        self.gap_left = 0;
        tracing::debug!("pour reset");
        self.paint();
    }

    fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    fn is_complete(&self) -> bool {
        self.group >= self.groups.len()
            && (0..self.cells.len()).all(|idx| self.cells[idx].progress >= self.terminal(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn pour(text: &str, direction: PourDirection) -> PourEffect {
        pour_at(text, direction, 1)
    }

    fn pour_at(text: &str, direction: PourDirection, pour_speed: usize) -> PourEffect {
        let config = PourConfig {
            text: text.to_string(),
            direction,
            pour_speed,
            ..PourConfig::for_theme(20, 8, "catppuccin")
        };
        PourEffect::new(config, StdRng::seed_from_u64(0))
    }

    fn first_released(fx: &PourEffect) -> Vec<(u16, u16)> {
        fx.cells()
            .iter()
            .filter(|c| c.progress > 0)
            .map(|c| (c.x, c.y))
            .collect()
    }

    #[test]
    fn down_fills_bottom_row_first() {
        let mut fx = pour("AB\nCD", PourDirection::Down);
        fx.update();
        let bottom = fx.cells().iter().map(|c| c.y).max();
        let released = first_released(&fx);
        assert_eq!(released.len(), 2);
        assert!(released.iter().all(|&(_, y)| Some(y) == bottom));
    }

    #[test]
    fn left_fills_leftmost_column_first() {
        let mut fx = pour("AB\nCD", PourDirection::Left);
        fx.update();
        let left = fx.cells().iter().map(|c| c.x).min();
        let released = first_released(&fx);
        assert!(released.iter().all(|&(x, _)| Some(x) == left));
    }

    #[test]
    fn gap_idles_between_groups() {
        let mut fx = pour("AB\nCD", PourDirection::Up);
        fx.update();
        assert_eq!(first_released(&fx).len(), 2);
        fx.update();
        assert_eq!(first_released(&fx).len(), 2);
        fx.update();
        assert_eq!(first_released(&fx).len(), 4);
    }

    #[test]
    fn pour_speed_releases_whole_rows() {
        let mut fx = pour_at("AB\nCD\nEF", PourDirection::Down, 2);
        fx.update();
        let released = first_released(&fx);
        assert_eq!(released.len(), 4);
        let top = fx.cells().iter().map(|c| c.y).min();
        assert!(released.iter().all(|&(_, y)| Some(y) != top));
        fx.update();
        fx.update();
        assert_eq!(first_released(&fx).len(), 6);
    }

    #[test]
    fn groups_are_ordered_farthest_first() {
        let layout = layout_text("ABC\nDEF", 10, 4);
        let targets = |direction| -> Vec<String> {
            group_cells(&layout.cells, direction)
                .iter()
                .map(|g| g.iter().map(|&i| layout.cells[i].target).collect())
                .collect()
        };
        assert_eq!(targets(PourDirection::Down), ["DEF", "ABC"]);
        assert_eq!(targets(PourDirection::Up), ["ABC", "DEF"]);
        assert_eq!(targets(PourDirection::Right), ["CF", "BE", "AD"]);
    }

    #[test]
    fn travelling_cell_starts_at_edge_in_starting_color() {
        let mut fx = pour("X", PourDirection::Down);
        fx.update();
        let cell = fx.cells()[0].clone();
        let (x, y) = fx.position(&cell);
        assert!(y < cell.y as i32);
        let painted = fx.canvas().get(x as u16, y as u16).copied();
        assert_eq!(painted.and_then(|c| c.color), Some(WHITE));
    }

    #[test]
    fn completes_with_every_glyph_in_place() {
        let mut fx = pour(PLACEHOLDER, PourDirection::Down);
        let mut ticks = 0;
        while !fx.is_complete() {
            fx.update();
            ticks += 1;
            assert!(ticks < 5_000);
        }
        for cell in fx.cells() {
            let painted = fx.canvas().get(cell.x, cell.y).map(|c| c.glyph);
            assert_eq!(painted, Some(cell.target));
        }
        let frame = fx.render();
        fx.update();
        assert_eq!(fx.render(), frame);
    }

    #[test]
    fn direction_from_name() {
        assert_eq!(PourDirection::from_name("LEFT"), Some(PourDirection::Left));
        assert_eq!(PourDirection::from_name("diagonal"), None);
    }
}

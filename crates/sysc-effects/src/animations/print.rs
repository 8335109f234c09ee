//! Print: a typewriter head sweeping the text line by line.

use std::time::Duration;

use rand::rngs::StdRng;
use ratatui::{layout::Rect, style::Color};

use super::{Animation, grid_size};
use crate::canvas::Canvas;
use crate::chars::{PRINT_HEAD, PRINT_TRAIL};
use crate::color::dim;
use crate::gradient::{Gradient, GradientDirection, GradientSpec};
use crate::layout::{TextCell, layout_text, text_or};
use crate::palette::{Palette, PaletteFamily};

/// Text shown when no input text is given.
pub const PLACEHOLDER: &str = "PRINT EFFECT\nDEMO TEXT\nTHIRD LINE";

/// Print settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintConfig {
    pub width: u16,
    pub height: u16,
    pub text: String,
    /// Columns the head advances per tick.
    pub print_speed: usize,
    pub head: char,
    /// Glyphs left behind the head on blank columns, faint to strong.
    pub trail: Vec<char>,
    pub gradient: GradientSpec,
    /// Recommended frame interval.
    pub char_delay: Duration,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self::for_theme(80, 24, "")
    }
}

impl PrintConfig {
    pub fn for_theme(width: u16, height: u16, theme: &str) -> Self {
        let stops = Palette::resolve(PaletteFamily::Print, theme);
        Self {
            width,
            height,
            text: PLACEHOLDER.to_string(),
            print_speed: 2,
            head: PRINT_HEAD,
            trail: PRINT_TRAIL.to_vec(),
            gradient: GradientSpec::new(
                stops.colors().to_vec(),
                12,
                1,
                GradientDirection::Horizontal,
            ),
            char_delay: Duration::from_millis(30),
        }
    }
}

/// A text row the head has to sweep.
#[derive(Debug, Clone)]
struct Row {
    y: u16,
    /// Last column holding a character.
    end: u16,
    cells: Vec<usize>,
}

#[derive(Debug)]
pub struct PrintEffect {
    config: PrintConfig,
    cells: Vec<TextCell>,
    rows: Vec<Row>,
    gradient: Gradient,
    bounds: Rect,
    /// Index into `rows` of the line being printed.
    line: usize,
    /// Column of the head.
    head: u16,
    canvas: Canvas,
}

impl PrintEffect {
    pub fn new(mut config: PrintConfig, _rng: StdRng) -> Self {
        let (width, height) = grid_size(config.width, config.height);
        config.width = width;
        config.height = height;
        config.print_speed = config.print_speed.max(1);

        let layout = layout_text(text_or(&config.text, PLACEHOLDER), width, height);
        let gradient = config.gradient.build();
        let mut rows: Vec<Row> = Vec::new();
        for (idx, cell) in layout.cells.iter().enumerate() {
            match rows.last_mut() {
                Some(row) if row.y == cell.y => {
                    row.end = cell.x;
                    row.cells.push(idx);
                }
                _ => rows.push(Row {
                    y: cell.y,
                    end: cell.x,
                    cells: vec![idx],
                }),
            }
        }

        let mut cells = layout.cells;
        for cell in &mut cells {
            cell.color = Some(gradient.spatial(cell.x, cell.y, layout.bounds, config.gradient.direction));
        }

        let mut print = Self {
            config,
            cells,
            rows,
            gradient,
            bounds: layout.bounds,
            line: 0,
            head: layout.bounds.x,
            canvas: Canvas::new(width, height),
        };
        tracing::debug!(width, height, rows = print.rows.len(), "print effect created");
        print.paint();
        print
    }

    pub fn cells(&self) -> &[TextCell] {
        &self.cells
    }

    /// Recommended time between updates.
    pub fn char_delay(&self) -> Duration {
        self.config.char_delay
    }

    /// Print the column under the head and move one column on.
    fn step(&mut self) {
        let Some(row) = self.rows.get(self.line) else {
            return;
        };
        let (end, hit) = (
            row.end,
            row.cells.iter().copied().find(|&i| self.cells[i].x == self.head),
        );
        if let Some(idx) = hit {
            let cell = &mut self.cells[idx];
            cell.glyph = cell.target;
            cell.progress = 1;
        }
        self.head += 1;
        if self.head > end {
            self.line += 1;
            self.head = self.bounds.x;
        }
    }

    fn head_color(&self, x: u16, y: u16) -> Color {
        self.gradient
            .spatial(x, y, self.bounds, self.config.gradient.direction)
    }

    fn paint(&mut self) {
        self.canvas.clear();
        for cell in self.cells.iter().filter(|c| c.progress > 0) {
            self.canvas
                .paint(cell.x as i32, cell.y as i32, cell.glyph, cell.color);
        }

        let Some(row) = self.rows.get(self.line) else {
            return;
        };
        let y = row.y;
        let head_color = self.head_color(self.head, y);
        for (k, &glyph) in self.config.trail.iter().rev().enumerate() {
            let Some(x) = self.head.checked_sub(k as u16 + 1) else {
                break;
            };
            if x < self.bounds.x {
                break;
            }
            let blank = self
                .canvas
                .get(x, y)
                .is_none_or(|cell| cell.glyph == ' ');
            if blank {
                let fade = 1.0 - 0.2 * (k as f32 + 1.0);
                self.canvas
                    .paint(x as i32, y as i32, glyph, Some(dim(head_color, fade)));
            }
        }
        self.canvas
            .paint(self.head as i32, y as i32, self.config.head, Some(head_color));
    }
}

impl Animation for PrintEffect {
    fn update(&mut self) {
        for _ in 0..self.config.print_speed {
            self.step();
        }
        self.paint();
    }

    fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.progress = 0;
            cell.glyph = ' ';
        }
        self.line = 0;
        self.head = self.bounds.x;
        tracing::debug!("print reset");
        self.paint();
    }

    fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    fn is_complete(&self) -> bool {
        self.line >= self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn print(text: &str, width: u16, height: u16) -> PrintEffect {
        let config = PrintConfig {
            text: text.to_string(),
            ..PrintConfig::for_theme(width, height, "solarized")
        };
        PrintEffect::new(config, StdRng::seed_from_u64(0))
    }

    fn row_text(fx: &PrintEffect, y: u16) -> String {
        fx.canvas().plain_text().lines().nth(y as usize).unwrap_or_default().to_string()
    }

    #[test]
    fn head_advances_print_speed_columns() {
        let mut fx = print("ABCDEF", 6, 1);
        assert_eq!(row_text(&fx, 0), "█     ");
        fx.update();
        assert_eq!(row_text(&fx, 0), "AB█   ");
        fx.update();
        assert_eq!(row_text(&fx, 0), "ABCD█ ");
    }

    #[test]
    fn trail_fills_blank_columns_behind_head() {
        let mut fx = print("A   B", 5, 1);
        fx.update();
        fx.update();
        // Head at column 4, columns 1..=3 are blank
        assert_eq!(row_text(&fx, 0), "A░▒▓█");
    }

    #[test]
    fn sweeps_lines_in_order() {
        let mut fx = print("AB\nCD", 2, 2);
        fx.update();
        assert_eq!(row_text(&fx, 0), "AB");
        assert_eq!(row_text(&fx, 1), "█ ");
        fx.update();
        assert_eq!(row_text(&fx, 1), "CD");
        assert!(fx.is_complete());
    }

    #[test]
    fn printed_cells_use_gradient_colors() {
        let mut fx = print("ABCDEFGH", 8, 1);
        while !fx.is_complete() {
            fx.update();
        }
        let first = fx.canvas().get(0, 0).and_then(|c| c.color);
        let last = fx.canvas().get(7, 0).and_then(|c| c.color);
        assert_eq!(first, Some(fx.gradient.get(0)));
        assert_eq!(last, Some(fx.gradient.last()));
    }

    #[test]
    fn completes_with_stable_frame() {
        let mut fx = print(PLACEHOLDER, 30, 6);
        let mut ticks = 0;
        while !fx.is_complete() {
            fx.update();
            ticks += 1;
            assert!(ticks < 1_000);
        }
        let frame = fx.render();
        fx.update();
        assert_eq!(fx.render(), frame);
        assert!(fx.canvas().plain_text().contains("PRINT EFFECT"));
        assert!(!fx.canvas().plain_text().contains(PRINT_HEAD));
    }

    #[test]
    fn default_char_delay() {
        assert_eq!(print("x", 4, 1).char_delay(), Duration::from_millis(30));
    }
}

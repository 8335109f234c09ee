//! Character grid that every effect paints into.

use std::fmt::{self, Write as _};

use crossterm::{
    Command,
    style::{self as term_style, ResetColor, SetForegroundColor},
};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

/// One glyph of the grid and its optional foreground color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub color: Option<Color>,
}

impl Cell {
    /// Blank, uncolored cell.
    pub const BLANK: Cell = Cell {
        glyph: ' ',
        color: None,
    };

    /// Color to emit for this cell; `Color::Reset` is treated like no color.
    fn visible_color(&self) -> Option<Color> {
        match self.color {
            Some(Color::Reset) | None => None,
            color => color,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Fixed-size grid of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    /// Create a blank canvas.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Write a cell. Positions outside the grid are ignored.
    pub fn paint(&mut self, x: i32, y: i32, glyph: char, color: Option<Color>) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.cells[idx] = Cell { glyph, color };
    }

    /// Read a cell, `None` when out of bounds.
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y as usize * self.width as usize + x as usize)
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        let w = self.width as usize;
        (0..self.height as usize).map(move |y| &self.cells[y * w..(y + 1) * w])
    }

    /// Serialize to newline-joined rows with ANSI truecolor markup.
    ///
    /// Adjacent cells of the same color share one escape sequence.
    pub fn serialize(&self) -> String {
        self.to_string()
    }

    /// Glyphs only, without any color markup.
    pub fn plain_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                out.push('\n');
            }
            out.extend(row.iter().map(|c| c.glyph));
        }
        out
    }

    /// Convert to ratatui lines, one span per same-color run.
    pub fn lines(&self) -> Vec<Line<'static>> {
        self.rows()
            .map(|row| {
                let mut spans: Vec<Span<'static>> = Vec::new();
                let mut run = String::new();
                let mut run_color: Option<Color> = None;
                for cell in row {
                    let color = cell.visible_color();
                    if color != run_color && !run.is_empty() {
                        spans.push(styled_span(std::mem::take(&mut run), run_color));
                    }
                    run_color = color;
                    run.push(cell.glyph);
                }
                if !run.is_empty() {
                    spans.push(styled_span(run, run_color));
                }
                Line::from(spans)
            })
            .collect()
    }
}

fn styled_span(text: String, color: Option<Color>) -> Span<'static> {
    match color {
        Some(color) => Span::styled(text, Style::new().fg(color)),
        None => Span::raw(text),
    }
}

fn to_terminal_color(color: Color) -> term_style::Color {
    use term_style::Color as C;
    match color {
        Color::Reset => C::Reset,
        Color::Black => C::Black,
        Color::Red => C::DarkRed,
        Color::Green => C::DarkGreen,
        Color::Yellow => C::DarkYellow,
        Color::Blue => C::DarkBlue,
        Color::Magenta => C::DarkMagenta,
        Color::Cyan => C::DarkCyan,
        Color::Gray => C::Grey,
        Color::DarkGray => C::DarkGrey,
        Color::LightRed => C::Red,
        Color::LightGreen => C::Green,
        Color::LightYellow => C::Yellow,
        Color::LightBlue => C::Blue,
        Color::LightMagenta => C::Magenta,
        Color::LightCyan => C::Cyan,
        Color::White => C::White,
        Color::Indexed(i) => C::AnsiValue(i),
        Color::Rgb(r, g, b) => C::Rgb { r, g, b },
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                f.write_char('\n')?;
            }
            let mut current: Option<Color> = None;
            for cell in row {
                let color = cell.visible_color();
                if color != current {
                    match color {
                        Some(c) => SetForegroundColor(to_terminal_color(c)).write_ansi(f)?,
                        None => ResetColor.write_ansi(f)?,
                    }
                    current = color;
                }
                f.write_char(cell.glyph)?;
            }
            if current.is_some() {
                ResetColor.write_ansi(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Drop ANSI escape sequences, keeping visible glyphs.
    pub(crate) fn strip_ansi(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn paint_ignores_out_of_bounds() {
        let mut canvas = Canvas::new(4, 3);
        canvas.paint(-1, 0, 'x', None);
        canvas.paint(0, -1, 'x', None);
        canvas.paint(4, 0, 'x', None);
        canvas.paint(0, 3, 'x', None);
        canvas.paint(i32::MAX, i32::MIN, 'x', None);
        assert_eq!(canvas, Canvas::new(4, 3));

        canvas.paint(3, 2, 'y', Some(Color::Rgb(1, 2, 3)));
        assert_eq!(canvas.get(3, 2).map(|c| c.glyph), Some('y'));
        assert!(canvas.get(4, 2).is_none());
    }

    #[test]
    fn clear_resets_cells() {
        let mut canvas = Canvas::new(3, 2);
        canvas.paint(1, 1, '#', Some(Color::Rgb(255, 0, 0)));
        canvas.clear();
        assert!(canvas.rows().flatten().all(|c| *c == Cell::BLANK));
    }

    #[test]
    fn serialize_wraps_colored_runs() {
        let mut canvas = Canvas::new(4, 1);
        let red = Color::Rgb(255, 0, 0);
        canvas.paint(1, 0, 'a', Some(red));
        canvas.paint(2, 0, 'b', Some(red));
        let out = canvas.serialize();
        // One color escape for the merged run plus the closing reset
        assert_eq!(out.matches("\x1b[38;2;255;0;0m").count(), 1);
        assert!(out.contains("ab"));
        assert_eq!(strip_ansi(&out), " ab ");
    }

    #[test]
    fn serialize_treats_reset_as_uncolored() {
        let mut canvas = Canvas::new(2, 1);
        canvas.paint(0, 0, 'a', Some(Color::Reset));
        assert_eq!(canvas.serialize(), "a ");
    }

    #[test]
    fn serialize_is_idempotent() {
        let mut canvas = Canvas::new(5, 2);
        canvas.paint(2, 1, '*', Some(Color::Rgb(9, 9, 9)));
        assert_eq!(canvas.serialize(), canvas.serialize());
    }

    #[test]
    fn serialize_keeps_named_colors() {
        let mut canvas = Canvas::new(3, 1);
        canvas.paint(0, 0, 'x', Some(Color::Red));
        canvas.paint(1, 0, 'y', Some(Color::LightRed));
        canvas.paint(2, 0, 'z', Some(Color::Indexed(42)));
        let out = canvas.serialize();
        assert_eq!(
            out,
            "\x1b[38;5;1mx\x1b[38;5;9my\x1b[38;5;42mz\x1b[0m"
        );
        assert!(!out.contains("38;2;"));
    }

    #[test]
    fn lines_match_plain_text() {
        let mut canvas = Canvas::new(3, 2);
        canvas.paint(0, 0, 'x', Some(Color::Rgb(1, 1, 1)));
        canvas.paint(2, 1, 'z', None);
        let lines = canvas.lines();
        assert_eq!(lines.len(), 2);
        let rendered: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(rendered.join("\n"), canvas.plain_text());
        assert_eq!(lines[0].spans.len(), 2);
    }

    proptest! {
        #[test]
        fn serialize_has_height_lines_of_width_glyphs(
            width in 1u16..40,
            height in 1u16..20,
            points in prop::collection::vec((-5i32..45, -5i32..25, 0u8..=255), 0..60),
        ) {
            let mut canvas = Canvas::new(width, height);
            for (x, y, shade) in points {
                let color = (shade % 3 != 0).then_some(Color::Rgb(shade, 255 - shade, 7));
                canvas.paint(x, y, 'ｱ', color);
            }
            let out = canvas.serialize();
            let lines: Vec<&str> = out.split('\n').collect();
            prop_assert_eq!(lines.len(), height as usize);
            for line in lines {
                prop_assert_eq!(strip_ansi(line).chars().count(), width as usize);
            }
        }
    }
}

//! Text layout for the reveal effects.

use ratatui::{layout::Rect, style::Color};

/// One target character of a text effect and its animation progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextCell {
    /// Character this cell settles on.
    pub target: char,
    /// Column on the canvas.
    pub x: u16,
    /// Row on the canvas.
    pub y: u16,
    /// Effect-specific progress counter. Only ever increases.
    pub progress: u32,
    /// Glyph currently displayed.
    pub glyph: char,
    /// Color currently displayed.
    pub color: Option<Color>,
}

impl TextCell {
    fn new(target: char, x: u16, y: u16) -> Self {
        Self {
            target,
            x,
            y,
            progress: 0,
            glyph: ' ',
            color: None,
        }
    }
}

/// Laid-out text: visible cells in reading order plus the block's bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLayout {
    pub cells: Vec<TextCell>,
    pub bounds: Rect,
}

/// Use `placeholder` when `text` has nothing visible.
pub fn text_or<'a>(text: &'a str, placeholder: &'a str) -> &'a str {
    if text.trim().is_empty() {
        placeholder
    } else {
        text
    }
}

/// Center `text` on a `width`×`height` grid.
///
/// Lines keep their left alignment inside the centered block. Whitespace
/// produces no cell, and anything that does not fit the grid is dropped.
pub fn layout_text(text: &str, width: u16, height: u16) -> TextLayout {
    let expanded = text.replace('\t', "    ");
    let lines: Vec<Vec<char>> = expanded
        .trim_end()
        .lines()
        .take(height as usize)
        .map(|line| line.trim_end().chars().take(width as usize).collect())
        .collect();

    let block_w = lines.iter().map(Vec::len).max().unwrap_or(0) as u16;
    let block_h = lines.len() as u16;
    let x0 = (width - block_w) / 2;
    let y0 = (height - block_h) / 2;

    let cells = lines
        .iter()
        .enumerate()
        .flat_map(|(row, line)| {
            line.iter().enumerate().filter_map(move |(col, &ch)| {
                (!ch.is_whitespace()).then(|| TextCell::new(ch, x0 + col as u16, y0 + row as u16))
            })
        })
        .collect();

    TextLayout {
        cells,
        bounds: Rect::new(x0, y0, block_w, block_h),
    }
}

/// Word-wrap `text` to `width` columns, hard-breaking words that are longer
/// than a whole line. Blank lines are preserved.
pub fn wrap_text(text: &str, width: usize) -> String {
    let width = if width == 0 { 80 } else { width };
    let mut wrapped: Vec<String> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            wrapped.push(String::new());
            continue;
        }
        if line.chars().count() <= width {
            wrapped.push(line.to_string());
            continue;
        }

        let mut current = String::new();
        let mut current_len = 0;
        for word in line.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            if word.len() > width {
                if !current.is_empty() {
                    wrapped.push(std::mem::take(&mut current));
                }
                while word.len() > width {
                    wrapped.push(word.drain(..width).collect());
                }
                current = word.iter().collect();
                current_len = word.len();
                continue;
            }

            let extra = if current.is_empty() { 0 } else { 1 };
            if current_len + extra + word.len() <= width {
                if extra == 1 {
                    current.push(' ');
                }
                current.extend(word.iter());
                current_len += extra + word.len();
            } else {
                if !current.is_empty() {
                    wrapped.push(std::mem::take(&mut current));
                }
                current = word.iter().collect();
                current_len = word.len();
            }
        }
        if !current.is_empty() {
            wrapped.push(current);
        }
    }

    wrapped.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_centers_block() {
        let layout = layout_text("HI", 10, 5);
        assert_eq!(layout.bounds, Rect::new(4, 2, 2, 1));
        let placed: Vec<(char, u16, u16)> =
            layout.cells.iter().map(|c| (c.target, c.x, c.y)).collect();
        assert_eq!(placed, vec![('H', 4, 2), ('I', 5, 2)]);
    }

    #[test]
    fn layout_skips_whitespace_and_keeps_left_alignment() {
        let layout = layout_text("AB C\nD", 20, 4);
        assert_eq!(layout.bounds, Rect::new(8, 1, 4, 2));
        let targets: String = layout.cells.iter().map(|c| c.target).collect();
        assert_eq!(targets, "ABCD");
        assert_eq!((layout.cells[3].x, layout.cells[3].y), (8, 2));
    }

    #[test]
    fn layout_clips_to_grid() {
        let layout = layout_text("ABCDEFGH\n1\n2\n3", 4, 2);
        assert_eq!(layout.bounds, Rect::new(0, 0, 4, 2));
        assert!(layout.cells.iter().all(|c| c.x < 4 && c.y < 2));
        assert_eq!(layout.cells.len(), 5);
    }

    #[test]
    fn layout_of_empty_text_has_no_cells() {
        let layout = layout_text("   \n", 10, 10);
        assert!(layout.cells.is_empty());
    }

    #[test]
    fn text_or_uses_placeholder_for_blank_input() {
        assert_eq!(text_or("  \n", "DEFAULT"), "DEFAULT");
        assert_eq!(text_or("mine", "DEFAULT"), "mine");
    }

    #[test]
    fn wrap_keeps_short_lines() {
        assert_eq!(wrap_text("hello\n\nworld", 10), "hello\n\nworld");
    }

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(
            wrap_text("the quick brown fox jumps", 10),
            "the quick\nbrown fox\njumps"
        );
    }

    #[test]
    fn wrap_hard_breaks_long_words() {
        assert_eq!(wrap_text("abcdefghij xy", 4), "abcd\nefgh\nij\nxy");
    }

    #[test]
    fn wrap_zero_width_defaults_to_80() {
        let line = "a".repeat(80);
        assert_eq!(wrap_text(&line, 0), line);
    }
}

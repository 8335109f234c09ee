//! Plain ANSI output without the terminal UI.

use std::{
    io::{self, Write},
    time::Instant,
};

use color_eyre::eyre::{Result, WrapErr};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::ResetColor,
    terminal::{self, Clear, ClearType},
};
use sysc_effects::AnimationState;

/// Print frames straight to stdout until `deadline`, a quit key, or forever.
///
/// The terminal is switched to raw mode so Ctrl-C arrives as a key and the
/// cursor is always restored.
pub fn run(mut state: AnimationState, deadline: Option<Instant>) -> Result<()> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode().wrap_err("failed to enable raw mode")?;
    execute!(stdout, Hide, Clear(ClearType::All)).wrap_err("failed to prepare terminal")?;

    let result = frames(&mut stdout, &mut state, deadline);

    let (_, height) = state.size();
    execute!(stdout, ResetColor, MoveTo(0, height), Show).wrap_err("failed to restore terminal")?;
    terminal::disable_raw_mode().wrap_err("failed to disable raw mode")?;
    writeln!(stdout)?;
    result
}

fn frames(out: &mut impl Write, state: &mut AnimationState, deadline: Option<Instant>) -> Result<()> {
    while deadline.is_none_or(|deadline| Instant::now() < deadline) {
        state.update();
        write_frame(out, &state.render_ansi())?;
        if event::poll(state.frame_interval())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press && is_quit(key) => break,
                Event::Resize(width, height) => state.resize(width, height),
                _ => {}
            }
        }
    }
    Ok(())
}

/// Raw mode has no implicit carriage return, so every row is placed explicitly.
fn write_frame(out: &mut impl Write, frame: &str) -> Result<()> {
    for (y, row) in frame.split('\n').enumerate() {
        queue!(out, MoveTo(0, y as u16))?;
        out.write_all(row.as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

fn is_quit(key: KeyEvent) -> bool {
    matches!(
        (key.modifiers, key.code),
        (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C'))
    )
}

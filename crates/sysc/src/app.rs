use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use sysc_effects::AnimationState;

/// The terminal UI: draws the running effect and handles keys.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    state: AnimationState,
    /// When to stop on our own, if ever.
    deadline: Option<Instant>,
    last_tick: Instant,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(state: AnimationState, deadline: Option<Instant>) -> Self {
        Self {
            running: false,
            state,
            deadline,
            last_tick: Instant::now(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        self.running = true;
        while self.running {
            terminal.draw(|frame| self.state.draw(frame))?;
            self.handle_crossterm_events()?;
            self.tick();
        }
        Ok(())
    }

    /// Advance the effect once a frame interval has passed.
    fn tick(&mut self) {
        if self.last_tick.elapsed() >= self.state.frame_interval() {
            self.state.update();
            self.last_tick = Instant::now();
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            tracing::info!("duration elapsed");
            self.quit();
        }
    }

    /// Wait for input until the next frame is due.
    fn handle_crossterm_events(&mut self) -> Result<()> {
        let timeout = self
            .state
            .frame_interval()
            .saturating_sub(self.last_tick.elapsed());
        if event::poll(timeout.max(Duration::from_millis(1)))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(width, height) => self.state.resize(width, height),
                _ => {}
            }
        }
        Ok(())
    }

    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('r')) => self.state.reset(),
            (_, KeyCode::Char('t')) => self.state.cycle_theme(),
            (_, KeyCode::Char('e')) => self.state.cycle_effect(),
            _ => {}
        }
    }

    fn quit(&mut self) {
        self.running = false;
    }
}

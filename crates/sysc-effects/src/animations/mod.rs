//! Effect implementations.

use std::fmt;

use crate::canvas::Canvas;

pub mod beams;
pub mod decrypt;
pub mod fire;
pub mod fireworks;
pub mod matrix;
pub mod pour;
pub mod print;
pub mod rain;

/// Common interface of every effect.
///
/// `update` advances the simulation by one tick and repaints the effect's
/// canvas; `render` only serializes that canvas, so calling it repeatedly
/// without an `update` in between returns identical text.
pub trait Animation: fmt::Debug {
    /// Advance the animation by one tick.
    fn update(&mut self);

    /// Restart the animation from its initial state.
    fn reset(&mut self);

    /// Canvas painted by the most recent tick.
    fn canvas(&self) -> &Canvas;

    /// Current frame as colored text.
    fn render(&self) -> String {
        self.canvas().serialize()
    }

    /// Whether the animation has settled on a final, unchanging frame.
    fn is_complete(&self) -> bool {
        false
    }
}

/// Clamp a requested grid size so every effect has at least one cell.
pub(crate) fn grid_size(width: u16, height: u16) -> (u16, u16) {
    (width.max(1), height.max(1))
}

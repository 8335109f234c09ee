//! Animation effects engine for sysc.
//!
//! Every effect paints a fixed-size [`Canvas`] once per tick. The canvas is
//! serialized to ANSI truecolor text for raw output or converted to ratatui
//! lines for drawing inside a terminal UI. Colors come from per-theme
//! [`Palette`]s and precomputed [`Gradient`]s.

pub mod animations;
mod canvas;
pub mod chars;
mod color;
mod gradient;
mod layout;
mod palette;
mod state;

pub use animations::Animation;
pub use canvas::{Canvas, Cell};
pub use color::{WHITE, dim, hex_to_color, lerp_color};
pub use gradient::{Gradient, GradientDirection, GradientSpec, build_gradient};
pub use layout::{TextCell, TextLayout, layout_text, text_or, wrap_text};
pub use palette::{Palette, PaletteFamily};
pub use state::{AnimationState, build_effect};

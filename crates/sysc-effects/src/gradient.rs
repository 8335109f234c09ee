//! Precomputed color gradients.
//!
//! A gradient is built once from its stops and then consumed by index: either
//! by a driving tick counter (each step held for `frames` ticks) or spatially,
//! by mapping a coordinate inside a bounding box onto the steps.

use ratatui::{layout::Rect, style::Color};

use crate::color::{WHITE, lerp_color};

/// How a gradient is spread across a block of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GradientDirection {
    #[default]
    Horizontal,
    Vertical,
    Diagonal,
    Radial,
}

impl GradientDirection {
    /// Parse `horizontal`, `vertical`, `diagonal` or `radial`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Some(Self::Horizontal),
            "vertical" => Some(Self::Vertical),
            "diagonal" => Some(Self::Diagonal),
            "radial" => Some(Self::Radial),
            _ => None,
        }
    }
}

/// Recipe for a gradient: stops, step count, frame hold and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientSpec {
    pub stops: Vec<Color>,
    pub steps: usize,
    pub frames: u32,
    pub direction: GradientDirection,
}

impl GradientSpec {
    pub fn new(stops: Vec<Color>, steps: usize, frames: u32, direction: GradientDirection) -> Self {
        Self {
            stops,
            steps,
            frames,
            direction,
        }
    }

    /// Precompute the colors.
    pub fn build(&self) -> Gradient {
        build_gradient(&self.stops, self.steps, self.frames)
    }
}

/// Precomputed gradient colors plus the number of ticks each is held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gradient {
    colors: Vec<Color>,
    frames: u32,
}

/// Interpolate `steps` colors across `stops` in RGB space.
///
/// The first color is the first stop and, for two or more steps, the last
/// color is the last stop. An empty stop list is treated as plain white.
pub fn build_gradient(stops: &[Color], steps: usize, frames: u32) -> Gradient {
    let stops: &[Color] = if stops.is_empty() { &[WHITE] } else { stops };
    let colors = if stops.len() == 1 || steps <= 1 {
        vec![stops[0]; steps]
    } else {
        let segments = stops.len() - 1;
        (0..steps)
            .map(|i| {
                let pos = i as f32 * segments as f32 / (steps - 1) as f32;
                let seg = (pos.floor() as usize).min(segments - 1);
                lerp_color(stops[seg], stops[seg + 1], pos - seg as f32)
            })
            .collect()
    };
    Gradient {
        colors,
        frames: frames.max(1),
    }
}

impl Gradient {
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Ticks each step is held for (at least 1).
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Color at `idx`, clamped to the last step.
    pub fn get(&self, idx: usize) -> Color {
        match self.colors.len() {
            0 => WHITE,
            len => self.colors[idx.min(len - 1)],
        }
    }

    pub fn last(&self) -> Color {
        self.get(usize::MAX)
    }

    /// Color after `tick` ticks of a driving counter.
    pub fn color_at(&self, tick: u32) -> Color {
        self.get((tick / self.frames) as usize)
    }

    /// First tick at which `color_at` returns the final color.
    pub fn settle_tick(&self) -> u32 {
        self.colors.len().saturating_sub(1) as u32 * self.frames
    }

    /// Color for a coordinate inside `bounds`.
    pub fn spatial(&self, x: u16, y: u16, bounds: Rect, direction: GradientDirection) -> Color {
        if self.colors.len() <= 1 {
            return self.get(0);
        }
        let frac_x = fraction(x.saturating_sub(bounds.x), bounds.width);
        let frac_y = fraction(y.saturating_sub(bounds.y), bounds.height);
        let frac = match direction {
            GradientDirection::Horizontal => frac_x,
            GradientDirection::Vertical => frac_y,
            GradientDirection::Diagonal => (frac_x + frac_y) / 2.0,
            GradientDirection::Radial => {
                let half_w = bounds.width.saturating_sub(1) as f32 / 2.0;
                // Terminal cells are roughly twice as tall as wide
                let half_h = bounds.height.saturating_sub(1) as f32;
                let dx = (x as f32 - bounds.x as f32) - half_w;
                let dy = ((y as f32 - bounds.y as f32) - half_h / 2.0) * 2.0;
                let max = (half_w * half_w + half_h * half_h).sqrt();
                if max == 0.0 {
                    0.0
                } else {
                    ((dx * dx + dy * dy).sqrt() / max).min(1.0)
                }
            }
        };
        let idx = (frac * (self.colors.len() - 1) as f32).round() as usize;
        self.get(idx)
    }
}

fn fraction(offset: u16, extent: u16) -> f32 {
    if extent <= 1 {
        0.0
    } else {
        (offset as f32 / (extent - 1) as f32).min(1.0)
    }
}

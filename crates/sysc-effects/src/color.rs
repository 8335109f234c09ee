//! Color utility functions for effects.

use ratatui::style::Color;

/// Plain white, used as the fallback for empty or invalid color lists.
pub const WHITE: Color = Color::Rgb(255, 255, 255);

/// Parse a `#rrggbb` hex string into an RGB color.
///
/// Named and indexed colors are rejected because gradients need RGB channels.
pub fn hex_to_color(hex: &str) -> Option<Color> {
    match hex.trim().parse::<Color>() {
        Ok(color @ Color::Rgb(..)) => Some(color),
        _ => None,
    }
}

/// Split a color into RGB channels. Non-RGB colors map to light gray.
pub fn rgb_components(color: Color) -> (u8, u8, u8) {
    match color {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Black => (0, 0, 0),
        Color::White => (255, 255, 255),
        _ => (192, 192, 192),
    }
}

/// Linearly interpolate between two colors, `t` in 0.0-1.0.
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let (ar, ag, ab) = rgb_components(a);
    let (br, bg, bb) = rgb_components(b);
    Color::Rgb(
        lerp_channel(ar, br, t),
        lerp_channel(ag, bg, t),
        lerp_channel(ab, bb, t),
    )
}

fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round() as u8
}

/// Scale a color's brightness towards black, `factor` in 0.0-1.0.
pub fn dim(color: Color, factor: f32) -> Color {
    let factor = factor.clamp(0.0, 1.0);
    let (r, g, b) = rgb_components(color);
    Color::Rgb(
        (r as f32 * factor).round() as u8,
        (g as f32 * factor).round() as u8,
        (b as f32 * factor).round() as u8,
    )
}

/// Perceived brightness (0-255) used to order palette entries.
pub fn luminance(color: Color) -> u32 {
    let (r, g, b) = rgb_components(color);
    (299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_color() {
        assert_eq!(hex_to_color("#ff79c6"), Some(Color::Rgb(255, 121, 198)));
        assert_eq!(hex_to_color(" #000000 "), Some(Color::Rgb(0, 0, 0)));
        assert_eq!(hex_to_color("not a color"), None);
        assert_eq!(hex_to_color("red"), None);
    }

    #[test]
    fn test_lerp_color_endpoints() {
        let a = Color::Rgb(0, 100, 200);
        let b = Color::Rgb(200, 100, 0);
        assert_eq!(lerp_color(a, b, 0.0), a);
        assert_eq!(lerp_color(a, b, 1.0), b);
        assert_eq!(lerp_color(a, b, 0.5), Color::Rgb(100, 100, 100));
        // Out-of-range t is clamped
        assert_eq!(lerp_color(a, b, 3.0), b);
    }

    #[test]
    fn test_dim() {
        assert_eq!(dim(Color::Rgb(200, 100, 50), 0.5), Color::Rgb(100, 50, 25));
        assert_eq!(dim(Color::Rgb(200, 100, 50), 0.0), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_luminance_orders_black_before_white() {
        assert!(luminance(Color::Rgb(0, 0, 0)) < luminance(WHITE));
        assert_eq!(luminance(WHITE), 255);
    }
}

//! Character constants for effects.

/// Fire glyph ramp, coolest to hottest. Index 0 is never drawn.
pub const FIRE_CHARS: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Characters used for rain drops.
pub const RAIN_CHARS: &[char] = &[
    '|', '⋮', '║', '¦', '┆', '┊', '╎', '╏', '▏', '▎', '▍', '▌', '▋', '▊', '▉',
];

/// Characters used for matrix rain. Halfwidth katakana keep every glyph one
/// column wide.
pub const MATRIX_CHARS: &[char] = &[
    'ｱ', 'ｲ', 'ｳ', 'ｴ', 'ｵ', 'ｶ', 'ｷ', 'ｸ', 'ｹ', 'ｺ', 'ｻ', 'ｼ', 'ｽ', 'ｾ', 'ｿ', 'ﾀ',
    'ﾁ', 'ﾂ', 'ﾃ', 'ﾄ', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];

/// Firework rocket glyph.
pub const ROCKET_CHAR: char = '|';

/// Firework spark glyphs, freshest to nearly burnt out.
pub const SPARK_CHARS: &[char] = &['@', '*', '+', '·', '.'];

/// Glyphs shown while a decrypt cell is still ciphertext.
pub const CIPHER_CHARS: &[char] = &[
    '!', '#', '$', '%', '&', '*', '+', '/', '<', '=', '>', '?', '@', '^', '~', '0', '1', '2', '3',
    '4', '5', '6', '7', '8', '9', 'A', 'F', 'K', 'X', 'Z', '░', '▒', '▓', '█', '▄', '▀', '■', '□',
    '╳', '╱', '╲', 'Ж', 'Ψ', 'Ω', 'λ', 'Σ', 'ß', '¥', '§', '¤',
];

/// Default print head glyph.
pub const PRINT_HEAD: char = '█';

/// Default print trail glyphs, faint to strong.
pub const PRINT_TRAIL: &[char] = &['░', '▒', '▓'];

/// Default row beam glyphs, head first.
pub const BEAM_ROW_CHARS: &[char] = &['▂', '▁', '_'];

/// Default column beam glyphs, head first.
pub const BEAM_COLUMN_CHARS: &[char] = &['▌', '▍', '▎', '▏'];

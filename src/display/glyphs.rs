pub const DEGREE: char = '°';
/// Shown on the CPU line while caps lock is on.
pub const CAPS_LOCK: char = '🡅';
pub const FLAME: char = '🔥';
pub const WARNING: char = '⚠';

/// Column where a lone glyph is placed.
pub const GLYPH_COLUMN: usize = 14;
/// Column where the caps-lock glyph goes when an alert glyph follows it.
pub const PAIRED_GLYPH_COLUMN: usize = 12;

/// Pad `text` with spaces to `width` characters, then append `glyphs`.
pub fn place(text: &str, width: usize, glyphs: &[char]) -> String {
    let mut line = String::with_capacity(width + glyphs.len() * 4);
    line.push_str(text);
    let len = text.chars().count();
    if len < width {
        line.extend(std::iter::repeat(' ').take(width - len));
    }
    line.extend(glyphs.iter());
    line
}

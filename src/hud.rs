//! Status text for the framebuffer. Only uppercase letters, digits, space
//! and `!` are drawn; anything else advances like a space.

// 3x5 glyphs, MSB is the left column.
const LETTERS: [[u8; 5]; 26] = [
    [0b010, 0b101, 0b111, 0b101, 0b101], // A
    [0b110, 0b101, 0b110, 0b101, 0b110], // B
    [0b011, 0b100, 0b100, 0b100, 0b011], // C
    [0b110, 0b101, 0b101, 0b101, 0b110], // D
    [0b111, 0b100, 0b110, 0b100, 0b111], // E
    [0b111, 0b100, 0b110, 0b100, 0b100], // F
    [0b011, 0b100, 0b101, 0b101, 0b011], // G
    [0b101, 0b101, 0b111, 0b101, 0b101], // H
    [0b111, 0b010, 0b010, 0b010, 0b111], // I
    [0b001, 0b001, 0b001, 0b101, 0b010], // J
    [0b101, 0b110, 0b100, 0b110, 0b101], // K
    [0b100, 0b100, 0b100, 0b100, 0b111], // L
    [0b101, 0b111, 0b111, 0b101, 0b101], // M
    [0b110, 0b101, 0b101, 0b101, 0b101], // N
    [0b010, 0b101, 0b101, 0b101, 0b010], // O
    [0b110, 0b101, 0b110, 0b100, 0b100], // P
    [0b010, 0b101, 0b101, 0b110, 0b011], // Q
    [0b110, 0b101, 0b110, 0b101, 0b101], // R
    [0b011, 0b100, 0b010, 0b001, 0b110], // S
    [0b111, 0b010, 0b010, 0b010, 0b010], // T
    [0b101, 0b101, 0b101, 0b101, 0b111], // U
    [0b101, 0b101, 0b101, 0b101, 0b010], // V
    [0b101, 0b101, 0b111, 0b111, 0b101], // W
    [0b101, 0b101, 0b010, 0b101, 0b101], // X
    [0b101, 0b101, 0b010, 0b010, 0b010], // Y
    [0b111, 0b001, 0b010, 0b100, 0b111], // Z
];

const DIGITS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b010, 0b010, 0b010],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

const BANG: [u8; 5] = [0b010, 0b010, 0b010, 0b000, 0b010];

const GLYPH_W: usize = 3;
const GLYPH_H: usize = 5;
const ADVANCE: usize = GLYPH_W + 1;

fn glyph(c: char) -> Option<&'static [u8; 5]> {
    match c {
        'A'..='Z' => Some(&LETTERS[c as usize - 'A' as usize]),
        'a'..='z' => Some(&LETTERS[c as usize - 'a' as usize]),
        '0'..='9' => Some(&DIGITS[c as usize - '0' as usize]),
        '!' => Some(&BANG),
        _ => None,
    }
}

/// Pixel width of `text` at `scale`.
pub fn text_width(text: &str, scale: usize) -> usize {
    let n = text.chars().count();
    if n == 0 {
        return 0;
    }
    (n * ADVANCE - 1) * scale
}

#[inline]
pub fn text_height(scale: usize) -> usize {
    GLYPH_H * scale
}

/// Draw `text` with its top-left corner at (x, y), clipped to the buffer.
pub fn draw_text(
    buf: &mut [u32],
    width: usize,
    height: usize,
    x: i32,
    y: i32,
    text: &str,
    color: u32,
    scale: usize,
) {
    let scale = scale.max(1);
    for (i, c) in text.chars().enumerate() {
        let Some(rows) = glyph(c) else { continue };
        let gx = x + (i * ADVANCE * scale) as i32;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_W {
                if bits & (0b100 >> col) == 0 {
                    continue;
                }
                let px = gx + (col * scale) as i32;
                let py = y + (row * scale) as i32;
                fill_block(buf, width, height, px, py, scale, color);
            }
        }
    }
}

/// Draw `text` horizontally centred with its top edge at `y`.
pub fn draw_text_centered(
    buf: &mut [u32],
    width: usize,
    height: usize,
    y: i32,
    text: &str,
    color: u32,
    scale: usize,
) {
    let x = (width as i32 - text_width(text, scale) as i32) / 2;
    draw_text(buf, width, height, x, y, text, color, scale);
}

fn fill_block(
    buf: &mut [u32],
    width: usize,
    height: usize,
    x: i32,
    y: i32,
    size: usize,
    color: u32,
) {
    let x0 = x.max(0) as usize;
    let y0 = y.max(0) as usize;
    let x1 = ((x + size as i32).max(0) as usize).min(width);
    let y1 = ((y + size as i32).max(0) as usize).min(height);
    for yy in y0..y1 {
        let row = yy * width;
        buf[row + x0.min(x1)..row + x1].fill(color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_accounts_for_gaps() {
        assert_eq!(text_width("", 2), 0);
        assert_eq!(text_width("A", 1), 3);
        assert_eq!(text_width("AB", 1), 7);
        assert_eq!(text_width("AB", 3), 21);
        assert_eq!(text_height(4), 20);
    }

    #[test]
    fn draws_glyph_pixels() {
        let (w, h) = (8, 6);
        let mut buf = vec![0u32; w * h];
        draw_text(&mut buf, w, h, 0, 0, "T", 7, 1);
        // Top bar of T.
        assert_eq!(&buf[0..3], &[7, 7, 7]);
        // Stem.
        for row in 1..5 {
            assert_eq!(buf[row * w + 1], 7);
            assert_eq!(buf[row * w], 0);
        }
    }

    #[test]
    fn clips_at_edges() {
        let (w, h) = (4, 4);
        let mut buf = vec![0u32; w * h];
        draw_text(&mut buf, w, h, -2, -2, "HELLO WORLD!", 1, 2);
        draw_text(&mut buf, w, h, 3, 3, "M", 1, 5);
        assert!(buf.iter().any(|&p| p == 1));
    }

    #[test]
    fn unknown_chars_are_blank() {
        let (w, h) = (10, 5);
        let mut buf = vec![0u32; w * h];
        draw_text(&mut buf, w, h, 0, 0, " ?.", 9, 1);
        assert!(buf.iter().all(|&p| p == 0));
    }
}

// Window + software drawing utilities.
// What ends up on screen from here:
// 1) A resizable window that shows the composed frame.
// 2) A brush ring that follows the mouse (filled dot while pressed).
// 3) Flat rectangles for the HUD panel, progress rail and fill bars.
// 4) A tiny 5x7 bitmap font for HUD text, optionally scaled up for banners.

use crate::error::Error;
use crate::types::FrameBuffer;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window,
}

impl Drawer {
    /// Open a resizable window of the given size.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let opts = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window = Window::new(title, width, height, opts)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push this frame's pixels to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    pub fn r_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::R, KeyRepeat::No)
    }

    /// Current client-area size; changes when the user drags the border.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    /// Mouse position in window pixels, or `None` once it leaves the window.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// Vertical wheel delta since the last update (positive = scroll up).
    pub fn scroll_wheel(&self) -> f32 {
        self.window.get_scroll_wheel().map(|(_, dy)| dy).unwrap_or(0.0)
    }
}

/* ---------- Software drawing: pixels, lines, rects, rings ---------- */

#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 { return; }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height { return; }
    fb.pixels[y * fb.width + x] = color;
}

/// Bresenham line, 1px wide.
pub fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Solid rectangle, clipped to the frame. Zero or negative sizes draw nothing.
pub fn fill_rect(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, color: u32) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + w).min(fb.width as i32);
    let y1 = (y + h).min(fb.height as i32);
    if x0 >= x1 || y0 >= y1 { return; }
    for row in y0..y1 {
        let start = row as usize * fb.width;
        fb.pixels[start + x0 as usize..start + x1 as usize].fill(color);
    }
}

/// Circle outline (midpoint algorithm). Used as the brush cursor.
pub fn draw_ring(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: i32, color: u32) {
    if radius <= 0 {
        put_pixel(fb, cx, cy, color);
        return;
    }
    let (mut x, mut y) = (radius, 0);
    let mut err = 1 - radius;
    while x >= y {
        for (px, py) in [(x, y), (y, x), (-y, x), (-x, y), (-x, -y), (-y, -x), (y, -x), (x, -y)] {
            put_pixel(fb, cx + px, cy + py, color);
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Small filled disc, for the pressed cursor state.
pub fn fill_disc(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: i32, color: u32) {
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                put_pixel(fb, cx + dx, cy + dy, color);
            }
        }
    }
}

/* ---------- 5x7 bitmap font ---------- */

pub const GLYPH_W: i32 = 5;
pub const GLYPH_H: i32 = 7;
const ADVANCE: i32 = GLYPH_W + 1;

/// 5x7 glyph rows; low 5 bits are pixels (bit 4 = leftmost).
/// Lowercase letters render as their uppercase forms.
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '/' => g!(0b00000,0b00001,0b00010,0b00100,0b01000,0b10000,0b00000),
        '%' => g!(0b11000,0b11001,0b00010,0b00100,0b01000,0b10011,0b00011),

        _ => None,
    }
}

/// Pixel width of `text` at `scale`.
pub fn text_width(text: &str, scale: i32) -> i32 {
    text.chars().count() as i32 * ADVANCE * scale.max(1)
}

fn draw_char(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32, scale: i32) {
    let Some(rows) = glyph5x7(ch) else { return };
    // shadow first, offset one scaled pixel
    for (offset, c) in [(scale, 0x00_00_00_00), (0, color)] {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..GLYPH_W {
                if rowbits & (1 << (4 - rx)) == 0 { continue; }
                let px = x + rx * scale + offset;
                let py = y + ry as i32 * scale + offset;
                fill_rect(fb, px, py, scale, scale, c);
            }
        }
    }
}

/// Text at an integer scale (1 = native 5x7). Unknown characters leave a gap.
pub fn draw_text_scaled(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32, scale: i32) {
    let scale = scale.max(1);
    for ch in text.chars() {
        draw_char(fb, x, y, ch, color, scale);
        x += ADVANCE * scale;
    }
}

pub fn draw_text_5x7(fb: &mut FrameBuffer, x: i32, y: i32, text: &str, color: u32) {
    draw_text_scaled(fb, x, y, text, color, 1);
}

#[cfg(test)]
#[path = "../tests/unit/draw.rs"]
mod tests;

// Core pixel and geometry types shared by the reveal widget, the particle layer
// and the window code.

/// Screen buffer handed to minifb.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    pub fn fill(&mut self, color: u32) {
        for p in &mut self.pixels { *p = color; }
    }
}

/// Pack three channels as 0x00RRGGBB.
#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Split 0x00RRGGBB into channels.
#[inline]
pub fn unpack_rgb(px: u32) -> (u8, u8, u8) {
    (((px >> 16) & 0xFF) as u8, ((px >> 8) & 0xFF) as u8, (px & 0xFF) as u8)
}

/// The "grime" overlay: straight (non-premultiplied) RGBA, 4 bytes per pixel.
/// Alpha 255 = fully dirty, 0 = the clean image shows through.
#[derive(Clone)]
pub struct DirtyLayer {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,     // length = width * height * 4
}

impl DirtyLayer {
    /// Fully transparent layer of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, rgba: vec![0u8; width * height * 4] }
    }

    #[inline]
    pub fn len_pixels(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn alpha_at(&self, x: usize, y: usize) -> u8 {
        self.rgba[(y * self.width + x) * 4 + 3]
    }

    /// Source-over blend of a straight-alpha color onto one pixel.
    /// `a` is the source coverage in [0,1]; out-of-bounds writes are ignored.
    pub fn blend_over(&mut self, x: i32, y: i32, rgb: (u8, u8, u8), a: f32) {
        if x < 0 || y < 0 { return; }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height { return; }
        let a = a.clamp(0.0, 1.0);
        if a <= 0.0 { return; }

        let i = (y * self.width + x) * 4;
        let da = self.rgba[i + 3] as f32 / 255.0;
        let out_a = a + da * (1.0 - a);
        if out_a <= 0.0 { return; }

        let mix = |s: u8, d: u8| -> u8 {
            let v = (s as f32 * a + d as f32 * da * (1.0 - a)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };
        self.rgba[i] = mix(rgb.0, self.rgba[i]);
        self.rgba[i + 1] = mix(rgb.1, self.rgba[i + 1]);
        self.rgba[i + 2] = mix(rgb.2, self.rgba[i + 2]);
        self.rgba[i + 3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }

    /// Destination-out: remove `w` in [0,1] of the existing coverage.
    /// Alpha can only go down here.
    #[inline]
    pub fn erase(&mut self, x: usize, y: usize, w: f32) {
        let i = (y * self.width + x) * 4 + 3;
        let a = self.rgba[i] as f32;
        let next = (a * (1.0 - w.clamp(0.0, 1.0))).floor();
        self.rgba[i] = next.clamp(0.0, a) as u8;
    }
}

/// A position on the widget surface, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self { Self { x, y } }

    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One queued radial "clean" stamp. Consumed by the next flush.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ErasePoint {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

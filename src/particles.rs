// Particles: small brand-green glows that burst from the brush and fade.
// Software-drawn with additive blending on top of the composed frame.
// Runs every frame on its own; it never reads or writes the dirty overlay.

use crate::types::{FrameBuffer, Point};
use rand::Rng;
use std::f32::consts::TAU;

/// Per-frame constants are tuned for 60 fps; `tick(dt)` scales them.
const FRAMES_PER_SEC: f32 = 60.0;
const GRAVITY: f32 = 0.055;       // px/frame^2
const ALPHA_DECAY: f32 = 0.91;    // per frame
const SIZE_DECAY: f32 = 0.97;     // per frame
const UPWARD_BIAS: f32 = 0.4;     // px/frame subtracted from vy at spawn
/// Below this a particle is invisible and gets dropped.
pub const ALPHA_FLOOR: f32 = 0.015;

/// Brand green, #55A53B.
pub const BRAND_RGB: (u8, u8, u8) = (0x55, 0xA5, 0x3B);

/// One glow. Lifetime is implicit: alpha decays geometrically until it is
/// below [`ALPHA_FLOOR`].
#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f32, pub y: f32,      // position in pixels
    pub vx: f32, pub vy: f32,    // velocity in px/frame
    pub alpha: f32,              // (0, 1]
    pub size: f32,               // glow radius in px, > 0
}

impl Particle {
    #[inline] fn visible(&self) -> bool { self.alpha >= ALPHA_FLOOR }
}

pub struct ParticleEmitter {
    particles: Vec<Particle>,
    cap: usize,
}

impl ParticleEmitter {
    pub fn new(cap: usize) -> Self {
        Self { particles: Vec::with_capacity(cap), cap }
    }

    /// Burst `count` particles at `at` in random directions.
    /// When the set grows past the cap, the oldest are dropped first.
    pub fn spawn<R: Rng>(&mut self, at: Point, count: usize, rng: &mut R) {
        for _ in 0..count {
            let angle = rng.gen_range(0.0..TAU);
            let speed = rng.gen_range(0.7..2.9f32);
            self.particles.push(Particle {
                x: at.x,
                y: at.y,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed - UPWARD_BIAS,
                alpha: rng.gen_range(0.75..=1.0f32),
                size: rng.gen_range(2.0..5.5f32),
            });
        }
        if self.particles.len() > self.cap {
            let excess = self.particles.len() - self.cap;
            self.particles.drain(..excess);
        }
    }

    /// Advance all particles by `dt` seconds and drop the faded ones.
    pub fn tick(&mut self, dt: f32) {
        let frames = (dt * FRAMES_PER_SEC).max(0.0);
        let alpha_k = ALPHA_DECAY.powf(frames);
        let size_k = SIZE_DECAY.powf(frames);
        for p in &mut self.particles {
            p.x += p.vx * frames;
            p.y += p.vy * frames;
            p.vy += GRAVITY * frames;
            p.alpha *= alpha_k;
            p.size *= size_k;
        }
        self.particles.retain(Particle::visible);
    }

    /// Draw every particle as a soft additive disc: full color at the core,
    /// fading linearly to nothing at `size`.
    pub fn render(&self, fb: &mut FrameBuffer) {
        for p in &self.particles {
            draw_additive_glow(fb, p.x, p.y, p.size, BRAND_RGB, p.alpha);
        }
    }

    pub fn len(&self) -> usize { self.particles.len() }

    pub fn is_empty(&self) -> bool { self.particles.is_empty() }

    pub fn particles(&self) -> &[Particle] { &self.particles }

    pub fn clear(&mut self) { self.particles.clear(); }
}

/// Additive blend one RGB triplet at (x,y) with saturation to 255.
#[inline]
fn add_rgb_saturating(fb: &mut FrameBuffer, x: i32, y: i32, r: u8, g: u8, b: u8) {
    if x < 0 || y < 0 { return; }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height { return; }

    let idx = y * fb.width + x;
    let old = fb.pixels[idx];
    let nr = (((old >> 16) & 0xFF) as u16 + r as u16).min(255) as u32;
    let ng = (((old >> 8) & 0xFF) as u16 + g as u16).min(255) as u32;
    let nb = ((old & 0xFF) as u16 + b as u16).min(255) as u32;
    fb.pixels[idx] = (nr << 16) | (ng << 8) | nb;
}

/// Radial glow centered at (cx,cy); `strength` in [0,1] scales brightness.
fn draw_additive_glow(
    fb: &mut FrameBuffer,
    cx: f32, cy: f32,
    radius: f32,
    (base_r, base_g, base_b): (u8, u8, u8),
    strength: f32,
) {
    if radius <= 0.0 || strength <= 0.0 { return; }
    let x0 = (cx - radius).floor() as i32;
    let x1 = (cx + radius).ceil() as i32;
    let y0 = (cy - radius).floor() as i32;
    let y1 = (cy + radius).ceil() as i32;

    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let t = (dx * dx + dy * dy).sqrt() / radius;
            if t >= 1.0 { continue; }

            let w = (1.0 - t) * strength.min(1.0);
            let scale = |c: u8| (c as f32 * w).round().clamp(0.0, 255.0) as u8;
            add_rgb_saturating(fb, x, y, scale(base_r), scale(base_g), scale(base_b));
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/particles.rs"]
mod tests;

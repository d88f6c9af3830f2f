// The "Evidence" section: pointer handling that ties the reveal canvas and the
// particle emitter together, plus the small bits of UI state the HUD reads.
//
// Frame loop contract:
//   input handlers (down/move/up) -> queue stamps + spawn particles
//   frame()                       -> one flush + particle tick

use crate::config::RevealSettings;
use crate::particles::ParticleEmitter;
use crate::reveal::{PurityState, RevealCanvas};
use crate::types::Point;
use image::RgbaImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing::info;

/// What the status line under the purity counter says.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Awaiting,
    Cleaning,
    Certified,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Awaiting => "AWAITING INTERACTION",
            Status::Cleaning => "CLEANING IN PROGRESS...",
            Status::Certified => "CERTIFIED CLEAN - PROTOCOL COMPLETE",
        }
    }
}

pub struct EvidenceWidget {
    canvas: RevealCanvas,
    particles: ParticleEmitter,
    base: Option<RgbaImage>,
    rng: StdRng,
    pointer_down: bool,
    last_pos: Option<Point>,
    has_started: bool,
    // release happened with stamps still queued; resample after the flush
    resample_after_flush: bool,
}

impl EvidenceWidget {
    /// `base` is the decoded photo, or `None` if it could not be loaded.
    pub fn new(settings: RevealSettings, width: usize, height: usize, base: Option<RgbaImage>, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let particles = ParticleEmitter::new(settings.particle_cap);
        let canvas = RevealCanvas::new(settings, width, height, base.as_ref(), &mut rng);
        Self {
            canvas,
            particles,
            base,
            rng,
            pointer_down: false,
            last_pos: None,
            has_started: false,
            resample_after_flush: false,
        }
    }

    /// Window resized: rebuild the overlay from scratch. An in-progress
    /// stroke is abandoned and the percent starts over; a certified surface
    /// keeps its banner.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.pointer_down = false;
        self.last_pos = None;
        self.resample_after_flush = false;
        self.particles.clear();
        self.canvas.initialize(width, height, self.base.as_ref(), &mut self.rng);
        info!(width, height, "evidence surface resized");
    }

    pub fn pointer_down(&mut self, pos: Point) {
        self.pointer_down = true;
        self.has_started = true;
        self.last_pos = Some(pos);
        let s = self.canvas.settings();
        let radius = s.brush_radius * s.press_radius_scale;
        let count = s.particles_per_spawn;
        self.canvas.request_erase(pos, radius);
        self.particles.spawn(pos, count, &mut self.rng);
    }

    /// Pointer moved. Only scrubs while pressed; samples purity at most once
    /// per configured interval.
    pub fn pointer_move(&mut self, pos: Point, now: Instant) {
        if !self.pointer_down { return; }

        if let Some(last) = self.last_pos {
            let s = self.canvas.settings();
            let (radius, chance, count) = (s.brush_radius, s.move_spawn_chance, s.particles_per_spawn);
            self.canvas.request_stroke(last, pos, radius);
            if self.rng.gen_bool(chance) {
                self.particles.spawn(pos, count, &mut self.rng);
            }
        }
        self.last_pos = Some(pos);
        self.canvas.sample_purity_throttled(now);
    }

    /// Release (or the pointer left the surface): sample immediately,
    /// bypassing the throttle.
    pub fn pointer_up(&mut self, now: Instant) {
        let was_down = std::mem::replace(&mut self.pointer_down, false);
        self.last_pos = None;
        if was_down {
            self.canvas.sample_purity(now);
            self.resample_after_flush = self.canvas.pending() > 0;
        }
    }

    /// Once per animation frame: apply queued stamps, advance particles.
    pub fn frame(&mut self, dt: f32, now: Instant) {
        self.canvas.flush();
        if std::mem::take(&mut self.resample_after_flush) {
            self.canvas.sample_purity(now);
        }
        self.particles.tick(dt);
    }

    pub fn purity(&self) -> PurityState {
        self.canvas.purity()
    }

    pub fn status(&self) -> Status {
        let p = self.canvas.purity().percent;
        if p >= self.canvas.settings().completion_threshold {
            Status::Certified
        } else if p > 0 {
            Status::Cleaning
        } else {
            Status::Awaiting
        }
    }

    /// The completion banner stays up once shown.
    pub fn show_banner(&self) -> bool {
        self.canvas.purity().is_complete
    }

    /// The "scrub to reveal" hint disappears after the first press.
    pub fn show_hint(&self) -> bool {
        !self.has_started
    }

    pub fn is_pressed(&self) -> bool {
        self.pointer_down
    }

    pub fn resolution_label(&self) -> String {
        let (w, h) = self.canvas.size();
        format!("RES {w}x{h}")
    }

    pub fn canvas(&self) -> &RevealCanvas {
        &self.canvas
    }

    pub fn particles(&self) -> &ParticleEmitter {
        &self.particles
    }

    pub fn base(&self) -> Option<&RgbaImage> {
        self.base.as_ref()
    }
}

#[cfg(test)]
#[path = "../tests/unit/evidence.rs"]
mod tests;

// Scrub-to-reveal canvas engine.
//
// Owns the dirty overlay that sits on top of the clean photo. Pointer input
// only *queues* erase stamps; [`RevealCanvas::flush`] applies the whole queue
// once per frame. Purity (how much of the overlay is gone) is estimated by
// sampling every Nth pixel's alpha, and a one-way latch records completion.

use crate::config::RevealSettings;
use crate::grime;
use crate::types::{DirtyLayer, ErasePoint, Point};
use image::RgbaImage;
use rand::Rng;
use std::time::Instant;
use tracing::{debug, info};

/// Erase gradient stops: (offset from center as a fraction of radius, strength).
const ERASE_STOPS: [(f32, f32); 4] = [(0.0, 1.0), (0.40, 0.85), (0.75, 0.30), (1.0, 0.0)];

/// Strength of the erase stamp at normalized distance `t` (0 = center, 1 = rim).
pub fn erase_falloff(t: f32) -> f32 {
    if t <= 0.0 { return ERASE_STOPS[0].1; }
    if t >= 1.0 { return 0.0; }
    for pair in ERASE_STOPS.windows(2) {
        let (t0, v0) = pair[0];
        let (t1, v1) = pair[1];
        if t <= t1 {
            let k = (t - t0) / (t1 - t0);
            return v0 + (v1 - v0) * k;
        }
    }
    0.0
}

/// Split a pointer segment into evenly spaced stamp centers, both ends included.
/// `steps = max(1, floor(dist / spacing))`, so a zero-length move still yields
/// two stamps at the same spot. Non-finite input yields no stamps.
pub fn interpolate_stroke(from: Point, to: Point, spacing: f32) -> Vec<Point> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let dist = from.distance(to);
    let raw = (dist / spacing).floor();
    if !raw.is_finite() { return Vec::new(); }
    let steps = (raw as usize).max(1);
    (0..=steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            Point::new(from.x + dx * t, from.y + dy * t)
        })
        .collect()
}

/// Pending erase stamps. Producers push from input handlers; the frame loop
/// is the single consumer and drains everything at once.
#[derive(Default)]
pub struct EraseQueue {
    pending: Vec<ErasePoint>,
}

impl EraseQueue {
    pub fn push(&mut self, point: ErasePoint) {
        self.pending.push(point);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, ErasePoint> {
        self.pending.drain(..)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

/// Percent clean plus the completion latch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PurityState {
    pub percent: u8,
    pub is_complete: bool,
}

pub struct RevealCanvas {
    settings: RevealSettings,
    layer: DirtyLayer,
    queue: EraseQueue,
    purity: PurityState,
    last_sample: Option<Instant>,
    used_fallback: bool,
}

impl RevealCanvas {
    /// Allocate and paint the dirty overlay. `base` is the photo to dirty up;
    /// `None` means it failed to load and the flat fallback is used.
    pub fn new<R: Rng>(
        settings: RevealSettings,
        width: usize,
        height: usize,
        base: Option<&RgbaImage>,
        rng: &mut R,
    ) -> Self {
        let mut canvas = Self {
            settings,
            layer: DirtyLayer::new(0, 0),
            queue: EraseQueue::default(),
            purity: PurityState::default(),
            last_sample: None,
            used_fallback: false,
        };
        canvas.initialize(width, height, base, rng);
        canvas
    }

    /// (Re)build the overlay at a new size. Queued stamps, the percent and the
    /// sampling clock start over; the completion latch survives.
    pub fn initialize<R: Rng>(
        &mut self,
        width: usize,
        height: usize,
        base: Option<&RgbaImage>,
        rng: &mut R,
    ) {
        self.layer = grime::render_dirty_layer(width, height, base, rng);
        self.queue.clear();
        self.purity.percent = 0;
        self.last_sample = None;
        self.used_fallback = base.is_none();
        info!(width, height, fallback = self.used_fallback, "dirty layer initialized");
    }

    /// Queue one stamp. The raster is untouched until the next [`flush`](Self::flush).
    pub fn request_erase(&mut self, point: Point, radius: f32) {
        self.queue.push(ErasePoint { x: point.x, y: point.y, radius });
    }

    /// Queue a gap-free stroke from `from` to `to` at the configured spacing.
    /// Returns how many stamps were queued.
    pub fn request_stroke(&mut self, from: Point, to: Point, radius: f32) -> usize {
        let points = interpolate_stroke(from, to, self.settings.stroke_spacing);
        let n = points.len();
        for p in points {
            self.request_erase(p, radius);
        }
        n
    }

    /// Apply every queued stamp (destination-out radial gradient) and empty the
    /// queue. Call at most once per frame. Returns the number of stamps applied.
    pub fn flush(&mut self) -> usize {
        if self.queue.is_empty() { return 0; }
        let mut applied = 0;
        let Self { queue, layer, .. } = self;
        for ep in queue.drain() {
            stamp_erase(layer, ep);
            applied += 1;
        }
        debug!(applied, "erase queue flushed");
        applied
    }

    /// Sample purity now, regardless of the throttle.
    pub fn sample_purity(&mut self, now: Instant) -> PurityState {
        self.last_sample = Some(now);
        let percent = sampled_clean_percent(
            &self.layer,
            self.settings.sample_stride,
            self.settings.opacity_cutoff,
        );
        self.purity.percent = percent;
        if !self.purity.is_complete && percent >= self.settings.completion_threshold {
            self.purity.is_complete = true;
            info!(percent, "reveal complete");
        }
        self.purity
    }

    /// Sample only if the minimum interval has passed since the last sample.
    pub fn sample_purity_throttled(&mut self, now: Instant) -> Option<PurityState> {
        let due = match self.last_sample {
            None => true,
            Some(prev) => now.saturating_duration_since(prev) > self.settings.purity_interval(),
        };
        due.then(|| self.sample_purity(now))
    }

    pub fn purity(&self) -> PurityState {
        self.purity
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn layer(&self) -> &DirtyLayer {
        &self.layer
    }

    pub fn size(&self) -> (usize, usize) {
        (self.layer.width, self.layer.height)
    }

    pub fn used_fallback(&self) -> bool {
        self.used_fallback
    }

    pub fn settings(&self) -> &RevealSettings {
        &self.settings
    }
}

/// Destination-out of one radial gradient stamp.
fn stamp_erase(layer: &mut DirtyLayer, ep: ErasePoint) {
    let r = ep.radius;
    if !(r > 0.0) { return; }
    let w = layer.width as i32;
    let h = layer.height as i32;
    let x0 = ((ep.x - r).floor() as i32).max(0);
    let x1 = ((ep.x + r).ceil() as i32).min(w - 1);
    let y0 = ((ep.y - r).floor() as i32).max(0);
    let y1 = ((ep.y + r).ceil() as i32).min(h - 1);

    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 + 0.5 - ep.x;
            let dy = y as f32 + 0.5 - ep.y;
            let t = (dx * dx + dy * dy).sqrt() / r;
            if t >= 1.0 { continue; }
            layer.erase(x as usize, y as usize, erase_falloff(t));
        }
    }
}

/// `round(100 * clean / sampled)` over every `stride`-th pixel.
pub fn sampled_clean_percent(layer: &DirtyLayer, stride: usize, cutoff: u8) -> u8 {
    let stride = stride.max(1);
    let mut clean = 0usize;
    let mut total = 0usize;
    for px in layer.rgba.chunks_exact(4).step_by(stride) {
        if px[3] < cutoff { clean += 1; }
        total += 1;
    }
    if total == 0 { return 0; }
    ((clean as f64 / total as f64) * 100.0).round() as u8
}

#[cfg(test)]
#[path = "../tests/unit/reveal.rs"]
mod tests;

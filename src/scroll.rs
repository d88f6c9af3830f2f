// Scroll-progress mapping.
//
// A pinned section turns page scroll into one progress scalar in `[0, 1]`.
// Every animated property reads that scalar through its own
// [`BreakpointTable`]: piecewise-linear between breakpoints, clamped to the
// first/last value outside the table.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// One `(progress, value)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub progress: f32,
    pub value: f32,
}

/// Breakpoints sorted by strictly increasing `progress`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Breakpoint>", into = "Vec<Breakpoint>")]
pub struct BreakpointTable {
    points: Vec<Breakpoint>,
}

impl BreakpointTable {
    pub fn new(points: Vec<Breakpoint>) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::breakpoints("table needs at least one breakpoint"));
        }
        if points.iter().any(|b| !b.progress.is_finite() || !b.value.is_finite()) {
            return Err(Error::breakpoints("breakpoints must be finite"));
        }
        if !points.windows(2).all(|w| w[0].progress < w[1].progress) {
            return Err(Error::breakpoints("progress must be strictly increasing"));
        }
        Ok(Self { points })
    }

    /// Build from `(progress, value)` pairs.
    pub fn from_pairs(pairs: &[(f32, f32)]) -> Result<Self> {
        Self::new(
            pairs.iter().map(|&(progress, value)| Breakpoint { progress, value }).collect(),
        )
    }

    /// Two-point ramp: `from` at `start`, `to` at `end`, clamped outside.
    pub fn ramp(start: f32, end: f32, from: f32, to: f32) -> Result<Self> {
        Self::from_pairs(&[(start, from), (end, to)])
    }

    pub fn points(&self) -> &[Breakpoint] {
        &self.points
    }

    /// Interpolated value at `progress`. NaN maps to the first value.
    pub fn sample(&self, progress: f32) -> f32 {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        if progress.is_nan() || progress <= first.progress { return first.value; }
        if progress >= last.progress { return last.value; }

        let idx = self.points.partition_point(|b| b.progress <= progress);
        let a = self.points[idx - 1];
        let b = self.points[idx];
        let t = (progress - a.progress) / (b.progress - a.progress);
        a.value + (b.value - a.value) * t
    }
}

impl TryFrom<Vec<Breakpoint>> for BreakpointTable {
    type Error = Error;

    fn try_from(points: Vec<Breakpoint>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<BreakpointTable> for Vec<Breakpoint> {
    fn from(table: BreakpointTable) -> Self {
        table.points
    }
}

/// `table` sampled at `progress`.
pub fn map(progress: f32, table: &BreakpointTable) -> f32 {
    table.sample(progress)
}

/// Named tracks that all read the same progress scalar.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScrollTimeline {
    tracks: Vec<(String, BreakpointTable)>,
}

impl ScrollTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_track(mut self, name: impl Into<String>, table: BreakpointTable) -> Self {
        self.tracks.push((name.into(), table));
        self
    }

    pub fn track(&self, name: &str) -> Option<&BreakpointTable> {
        self.tracks.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    /// One value per track, in insertion order.
    pub fn map(&self, progress: f32) -> Vec<(&str, f32)> {
        self.tracks.iter().map(|(n, t)| (n.as_str(), t.sample(progress))).collect()
    }

    /// Value of a single track; `None` if no such track.
    pub fn value(&self, name: &str, progress: f32) -> Option<f32> {
        self.track(name).map(|t| t.sample(progress))
    }
}

/// How a section's scroll offset is normalized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollRange {
    /// 0 when the section top hits the viewport top, 1 when its bottom hits
    /// the viewport bottom. Used by pinned sections.
    Pinned,
    /// 0 when the section top hits the viewport top, 1 when its bottom hits
    /// the viewport top. Used by the hero as it scrolls away.
    Exit,
}

impl ScrollRange {
    /// Progress in `[0, 1]` for a page scrolled to `scroll_y`.
    pub fn progress(self, scroll_y: f32, section_top: f32, section_height: f32, viewport_height: f32) -> f32 {
        let span = match self {
            Self::Pinned => section_height - viewport_height,
            Self::Exit => section_height,
        };
        if !(span > 0.0) {
            return if scroll_y >= section_top { 1.0 } else { 0.0 };
        }
        ((scroll_y - section_top) / span).clamp(0.0, 1.0)
    }
}

/// One stage's slice of the progress range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageWindow {
    /// Fill starts here (0%).
    pub hold_start: f32,
    /// Fill reaches 100% here; the snap to the next stage begins.
    pub hold_end: f32,
    /// Snap finishes here; equals the next stage's `hold_start`.
    pub snap_end: f32,
}

/// Alternating hold/snap layout for a pinned section with `stages` cards.
///
/// Each stage owns `1 / stages` of the range: the first `hold / (hold + snap)`
/// of it holds the card still while its fill runs 0->100%, the rest slides to
/// the next card. The last stage has nothing to snap to, so it holds to 1.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHoldSnap", into = "RawHoldSnap")]
pub struct HoldSnapPlan {
    stages: usize,
    hold_ratio: f32,
    snap_ratio: f32,
}

// Wire form; only becomes a plan through `HoldSnapPlan::new`.
#[derive(Clone, Copy, Serialize, Deserialize)]
struct RawHoldSnap {
    stages: usize,
    hold_ratio: f32,
    snap_ratio: f32,
}

impl TryFrom<RawHoldSnap> for HoldSnapPlan {
    type Error = Error;

    fn try_from(raw: RawHoldSnap) -> Result<Self> {
        Self::new(raw.stages, raw.hold_ratio, raw.snap_ratio)
    }
}

impl From<HoldSnapPlan> for RawHoldSnap {
    fn from(plan: HoldSnapPlan) -> Self {
        Self { stages: plan.stages, hold_ratio: plan.hold_ratio, snap_ratio: plan.snap_ratio }
    }
}

impl HoldSnapPlan {
    pub fn new(stages: usize, hold_ratio: f32, snap_ratio: f32) -> Result<Self> {
        if stages == 0 {
            return Err(Error::breakpoints("hold/snap plan needs at least one stage"));
        }
        if !(hold_ratio > 0.0) || !(snap_ratio > 0.0) {
            return Err(Error::breakpoints("hold and snap ratios must be > 0"));
        }
        Ok(Self { stages, hold_ratio, snap_ratio })
    }

    pub fn stages(&self) -> usize {
        self.stages
    }

    pub fn hold_ratio(&self) -> f32 {
        self.hold_ratio
    }

    pub fn snap_ratio(&self) -> f32 {
        self.snap_ratio
    }

    pub fn windows(&self) -> Vec<StageWindow> {
        let slot = 1.0 / self.stages as f32;
        let hold = slot * self.hold_ratio / (self.hold_ratio + self.snap_ratio);
        (0..self.stages)
            .map(|i| {
                let start = slot * i as f32;
                let last = i + 1 == self.stages;
                StageWindow {
                    hold_start: start,
                    hold_end: if last { 1.0 } else { start + hold },
                    snap_end: if last { 1.0 } else { slot * (i + 1) as f32 },
                }
            })
            .collect()
    }

    /// Rail offset: stage `i` sits at `i * step` (e.g. `-100 / stages` percent
    /// of the rail width) and only moves during snaps.
    pub fn offset_table(&self, step: f32) -> Result<BreakpointTable> {
        let mut pairs: Vec<(f32, f32)> = Vec::with_capacity(self.stages * 2);
        for (i, w) in self.windows().iter().enumerate() {
            let v = step * i as f32;
            pairs.push((w.hold_start, v));
            pairs.push((w.hold_end, v));
        }
        BreakpointTable::from_pairs(&pairs)
    }

    /// 0 -> 100 (percent) across stage `stage`'s hold window.
    pub fn fill_table(&self, stage: usize) -> Result<BreakpointTable> {
        let w = self
            .windows()
            .get(stage)
            .copied()
            .ok_or_else(|| Error::breakpoints(format!("stage {stage} out of range")))?;
        BreakpointTable::ramp(w.hold_start, w.hold_end, 0.0, 100.0)
    }

    /// Index of the stage whose slot contains `progress`.
    pub fn stage_at(&self, progress: f32) -> usize {
        let p = progress.clamp(0.0, 1.0);
        ((p * self.stages as f32) as usize).min(self.stages - 1)
    }

    /// `offset` track plus `fill{i}` tracks in one timeline.
    pub fn timeline(&self, step: f32) -> Result<ScrollTimeline> {
        let mut tl = ScrollTimeline::new().with_track("offset", self.offset_table(step)?);
        for i in 0..self.stages {
            tl = tl.with_track(format!("fill{i}"), self.fill_table(i)?);
        }
        Ok(tl)
    }
}

/// Hero video as the page scrolls away: blur 0->12 px, opacity 1->0.
pub fn hero_timeline() -> Result<ScrollTimeline> {
    Ok(ScrollTimeline::new()
        .with_track("blur", BreakpointTable::ramp(0.0, 0.65, 0.0, 12.0)?)
        .with_track("opacity", BreakpointTable::ramp(0.0, 0.75, 1.0, 0.0)?))
}

/// Character-by-character color reveal scrubbed by scroll.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextReveal {
    /// Delay between consecutive characters, in timeline units.
    pub stagger: f32,
    /// How long one character takes to reveal.
    pub duration: f32,
}

impl Default for TextReveal {
    fn default() -> Self {
        Self { stagger: 0.02, duration: 0.5 }
    }
}

impl TextReveal {
    /// Reveal fraction (ease-out-quad) of character `index` of `count`.
    pub fn char_progress(&self, progress: f32, index: usize, count: usize) -> f32 {
        if count == 0 { return 0.0; }
        let total = self.duration + self.stagger * (count.saturating_sub(1)) as f32;
        let t = progress.clamp(0.0, 1.0) * total;
        let start = self.stagger * index as f32;
        let local = if self.duration > 0.0 {
            ((t - start) / self.duration).clamp(0.0, 1.0)
        } else if t >= start {
            1.0
        } else {
            0.0
        };
        1.0 - (1.0 - local) * (1.0 - local)
    }

    /// All characters' fractions.
    pub fn frame(&self, progress: f32, count: usize) -> Vec<f32> {
        (0..count).map(|i| self.char_progress(progress, i, count)).collect()
    }
}

#[cfg(test)]
#[path = "../tests/unit/scroll.rs"]
mod tests;

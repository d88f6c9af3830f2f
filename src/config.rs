// Site + widget configuration.
// Defaults match the live site; a JSON file can override any field and a few
// environment variables override the file (secrets never live in the file).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const ENV_API_KEY: &str = "RESEND_API_KEY";
pub const ENV_BASE_URL: &str = "SITE_BASE_URL";
pub const ENV_NOTIFY_EMAIL: &str = "NOTIFY_EMAIL";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Inbox that receives every booking notification.
    pub notify_email: String,
    /// Public site URL, used for links and the logo in the confirmation mail.
    pub base_url: String,
    pub notification_from: String,
    pub confirmation_from: String,
    /// Resend "send email" endpoint.
    pub resend_endpoint: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub reveal: RevealSettings,
    pub process: ProcessSettings,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            notify_email: "myrakyle2580@gmail.com".into(),
            base_url: "https://myrakelehercleaning.com".into(),
            notification_from: "Myra Keleher Booking <onboarding@resend.dev>".into(),
            confirmation_from: "Myra Keleher <onboarding@resend.dev>".into(),
            resend_endpoint: "https://api.resend.com/emails".into(),
            api_key: None,
            reveal: RevealSettings::default(),
            process: ProcessSettings::default(),
        }
    }
}

impl SiteConfig {
    /// Defaults, then the JSON file (if any), then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match path {
            Some(p) => {
                let text = std::fs::read_to_string(p)
                    .map_err(|e| Error::config(format!("read {}: {e}", p.display())))?;
                Self::from_json(&text)?
            }
            None => Self::default(),
        };
        cfg.apply_env(|k| std::env::var(k).ok());
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::config(format!("parse: {e}")))
    }

    /// Override from an env-like lookup. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());
        if let Some(v) = get(ENV_API_KEY) { self.api_key = Some(v); }
        if let Some(v) = get(ENV_BASE_URL) { self.base_url = v; }
        if let Some(v) = get(ENV_NOTIFY_EMAIL) { self.notify_email = v; }
    }

    pub fn validate(&self) -> Result<()> {
        self.reveal.validate()?;
        self.process.validate()?;
        if self.notify_email.trim().is_empty() {
            return Err(Error::config("notify_email must not be empty"));
        }
        Ok(())
    }
}

/// Tunables for the scrub-to-reveal widget.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealSettings {
    pub brush_radius: f32,
    /// Pointer-down stamps are this much bigger than stroke stamps.
    pub press_radius_scale: f32,
    pub particles_per_spawn: usize,
    /// Chance of a particle burst per pointer-move while pressed.
    pub move_spawn_chance: f64,
    pub purity_interval_ms: u64,
    /// Check every Nth pixel when sampling purity.
    pub sample_stride: usize,
    /// Percent at which the completion latch trips.
    pub completion_threshold: u8,
    /// Max distance between interpolated stamps along a stroke.
    pub stroke_spacing: f32,
    pub particle_cap: usize,
    /// Sampled alpha below this counts as clean.
    pub opacity_cutoff: u8,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            brush_radius: 100.0,
            press_radius_scale: 1.15,
            particles_per_spawn: 6,
            move_spawn_chance: 0.35,
            purity_interval_ms: 400,
            sample_stride: 12,
            completion_threshold: 82,
            stroke_spacing: 12.0,
            particle_cap: 180,
            opacity_cutoff: 128,
        }
    }
}

impl RevealSettings {
    pub fn purity_interval(&self) -> Duration {
        Duration::from_millis(self.purity_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.brush_radius > 0.0) {
            return Err(Error::config("reveal.brush_radius must be > 0"));
        }
        if !(self.stroke_spacing > 0.0) {
            return Err(Error::config("reveal.stroke_spacing must be > 0"));
        }
        if self.sample_stride == 0 {
            return Err(Error::config("reveal.sample_stride must be >= 1"));
        }
        if self.completion_threshold > 100 {
            return Err(Error::config("reveal.completion_threshold must be <= 100"));
        }
        if !(0.0..=1.0).contains(&self.move_spawn_chance) {
            return Err(Error::config("reveal.move_spawn_chance must be within [0, 1]"));
        }
        Ok(())
    }
}

/// Shape of the pinned, horizontally scrolling process section.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessSettings {
    pub stages: usize,
    pub hold_ratio: f32,
    pub snap_ratio: f32,
    /// Section height in viewport heights (the rail scrolls across this).
    pub viewport_heights: f32,
}

impl Default for ProcessSettings {
    fn default() -> Self {
        Self { stages: 3, hold_ratio: 4.0, snap_ratio: 1.0, viewport_heights: 3.0 }
    }
}

impl ProcessSettings {
    pub fn validate(&self) -> Result<()> {
        if self.stages == 0 {
            return Err(Error::config("process.stages must be >= 1"));
        }
        if !(self.hold_ratio > 0.0) || !(self.snap_ratio > 0.0) {
            return Err(Error::config("process.hold_ratio and process.snap_ratio must be > 0"));
        }
        if !(self.viewport_heights > 1.0) {
            return Err(Error::config("process.viewport_heights must be > 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;

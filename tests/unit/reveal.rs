use super::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

fn canvas(w: usize, h: usize) -> RevealCanvas {
    let mut rng = StdRng::seed_from_u64(11);
    RevealCanvas::new(RevealSettings::default(), w, h, None, &mut rng)
}

#[test]
fn stroke_of_100px_at_spacing_12_yields_9_stamps() {
    let pts = interpolate_stroke(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 12.0);
    assert_eq!(pts.len(), 9);
    assert_eq!(pts[0], Point::new(0.0, 0.0));
    assert_eq!(pts[8], Point::new(100.0, 0.0));
}

#[test]
fn stationary_stroke_still_stamps() {
    let p = Point::new(5.0, 5.0);
    let pts = interpolate_stroke(p, p, 12.0);
    assert_eq!(pts, vec![p, p]);
}

#[test]
fn falloff_matches_gradient_stops() {
    assert_eq!(erase_falloff(0.0), 1.0);
    assert!((erase_falloff(0.40) - 0.85).abs() < 1e-6);
    assert!((erase_falloff(0.75) - 0.30).abs() < 1e-6);
    assert_eq!(erase_falloff(1.0), 0.0);
    assert!(erase_falloff(0.2) < 1.0 && erase_falloff(0.2) > 0.85);
}

#[test]
fn request_erase_does_not_touch_the_raster_until_flush() {
    let mut c = canvas(64, 64);
    let before = c.layer().rgba.clone();
    c.request_erase(Point::new(32.0, 32.0), 10.0);
    c.request_erase(Point::new(33.0, 32.0), 10.0);
    assert_eq!(c.pending(), 2);
    assert_eq!(c.layer().rgba, before);

    assert_eq!(c.flush(), 2);
    assert_eq!(c.pending(), 0);
    assert_eq!(c.layer().alpha_at(32, 32), 0);
    assert_eq!(c.flush(), 0);
}

#[test]
fn alpha_never_increases_under_erasing() {
    let mut c = canvas(48, 48);
    let mut prev = c.layer().rgba.clone();
    for i in 0..10 {
        c.request_erase(Point::new(4.0 * i as f32, 20.0), 9.0);
        c.flush();
        let now = &c.layer().rgba;
        for (a, b) in prev.chunks_exact(4).zip(now.chunks_exact(4)) {
            assert!(b[3] <= a[3]);
        }
        prev = now.clone();
    }
}

#[test]
fn purity_is_zero_on_a_fresh_layer_and_100_when_scrubbed_out() {
    let mut c = canvas(40, 40);
    let t0 = Instant::now();
    assert_eq!(c.sample_purity(t0).percent, 0);

    for y in (0..40).step_by(4) {
        c.request_stroke(Point::new(0.0, y as f32), Point::new(40.0, y as f32), 20.0);
    }
    c.flush();
    let p = c.sample_purity(t0);
    assert_eq!(p.percent, 100);
    assert!(p.is_complete);
}

#[test]
fn throttled_sampling_respects_the_interval() {
    let mut c = canvas(32, 32);
    let t0 = Instant::now();
    assert!(c.sample_purity_throttled(t0).is_some());
    assert!(c.sample_purity_throttled(t0 + Duration::from_millis(100)).is_none());
    assert!(c.sample_purity_throttled(t0 + Duration::from_millis(401)).is_some());
}

#[test]
fn completion_latch_survives_a_lower_reading() {
    let mut c = canvas(32, 32);
    let t0 = Instant::now();
    c.request_stroke(Point::new(0.0, 16.0), Point::new(32.0, 16.0), 64.0);
    c.flush();
    assert!(c.sample_purity(t0).is_complete);

    // a stricter cutoff makes the next reading lower; the latch holds
    c.settings.opacity_cutoff = 0;
    let p = c.sample_purity(t0);
    assert_eq!(p.percent, 0);
    assert!(p.is_complete);
}

#[test]
fn reinitialize_discards_queue_and_progress() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut c = canvas(32, 32);
    c.request_stroke(Point::new(0.0, 16.0), Point::new(32.0, 16.0), 64.0);
    c.flush();
    c.sample_purity(Instant::now());
    c.request_erase(Point::new(1.0, 1.0), 5.0);

    c.initialize(50, 20, None, &mut rng);
    assert_eq!(c.size(), (50, 20));
    assert_eq!(c.pending(), 0);
    assert_eq!(c.purity(), PurityState { percent: 0, is_complete: true });
    assert!(c.used_fallback());
}

#[test]
fn resampling_inside_the_interval_reports_the_same_percent() {
    let mut c = canvas(64, 64);
    let t0 = Instant::now();
    c.request_stroke(Point::new(0.0, 32.0), Point::new(30.0, 32.0), 12.0);
    c.flush();
    let first = c.sample_purity(t0).percent;
    assert!(first > 0 && first < 100);

    assert!(c.sample_purity_throttled(t0 + Duration::from_millis(100)).is_none());
    assert_eq!(c.purity().percent, first);
    assert_eq!(c.sample_purity(t0 + Duration::from_millis(100)).percent, first);
}

#[test]
fn sampled_transparency_never_goes_down() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut c = canvas(80, 60);
    let mut prev = sampled_clean_percent(c.layer(), 12, 128);
    for _ in 0..40 {
        let from = Point::new(rng.gen_range(0.0..80.0), rng.gen_range(0.0..60.0));
        let to = Point::new(rng.gen_range(0.0..80.0), rng.gen_range(0.0..60.0));
        c.request_stroke(from, to, rng.gen_range(2.0..20.0));
        c.flush();
        let now = sampled_clean_percent(c.layer(), 12, 128);
        assert!(now >= prev, "{now} < {prev}");
        prev = now;
    }
}

#[test]
fn non_finite_strokes_queue_nothing() {
    let p = Point::new(1.0, 1.0);
    assert!(interpolate_stroke(p, Point::new(f32::INFINITY, 0.0), 12.0).is_empty());
    assert!(interpolate_stroke(p, Point::new(f32::NAN, 0.0), 12.0).is_empty());

    let mut c = canvas(16, 16);
    assert_eq!(c.request_stroke(p, Point::new(f32::NAN, 2.0), 5.0), 0);
    assert_eq!(c.pending(), 0);
}

#[test]
fn sampling_uses_the_stride() {
    let mut layer = DirtyLayer::new(10, 1);
    for px in layer.rgba.chunks_exact_mut(4) { px[3] = 255; }
    // pixels 0 and 5 are sampled at stride 5; clear only pixel 5
    layer.rgba[5 * 4 + 3] = 0;
    layer.rgba[3 * 4 + 3] = 0; // not sampled
    assert_eq!(sampled_clean_percent(&layer, 5, 128), 50);
    assert_eq!(sampled_clean_percent(&DirtyLayer::new(0, 0), 5, 128), 0);
}

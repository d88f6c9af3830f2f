// Builds the "before" texture the visitor scrubs away.
// Layering, bottom to top:
//   1. the base photo, cover-fitted and pushed through a dingy filter
//      (or a flat dark fill when the photo is unavailable)
//   2. per-pixel grain
//   3. dust motes (tiny translucent discs)
//   4. smear streaks (thin translucent lines)
//   5. a vignette that darkens the edges

use crate::error::{Error, Result};
use crate::types::DirtyLayer;
use image::imageops::{self, FilterType};
use image::RgbaImage;
use rand::Rng;
use std::f32::consts::PI;
use std::path::Path;

const GRAIN_AMPLITUDE: f32 = 55.0;
const DUST_COUNT: usize = 1200;
const SMEAR_COUNT: usize = 60;
const FALLBACK_RGB: (u8, u8, u8) = (35, 30, 22);
const FALLBACK_ALPHA: f32 = 0.93;
const VIGNETTE_INNER: f32 = 0.28; // fraction of height, alpha 0
const VIGNETTE_OUTER: f32 = 0.85; // fraction of height, alpha VIGNETTE_ALPHA
const VIGNETTE_ALPHA: f32 = 0.55;

/// Decode the base photo from disk.
pub fn load_base_image(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path)
        .map_err(|e| Error::ImageLoad(format!("{}: {e}", path.display())))?;
    let rgba = img.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(Error::ImageLoad(format!("{}: empty image", path.display())));
    }
    Ok(rgba)
}

/// Object-cover maths: where to draw an `iw x ih` image so it covers `cw x ch`.
/// Returns (x, y, w, h); x/y are <= 0 (the overflow is cropped equally).
pub fn cover_rect(iw: f32, ih: f32, cw: f32, ch: f32) -> (f32, f32, f32, f32) {
    let ia = iw / ih;
    let ca = cw / ch;
    if ia > ca {
        let sh = ch;
        let sw = ch * ia;
        (-(sw - cw) / 2.0, 0.0, sw, sh)
    } else {
        let sw = cw;
        let sh = cw / ia;
        (0.0, -(sh - ch) / 2.0, sw, sh)
    }
}

/// Scale + center-crop `img` so it exactly fills `width x height`.
pub fn cover_fit(img: &RgbaImage, width: usize, height: usize) -> RgbaImage {
    let (w, h) = (width as u32, height as u32);
    if w == 0 || h == 0 {
        return RgbaImage::new(w, h);
    }
    let (sx, sy, sw, sh) =
        cover_rect(img.width() as f32, img.height() as f32, w as f32, h as f32);
    let rw = (sw.ceil() as u32).max(w);
    let rh = (sh.ceil() as u32).max(h);
    let scaled = imageops::resize(img, rw, rh, FilterType::Triangle);
    let ox = ((-sx).round() as u32).min(rw - w);
    let oy = ((-sy).round() as u32).min(rh - h);
    imageops::crop_imm(&scaled, ox, oy, w, h).to_image()
}

/// `sepia(30%) brightness(65%) grayscale(25%) contrast(1.25)`, applied in order.
pub fn dirty_filter(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (mut r, mut g, mut b) = (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);

    // sepia(0.3)
    let k = 1.0 - 0.3;
    let sr = (0.393 + 0.607 * k) * r + (0.769 - 0.769 * k) * g + (0.189 - 0.189 * k) * b;
    let sg = (0.349 - 0.349 * k) * r + (0.686 + 0.314 * k) * g + (0.168 - 0.168 * k) * b;
    let sb = (0.272 - 0.272 * k) * r + (0.534 - 0.534 * k) * g + (0.131 + 0.869 * k) * b;
    (r, g, b) = (sr.min(1.0), sg.min(1.0), sb.min(1.0));

    // brightness(0.65)
    (r, g, b) = (r * 0.65, g * 0.65, b * 0.65);

    // grayscale(0.25)
    let k = 1.0 - 0.25;
    let gr = (0.2126 + 0.7874 * k) * r + (0.7152 - 0.7152 * k) * g + (0.0722 - 0.0722 * k) * b;
    let gg = (0.2126 - 0.2126 * k) * r + (0.7152 + 0.2848 * k) * g + (0.0722 - 0.0722 * k) * b;
    let gb = (0.2126 - 0.2126 * k) * r + (0.7152 - 0.7152 * k) * g + (0.0722 + 0.9278 * k) * b;
    (r, g, b) = (gr, gg, gb);

    // contrast(1.25)
    let c = |v: f32| ((v - 0.5) * 1.25 + 0.5).clamp(0.0, 1.0);
    let to8 = |v: f32| (c(v) * 255.0).round() as u8;
    (to8(r), to8(g), to8(b))
}

/// Render a fresh dirty layer. Falls back to a flat dark fill when `base` is
/// `None`; the grime pass runs either way so the surface is never blank.
pub fn render_dirty_layer<R: Rng>(
    width: usize,
    height: usize,
    base: Option<&RgbaImage>,
    rng: &mut R,
) -> DirtyLayer {
    let mut layer = DirtyLayer::new(width, height);
    match base {
        Some(img) => draw_filtered_base(&mut layer, img),
        None => fill_fallback(&mut layer),
    }
    paint_grime(&mut layer, rng);
    layer
}

fn draw_filtered_base(layer: &mut DirtyLayer, img: &RgbaImage) {
    let fitted = cover_fit(img, layer.width, layer.height);
    for (px, out) in fitted.pixels().zip(layer.rgba.chunks_exact_mut(4)) {
        let (r, g, b) = dirty_filter(px[0], px[1], px[2]);
        out.copy_from_slice(&[r, g, b, px[3]]);
    }
}

pub fn fill_fallback(layer: &mut DirtyLayer) {
    let a = (FALLBACK_ALPHA * 255.0).round() as u8;
    let (r, g, b) = FALLBACK_RGB;
    for px in layer.rgba.chunks_exact_mut(4) {
        px.copy_from_slice(&[r, g, b, a]);
    }
}

/// Grain, dust, smears and vignette on top of whatever is already in `layer`.
pub fn paint_grime<R: Rng>(layer: &mut DirtyLayer, rng: &mut R) {
    let (w, h) = (layer.width as f32, layer.height as f32);
    if layer.width == 0 || layer.height == 0 { return; }

    // Grain: the same offset on r, g, b keeps it colorless.
    for px in layer.rgba.chunks_exact_mut(4) {
        let n = (rng.r#gen::<f32>() - 0.5) * GRAIN_AMPLITUDE;
        for c in &mut px[..3] {
            *c = (*c as f32 + n).round().clamp(0.0, 255.0) as u8;
        }
    }

    for _ in 0..DUST_COUNT {
        let rgb = (
            rng.gen_range(110.0..170.0f32) as u8,
            rng.gen_range(90.0..130.0f32) as u8,
            rng.gen_range(50.0..80.0f32) as u8,
        );
        let alpha = rng.gen_range(0.04..0.16f32);
        let (cx, cy) = (rng.r#gen::<f32>() * w, rng.r#gen::<f32>() * h);
        let radius = rng.r#gen::<f32>() * 2.2;
        fill_disc(layer, cx, cy, radius, rgb, alpha);
    }

    for _ in 0..SMEAR_COUNT {
        let (x, y) = (rng.r#gen::<f32>() * w, rng.r#gen::<f32>() * h);
        let len = rng.gen_range(20.0..140.0f32);
        let angle = rng.r#gen::<f32>() * PI;
        let alpha = rng.gen_range(0.03..0.10f32);
        let width = rng.gen_range(1.0..4.0f32);
        let (x1, y1) = (x + angle.cos() * len, y + angle.sin() * len);
        stroke_line(layer, (x, y), (x1, y1), width, (80, 60, 30), alpha);
    }

    vignette(layer);
}

/// Anti-aliased filled circle, source-over.
fn fill_disc(layer: &mut DirtyLayer, cx: f32, cy: f32, radius: f32, rgb: (u8, u8, u8), alpha: f32) {
    if radius <= 0.0 { return; }
    let x0 = (cx - radius - 1.0).floor() as i32;
    let x1 = (cx + radius + 1.0).ceil() as i32;
    let y0 = (cy - radius - 1.0).floor() as i32;
    let y1 = (cy + radius + 1.0).ceil() as i32;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let d = (dx * dx + dy * dy).sqrt();
            let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
            if coverage > 0.0 {
                layer.blend_over(x, y, rgb, alpha * coverage);
            }
        }
    }
}

/// Anti-aliased straight stroke of the given width, source-over.
fn stroke_line(
    layer: &mut DirtyLayer,
    (ax, ay): (f32, f32),
    (bx, by): (f32, f32),
    width: f32,
    rgb: (u8, u8, u8),
    alpha: f32,
) {
    let half = width / 2.0;
    let x0 = (ax.min(bx) - half - 1.0).floor() as i32;
    let x1 = (ax.max(bx) + half + 1.0).ceil() as i32;
    let y0 = (ay.min(by) - half - 1.0).floor() as i32;
    let y1 = (ay.max(by) + half + 1.0).ceil() as i32;
    let (dx, dy) = (bx - ax, by - ay);
    let len2 = (dx * dx + dy * dy).max(f32::EPSILON);

    for y in y0..=y1 {
        for x in x0..=x1 {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;
            // distance from pixel center to the segment
            let t = (((px - ax) * dx + (py - ay) * dy) / len2).clamp(0.0, 1.0);
            let (qx, qy) = (ax + dx * t - px, ay + dy * t - py);
            let d = (qx * qx + qy * qy).sqrt();
            let coverage = (half + 0.5 - d).clamp(0.0, 1.0);
            if coverage > 0.0 {
                layer.blend_over(x, y, rgb, alpha * coverage);
            }
        }
    }
}

fn vignette(layer: &mut DirtyLayer) {
    let (w, h) = (layer.width as f32, layer.height as f32);
    let (cx, cy) = (w / 2.0, h / 2.0);
    let r0 = h * VIGNETTE_INNER;
    let r1 = h * VIGNETTE_OUTER;
    let span = (r1 - r0).max(f32::EPSILON);
    for y in 0..layer.height {
        for x in 0..layer.width {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let t = (((dx * dx + dy * dy).sqrt() - r0) / span).clamp(0.0, 1.0);
            if t > 0.0 {
                layer.blend_over(x as i32, y as i32, (0, 0, 0), VIGNETTE_ALPHA * t);
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/grime.rs"]
mod tests;

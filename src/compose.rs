// Presenting one frame of the Evidence section:
//   clean photo (or a flat backdrop)  ->  dirty overlay on top (linear-light)
//   -> particles (additive)
use crate::error::{Error, Result};
use crate::gamma::GammaLut;
use crate::grime;
use crate::types::{pack_rgb, unpack_rgb, DirtyLayer, FrameBuffer};
use image::RgbaImage;

/// Shown under the overlay when there is no clean photo.
pub const CLEAN_BACKDROP: u32 = 0x00_F2_F2_F2;

/// The clean photo, cover-fitted to the window; a flat backdrop otherwise.
pub fn clean_frame(base: Option<&RgbaImage>, width: usize, height: usize) -> FrameBuffer {
    let mut fb = FrameBuffer::new(width, height);
    match base {
        Some(img) => {
            let fitted = grime::cover_fit(img, width, height);
            for (dst, px) in fb.pixels.iter_mut().zip(fitted.pixels()) {
                *dst = pack_rgb(px[0], px[1], px[2]);
            }
        }
        None => fb.fill(CLEAN_BACKDROP),
    }
    fb
}

/// Blend `layer` over `screen` in place, using the layer's alpha as coverage.
/// Fully erased pixels keep the clean image untouched.
pub fn overlay_dirty(screen: &mut FrameBuffer, layer: &DirtyLayer, lut: &GammaLut) -> Result<()> {
    if screen.width != layer.width || screen.height != layer.height {
        return Err(Error::WindowUpdate(format!(
            "overlay size mismatch: screen {}x{}, layer {}x{}",
            screen.width, screen.height, layer.width, layer.height
        )));
    }

    for (dst, px) in screen.pixels.iter_mut().zip(layer.rgba.chunks_exact(4)) {
        let alpha = px[3];
        if alpha == 0 { continue; }
        if alpha == 255 {
            *dst = pack_rgb(px[0], px[1], px[2]);
            continue;
        }
        let a = alpha as f32 / 255.0;
        let (r, g, b) = unpack_rgb(*dst);
        *dst = pack_rgb(lut.mix(r, px[0], a), lut.mix(g, px[1], a), lut.mix(b, px[2], a));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/compose.rs"]
mod tests;

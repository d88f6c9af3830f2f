use super::*;

#[test]
fn erased_pixels_show_the_clean_frame() {
    let mut screen = clean_frame(None, 4, 1);
    let mut layer = DirtyLayer::new(4, 1);
    layer.rgba = vec![
        10, 20, 30, 255, // fully dirty
        10, 20, 30, 0, // scrubbed clean
        10, 20, 30, 128, // half way
        0, 0, 0, 0,
    ];
    overlay_dirty(&mut screen, &layer, &GammaLut::new()).unwrap();
    assert_eq!(screen.pixels[0], pack_rgb(10, 20, 30));
    assert_eq!(screen.pixels[1], CLEAN_BACKDROP);
    let (r, _, _) = unpack_rgb(screen.pixels[2]);
    assert!(r > 10 && r < 0xF2);
}

#[test]
fn size_mismatch_is_rejected() {
    let mut screen = FrameBuffer::new(4, 4);
    let layer = DirtyLayer::new(3, 4);
    assert!(overlay_dirty(&mut screen, &layer, &GammaLut::new()).is_err());
}

#[test]
fn clean_frame_fits_the_photo() {
    let img = RgbaImage::from_pixel(5, 5, image::Rgba([1, 2, 3, 255]));
    let fb = clean_frame(Some(&img), 8, 6);
    assert_eq!(fb.pixels.len(), 48);
    assert!(fb.pixels.iter().all(|&p| p == pack_rgb(1, 2, 3)));
}

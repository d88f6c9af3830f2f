use super::*;

#[test]
fn hud_strings_only_use_known_glyphs() {
    let samples = [
        "PURITY 82%",
        "CERTIFIED CLEAN - PROTOCOL COMPLETE",
        "CLEANING IN PROGRESS...",
        "RES 1280x720 | FPS: 59.9",
        "SCRUB TO REVEAL / ESC QUIT",
    ];
    for s in samples {
        for ch in s.chars() {
            assert!(glyph5x7(ch).is_some(), "missing glyph {ch:?} in {s:?}");
        }
    }
    assert!(glyph5x7('~').is_none());
}

#[test]
fn fill_rect_clips_to_the_frame() {
    let mut fb = FrameBuffer::new(4, 3);
    fill_rect(&mut fb, -2, 1, 4, 10, 7);
    let lit: Vec<usize> = (0..12).filter(|&i| fb.pixels[i] == 7).collect();
    assert_eq!(lit, vec![4, 5, 8, 9]);

    let mut fb = FrameBuffer::new(4, 3);
    fill_rect(&mut fb, 1, 1, 0, 2, 7);
    fill_rect(&mut fb, 10, 10, 5, 5, 7);
    assert!(fb.pixels.iter().all(|&p| p == 0));
}

#[test]
fn ring_touches_its_four_extremes_and_not_the_center() {
    let mut fb = FrameBuffer::new(21, 21);
    draw_ring(&mut fb, 10, 10, 6, 1);
    let at = |x: usize, y: usize| fb.pixels[y * 21 + x];
    assert_eq!(at(16, 10), 1);
    assert_eq!(at(4, 10), 1);
    assert_eq!(at(10, 4), 1);
    assert_eq!(at(10, 16), 1);
    assert_eq!(at(10, 10), 0);
}

#[test]
fn scaled_text_is_wider_and_still_drawn() {
    assert_eq!(text_width("ABC", 1), 18);
    assert_eq!(text_width("ABC", 3), 54);

    let mut fb = FrameBuffer::new(40, 20);
    draw_text_scaled(&mut fb, 0, 0, "I", 0x00_FF_FF_FF, 2);
    // top bar of the I spans columns 1..=3, doubled
    assert_eq!(fb.pixels[2], 0x00_FF_FF_FF);
    assert_eq!(fb.pixels[7], 0x00_FF_FF_FF);
}

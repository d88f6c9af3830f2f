use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn spawn_respects_ranges() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut em = ParticleEmitter::new(180);
    em.spawn(Point::new(10.0, 20.0), 6, &mut rng);
    assert_eq!(em.len(), 6);
    for p in em.particles() {
        assert_eq!((p.x, p.y), (10.0, 20.0));
        assert!(p.alpha >= 0.75 && p.alpha <= 1.0);
        assert!(p.size >= 2.0 && p.size < 5.5);
        let speed = (p.vx * p.vx + (p.vy + 0.4) * (p.vy + 0.4)).sqrt();
        assert!(speed >= 0.69 && speed <= 2.91);
    }
}

#[test]
fn cap_drops_the_oldest() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut em = ParticleEmitter::new(10);
    em.spawn(Point::new(0.0, 0.0), 8, &mut rng);
    em.spawn(Point::new(99.0, 99.0), 8, &mut rng);
    assert_eq!(em.len(), 10);
    // the 6 survivors from the first burst went first; the newest 8 all remain
    let newest = em.particles().iter().filter(|p| p.x == 99.0).count();
    assert_eq!(newest, 8);
}

#[test]
fn one_tick_at_60fps_matches_the_per_frame_rules() {
    let mut em = ParticleEmitter::new(4);
    em.particles.push(Particle { x: 0.0, y: 0.0, vx: 1.0, vy: -1.0, alpha: 1.0, size: 4.0 });
    em.tick(1.0 / 60.0);
    let p = &em.particles()[0];
    assert!((p.x - 1.0).abs() < 1e-4);
    assert!((p.y + 1.0).abs() < 1e-4);
    assert!((p.vy - (-1.0 + 0.055)).abs() < 1e-4);
    assert!((p.alpha - 0.91).abs() < 1e-4);
    assert!((p.size - 3.88).abs() < 1e-3);
}

#[test]
fn particles_die_out_without_new_spawns() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut em = ParticleEmitter::new(180);
    for _ in 0..40 {
        em.spawn(Point::new(50.0, 50.0), 6, &mut rng);
        assert!(em.len() <= 180);
    }
    // 0.91^n < 0.015 after ~45 frames
    for _ in 0..60 {
        em.tick(1.0 / 60.0);
    }
    assert!(em.is_empty());
}

#[test]
fn render_only_brightens() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut em = ParticleEmitter::new(16);
    em.spawn(Point::new(8.0, 8.0), 4, &mut rng);
    let mut fb = FrameBuffer::new(16, 16);
    fb.fill(0x00_10_10_10);
    em.render(&mut fb);
    assert!(fb.pixels.iter().all(|&p| p >= 0x00_10_10_10));
    let center = fb.pixels[8 * 16 + 8];
    assert!(center > 0x00_10_10_10);
}

use super::*;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn map_hits_the_table_ends_and_clamps_outside() {
    let t = BreakpointTable::from_pairs(&[(0.0, 10.0), (0.5, 20.0), (1.0, -5.0)]).unwrap();
    assert_eq!(map(0.0, &t), 10.0);
    assert_eq!(map(1.0, &t), -5.0);
    assert_eq!(map(-3.0, &t), 10.0);
    assert_eq!(map(7.0, &t), -5.0);
    assert_eq!(map(f32::NAN, &t), 10.0);
}

#[test]
fn map_interpolates_between_bracketing_breakpoints() {
    let t = BreakpointTable::from_pairs(&[(0.0, 0.0), (0.5, 100.0), (1.0, 0.0)]).unwrap();
    assert!(close(map(0.25, &t), 50.0));
    assert!(close(map(0.5, &t), 100.0));
    assert!(close(map(0.75, &t), 50.0));
}

#[test]
fn unordered_or_empty_tables_are_rejected() {
    assert!(BreakpointTable::from_pairs(&[]).is_err());
    assert!(BreakpointTable::from_pairs(&[(0.5, 1.0), (0.5, 2.0)]).is_err());
    assert!(BreakpointTable::from_pairs(&[(0.6, 1.0), (0.2, 2.0)]).is_err());
    assert!(BreakpointTable::from_pairs(&[(0.0, f32::INFINITY)]).is_err());
}

#[test]
fn tables_deserialize_through_validation() {
    let ok: BreakpointTable =
        serde_json::from_str(r#"[{"progress":0,"value":1},{"progress":1,"value":2}]"#).unwrap();
    assert_eq!(ok.points().len(), 2);
    let bad = serde_json::from_str::<BreakpointTable>(
        r#"[{"progress":1,"value":1},{"progress":0,"value":2}]"#,
    );
    assert!(bad.is_err());
}

#[test]
fn three_stage_four_to_one_plan_matches_the_process_section() {
    let plan = HoldSnapPlan::new(3, 4.0, 1.0).unwrap();
    let w = plan.windows();
    assert!(close(w[0].hold_end, 0.267));
    assert!(close(w[1].hold_start, 0.333));
    assert!(close(w[1].hold_end, 0.600));
    assert!(close(w[2].hold_start, 0.667));
    assert_eq!(w[2].hold_end, 1.0);

    let x = plan.offset_table(-100.0 / 3.0).unwrap();
    assert_eq!(map(0.0, &x), 0.0);
    assert_eq!(map(0.2, &x), 0.0);
    assert!(close(map(0.5, &x), -33.333));
    assert!(close(map(0.9, &x), -66.667));
    assert!(close(map(1.0, &x), -66.667));
    // halfway through the first snap
    assert!(close(map(0.3, &x), -16.667));
}

#[test]
fn fill_tables_only_move_inside_their_hold_window() {
    let plan = HoldSnapPlan::new(3, 4.0, 1.0).unwrap();
    let f1 = plan.fill_table(1).unwrap();
    assert_eq!(map(0.1, &f1), 0.0);
    assert_eq!(map(0.3, &f1), 0.0);
    assert!(close(map(0.4667, &f1), 50.0));
    assert_eq!(map(0.63, &f1), 100.0);
    assert_eq!(map(1.0, &f1), 100.0);
    assert!(plan.fill_table(3).is_err());
}

#[test]
fn stage_count_and_ratio_are_configurable() {
    let plan = HoldSnapPlan::new(4, 1.0, 1.0).unwrap();
    let w = plan.windows();
    assert_eq!(w.len(), 4);
    assert!(close(w[0].hold_end, 0.125));
    assert!(close(w[0].snap_end, 0.25));
    assert_eq!(plan.stage_at(0.0), 0);
    assert_eq!(plan.stage_at(0.26), 1);
    assert_eq!(plan.stage_at(1.0), 3);

    let tl = plan.timeline(-25.0).unwrap();
    let values = tl.map(1.0);
    assert_eq!(values.len(), 5);
    assert_eq!(values[0], ("offset", -75.0));
    assert!(HoldSnapPlan::new(0, 4.0, 1.0).is_err());
    assert!(HoldSnapPlan::new(2, 4.0, 0.0).is_err());
}

#[test]
fn hold_snap_plan_validates_when_deserialized() {
    let plan: HoldSnapPlan =
        serde_json::from_str(r#"{"stages":3,"hold_ratio":4.0,"snap_ratio":1.0}"#).unwrap();
    assert_eq!(plan.stages(), 3);
    assert_eq!(plan.hold_ratio(), 4.0);
    assert_eq!(plan.snap_ratio(), 1.0);

    let zero = serde_json::from_str::<HoldSnapPlan>(r#"{"stages":0,"hold_ratio":4.0,"snap_ratio":1.0}"#);
    assert!(zero.is_err());
    let flat = serde_json::from_str::<HoldSnapPlan>(r#"{"stages":2,"hold_ratio":4.0,"snap_ratio":0.0}"#);
    assert!(flat.is_err());
}

#[test]
fn scroll_ranges_normalize_and_clamp() {
    // 300vh pinned section, 100vh viewport, starts at 1000px
    let vh = 800.0;
    let p = ScrollRange::Pinned.progress(1000.0 + vh, 1000.0, 3.0 * vh, vh);
    assert!(close(p, 0.5));
    assert_eq!(ScrollRange::Pinned.progress(0.0, 1000.0, 3.0 * vh, vh), 0.0);
    assert_eq!(ScrollRange::Pinned.progress(1e6, 1000.0, 3.0 * vh, vh), 1.0);

    assert!(close(ScrollRange::Exit.progress(400.0, 0.0, 800.0, 800.0), 0.5));
    // a section no taller than the viewport snaps straight through
    assert_eq!(ScrollRange::Pinned.progress(10.0, 0.0, 800.0, 800.0), 1.0);
}

#[test]
fn hero_blurs_and_fades_out() {
    let hero = hero_timeline().unwrap();
    assert_eq!(hero.value("blur", 0.0), Some(0.0));
    assert_eq!(hero.value("blur", 0.65), Some(12.0));
    assert_eq!(hero.value("opacity", 1.0), Some(0.0));
    assert!(close(hero.value("opacity", 0.375).unwrap(), 0.5));
    assert_eq!(hero.value("missing", 0.5), None);
}

#[test]
fn text_reveal_staggers_characters() {
    let tr = TextReveal::default();
    let n = 10;
    assert!(tr.frame(0.0, n).iter().all(|&v| v == 0.0));
    assert!(tr.frame(1.0, n).iter().all(|&v| close(v, 1.0)));

    let mid = tr.frame(0.4, n);
    // earlier characters are always at least as revealed as later ones
    assert!(mid.windows(2).all(|w| w[0] >= w[1]));
    assert!(mid[0] > mid[n - 1]);
    assert_eq!(tr.char_progress(0.5, 0, 0), 0.0);
}

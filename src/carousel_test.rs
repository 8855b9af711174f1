use super::*;

// =============================================================
// Index arithmetic
// =============================================================

#[test]
fn next_and_prev_wrap_for_all_indices() {
    for n in 1..=6 {
        for i in 0..n {
            let mut c = Carousel::new(n);
            c.go_to(i);
            c.next();
            assert_eq!(c.index(), (i + 1) % n, "next from {i} of {n}");

            let mut c = Carousel::new(n);
            c.go_to(i);
            c.prev();
            assert_eq!(c.index(), (i + n - 1) % n, "prev from {i} of {n}");
        }
    }
}

#[test]
fn go_to_wraps_out_of_range() {
    let mut c = Carousel::new(3);
    c.go_to(4);
    assert_eq!(c.index(), 1);
}

#[test]
fn empty_carousel_stays_at_zero() {
    let mut c = Carousel::new(0);
    c.next();
    c.prev();
    assert_eq!(c.index(), 0);
    assert!(!c.has_controls());
}

// =============================================================
// Autoplay
// =============================================================

#[test]
fn tick_advances_and_wraps() {
    let mut c = Carousel::new(3);
    assert!(c.tick());
    assert!(c.tick());
    assert!(c.tick());
    assert_eq!(c.index(), 0);
}

#[test]
fn tick_suspended_with_single_slide() {
    let mut c = Carousel::new(1);
    assert!(!c.tick());
    assert_eq!(c.index(), 0);
}

#[test]
fn tick_suspended_while_hovered() {
    let mut c = Carousel::new(3);
    c.hover(true);
    assert_eq!(c.phase(), Phase::Paused);
    assert!(!c.tick());
    c.hover(false);
    assert_eq!(c.phase(), Phase::Autoplaying);
    assert!(c.tick());
    assert_eq!(c.index(), 1);
}

#[test]
fn tick_suspended_while_dragging() {
    let mut c = Carousel::new(3);
    assert!(c.pointer_down(100.0));
    assert_eq!(c.phase(), Phase::Dragging);
    assert!(!c.tick());
}

// =============================================================
// Keyboard
// =============================================================

#[test]
fn arrow_keys_move_one_slide() {
    let mut c = Carousel::new(4);
    c.key(Key::ArrowLeft);
    assert_eq!(c.index(), 3);
    c.key(Key::ArrowRight);
    c.key(Key::ArrowRight);
    assert_eq!(c.index(), 1);
    c.key(Key::Other);
    assert_eq!(c.index(), 1);
}

#[test]
fn arrow_keys_ignored_with_single_slide() {
    let mut c = Carousel::new(1);
    c.key(Key::ArrowRight);
    assert_eq!(c.index(), 0);
}

// =============================================================
// Drag
// =============================================================

#[test]
fn drag_right_past_threshold_goes_back() {
    let mut c = Carousel::new(3);
    let now = Instant::now();
    c.pointer_down(100.0);
    c.pointer_move(151.0, 1000.0);
    let snap = c.pointer_up(now).unwrap();
    assert_eq!(c.index(), 2);
    assert!(snap.animated);
    assert_eq!(snap.index, 2);
}

#[test]
fn drag_left_past_threshold_goes_forward() {
    let mut c = Carousel::new(3);
    c.pointer_down(300.0);
    c.pointer_move(200.0, 1000.0);
    c.pointer_up(Instant::now());
    assert_eq!(c.index(), 1);
}

#[test]
fn drag_at_threshold_snaps_back() {
    for end in [150.0, 50.0, 120.0, 80.0] {
        let mut c = Carousel::new(3);
        c.pointer_down(100.0);
        c.pointer_move(end, 1000.0);
        let snap = c.pointer_up(Instant::now()).unwrap();
        assert_eq!(c.index(), 0, "release at {end} should not commit");
        assert_eq!(snap.css(), "translateX(0%)");
    }
}

#[test]
fn drag_move_reports_live_percentage() {
    let mut c = Carousel::new(3);
    c.go_to(1);
    c.pointer_down(500.0);
    let live = c.pointer_move(450.0, 1000.0).unwrap();
    assert!(!live.animated);
    assert_eq!(live.transition(), "none");
    assert!((live.offset_pct + 5.0).abs() < f64::EPSILON);
    assert_eq!(live.css(), "translateX(calc(-100% + -5%))");
}

#[test]
fn pointer_move_without_drag_is_ignored() {
    let mut c = Carousel::new(3);
    assert!(c.pointer_move(10.0, 100.0).is_none());
    assert!(c.pointer_up(Instant::now()).is_none());
}

#[test]
fn pointer_down_ignored_with_single_slide() {
    let mut c = Carousel::new(1);
    assert!(!c.pointer_down(0.0));
    assert_eq!(c.phase(), Phase::Autoplaying);
}

#[test]
fn autoplay_resumes_after_delay() {
    let mut c = Carousel::new(3);
    let t0 = Instant::now();
    c.pointer_down(0.0);
    c.pointer_up(t0);
    assert_eq!(c.phase(), Phase::Paused);
    assert!(!c.resume_if_due(t0 + Duration::from_millis(100)));
    assert!(!c.tick());
    assert!(c.resume_if_due(t0 + RESUME_DELAY));
    assert_eq!(c.phase(), Phase::Autoplaying);
    assert!(c.tick());
}

#[test]
fn track_transform_uses_percent_offsets() {
    let mut c = Carousel::new(3);
    assert_eq!(c.track_transform().css(), "translateX(0%)");
    c.go_to(2);
    assert_eq!(c.track_transform().css(), "translateX(-200%)");
    assert_eq!(c.track_transform().transition(), SNAP_TRANSITION);
}

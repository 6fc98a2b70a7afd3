use super::*;

fn sheet(frames: u32) -> PixelBuffer {
    PixelBuffer::new(16, 16 * frames, PixelFormat::RGBA8)
}

fn desc() -> AnimationDescriptor {
    AnimationDescriptor::new("sheet_a.png", "target.png", 16, 16)
}

#[test]
fn tick_five_lands_in_third_phase() {
    let mut anim = Animation::build(&desc().with_duration(2), sheet(4)).unwrap();
    assert_eq!(anim.cycle_len(), 8);
    for _ in 0..5 {
        anim.advance();
    }
    assert_eq!(anim.frame(), 5);
    assert_eq!(anim.current_phase_index(), 2);
    assert_eq!(anim.phase_frame(), 1);
    assert_eq!(*anim.current_phase(), Phase::Static { duration: 2, v: 32 });
}

#[test]
fn full_cycle_returns_to_initial_state() {
    for d in [
        desc().with_duration(2),
        desc().with_duration(4).interpolated(1),
        desc().frame_duration(1, 5).map_frame(6, 0),
    ] {
        let mut anim = Animation::build(&d, sheet(4)).unwrap();
        let initial = (anim.frame(), anim.current_phase_index(), anim.phase_frame());
        for _ in 0..anim.cycle_len() {
            anim.advance();
        }
        assert!(anim.is_on_frame_zero());
        assert_eq!(
            (anim.frame(), anim.current_phase_index(), anim.phase_frame()),
            initial
        );
    }
}

#[test]
fn static_phase_reports_change_only_on_entry() {
    let mut anim = Animation::build(&desc().with_duration(3), sheet(2)).unwrap();
    // Fresh animations always need a first draw.
    assert!(anim.is_changed());

    let mut seen = Vec::new();
    for _ in 0..6 {
        anim.advance();
        seen.push(anim.is_changed());
    }
    // ticks 1..=6: phase 0 continues, continues, phase 1 enters, continues, continues, wrap.
    assert_eq!(seen, vec![false, false, true, false, false, true]);
}

#[test]
fn interpolated_phase_changes_every_tick() {
    let mut anim = Animation::build(&desc().with_duration(4).interpolated(1), sheet(2)).unwrap();
    let mut seen = Vec::new();
    for _ in 0..8 {
        seen.push((anim.current_phase_index(), anim.phase_frame(), anim.is_changed()));
        anim.advance();
    }
    assert_eq!(
        seen,
        vec![
            (0, 0, true),
            (1, 0, true),
            (1, 1, true),
            (1, 2, true),
            (2, 0, true),
            (3, 0, true),
            (3, 1, true),
            (3, 2, true),
        ]
    );
}

#[test]
fn interpolation_between_identical_rows_is_still() {
    // Both logical frames show spritesheet frame 0.
    let d = desc().map_frame(1, 0).with_duration(3).interpolated(0);
    let mut anim = Animation::build(&d, sheet(1)).unwrap();
    anim.advance();
    assert!(!anim.is_changed());
    anim.advance();
    assert!(!anim.is_changed());
    anim.advance();
    // New phase entered.
    assert!(anim.is_changed());
}

#[test]
fn single_tick_cycle_never_changes_after_first_frame() {
    let mut anim = Animation::build(&desc(), sheet(1)).unwrap();
    assert_eq!(anim.cycle_len(), 1);
    assert!(anim.is_changed());
    for _ in 0..5 {
        anim.advance();
        assert!(anim.is_on_frame_zero());
        assert!(!anim.is_changed());
    }
}

#[test]
fn build_rejects_frames_wider_than_sheet() {
    let err = Animation::build(&desc(), PixelBuffer::new(8, 64, PixelFormat::RGBA8)).unwrap_err();
    assert!(matches!(err, TexAnimError::Descriptor(_)));
}

#[test]
fn target_rect_follows_descriptor() {
    let anim = Animation::build(&desc().at(4, 8), sheet(1)).unwrap();
    assert_eq!(anim.target_rect(), (4, 8, 16, 16));
    assert_eq!(anim.source().height(), 16);
    assert_eq!(anim.phases().len(), 1);
}

#[test]
fn rewind_restores_fresh_state() {
    let mut anim = Animation::build(&desc().with_duration(2), sheet(4)).unwrap();
    for _ in 0..3 {
        anim.advance();
    }
    anim.rewind();
    assert!(anim.is_on_frame_zero());
    assert_eq!(anim.current_phase_index(), 0);
    assert_eq!(anim.phase_frame(), 0);
    assert!(anim.is_changed());
}

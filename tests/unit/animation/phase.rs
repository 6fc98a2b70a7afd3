use super::*;

fn sheet_desc() -> AnimationDescriptor {
    AnimationDescriptor::new("sheet_a.png", "target.png", 16, 16)
}

#[test]
fn uniform_static_sequence() {
    let phases = build_phases(&sheet_desc().with_duration(2), 64).unwrap();
    assert_eq!(
        phases,
        vec![
            Phase::Static { duration: 2, v: 0 },
            Phase::Static { duration: 2, v: 16 },
            Phase::Static { duration: 2, v: 32 },
            Phase::Static { duration: 2, v: 48 },
        ]
    );
    assert_eq!(cycle_length(&phases), 8);
}

#[test]
fn interpolation_with_delay_inserts_hold_phases() {
    let phases = build_phases(&sheet_desc().with_duration(4).interpolated(1), 64).unwrap();
    assert_eq!(phases.len(), 8);
    assert_eq!(cycle_length(&phases), 16);
    assert_eq!(phases[0], Phase::Static { duration: 1, v: 0 });
    assert_eq!(
        phases[1],
        Phase::Interpolated {
            duration: 3,
            from_v: 0,
            to_v: 16
        }
    );
    // The last cross-fade wraps back to the first frame.
    assert_eq!(
        phases[7],
        Phase::Interpolated {
            duration: 3,
            from_v: 48,
            to_v: 0
        }
    );
}

#[test]
fn interpolation_without_delay_has_no_hold() {
    let phases = build_phases(&sheet_desc().with_duration(3).interpolated(0), 32).unwrap();
    assert_eq!(
        phases,
        vec![
            Phase::Interpolated {
                duration: 3,
                from_v: 0,
                to_v: 16
            },
            Phase::Interpolated {
                duration: 3,
                from_v: 16,
                to_v: 0
            },
        ]
    );
}

#[test]
fn delay_not_shorter_than_duration_is_descriptor_error() {
    let err = build_phases(&sheet_desc().with_duration(2).interpolated(2), 64).unwrap_err();
    assert!(matches!(err, TexAnimError::Descriptor(_)));

    // Only the overridden frame is too short.
    let err = build_phases(
        &sheet_desc()
            .with_duration(4)
            .interpolated(2)
            .frame_duration(1, 1),
        64,
    )
    .unwrap_err();
    assert!(matches!(err, TexAnimError::Descriptor(_)));
}

#[test]
fn mapping_extends_past_physical_frames() {
    // 2 physical frames, logical frames 0..=4; frames 2 and 3 have no mapping and are skipped.
    let desc = sheet_desc().map_frame(4, 0).frame_duration(4, 7);
    let phases = build_phases(&desc, 32).unwrap();
    assert_eq!(
        phases,
        vec![
            Phase::Static { duration: 1, v: 0 },
            Phase::Static { duration: 1, v: 16 },
            Phase::Static { duration: 7, v: 0 },
        ]
    );
}

#[test]
fn duration_override_beyond_sheet_without_mapping_is_ignored() {
    let desc = sheet_desc().frame_duration(5, 9);
    let phases = build_phases(&desc, 32).unwrap();
    assert_eq!(phases.len(), 2);
    assert_eq!(cycle_length(&phases), 2);
}

#[test]
fn remapped_frames_clamp_to_last_physical_row() {
    let desc = sheet_desc().map_frame(0, 9).map_frame(1, 1);
    let phases = build_phases(&desc, 48).unwrap();
    assert_eq!(phases[0], Phase::Static { duration: 1, v: 32 });
    assert_eq!(phases[1], Phase::Static { duration: 1, v: 16 });
}

#[test]
fn partial_trailing_rows_are_not_frames() {
    assert_eq!(texture_frame_count(40, 16), 2);
    let phases = build_phases(&sheet_desc(), 40).unwrap();
    assert_eq!(phases.len(), 2);
}

#[test]
fn sheet_shorter_than_one_frame_is_rejected() {
    assert!(matches!(
        build_phases(&sheet_desc(), 15),
        Err(TexAnimError::Descriptor(_))
    ));
}

#[test]
fn phase_sum_equals_cycle_length_for_mixed_descriptors() {
    let descs = [
        sheet_desc(),
        sheet_desc().with_duration(5).interpolated(2),
        sheet_desc().frame_duration(0, 3).frame_duration(2, 8),
        sheet_desc().map_frame(6, 2).interpolated(0).with_duration(2),
    ];
    for d in &descs {
        let phases = build_phases(d, 64).unwrap();
        assert!(!phases.is_empty());
        assert!(phases.iter().all(|p| p.duration() > 0));
        let sum: u64 = phases.iter().map(|p| u64::from(p.duration())).sum();
        assert_eq!(sum, cycle_length(&phases));
        assert!(sum >= 1);
    }
}

#[test]
fn cycle_length_of_hand_built_phases_does_not_wrap() {
    let phases = [
        Phase::Static {
            duration: u32::MAX,
            v: 0,
        },
        Phase::Static { duration: 2, v: 0 },
    ];
    assert_eq!(cycle_length(&phases), u64::from(u32::MAX) + 2);
}

#[test]
fn blend_factor_is_linear_over_phase() {
    let p = Phase::Interpolated {
        duration: 4,
        from_v: 0,
        to_v: 16,
    };
    assert_eq!(p.blend_at(0), 0.0);
    assert_eq!(p.blend_at(2), 0.5);
    assert_eq!(p.blend_at(3), 0.75);
    assert!(p.has_changing_v());
    assert!(!Phase::Static { duration: 1, v: 0 }.has_changing_v());
}

use super::*;

#[test]
fn json_uses_short_keys_and_defaults() {
    let json = r#"{
        "from": "./water_flow.png",
        "to": "block/water.png",
        "x": 0,
        "y": 16,
        "w": 16,
        "h": 16,
        "tiles": { "0": 3, "7": 1 },
        "durations": { "2": 5 }
    }"#;
    let d: AnimationDescriptor = serde_json::from_str(json).unwrap();
    assert_eq!(d.source, "./water_flow.png");
    assert_eq!(d.target, "block/water.png");
    assert_eq!((d.x, d.y, d.width, d.height), (0, 16, 16, 16));
    assert_eq!(d.duration, 1);
    assert!(!d.interpolate);
    assert_eq!(d.interpolation_delay, 0);
    assert_eq!(d.frame_mapping.get(&7), Some(&1));
    assert_eq!(d.duration_of(2), 5);
    assert_eq!(d.duration_of(3), 1);
}

#[test]
fn builder_matches_json_form() {
    let built = AnimationDescriptor::new("a.png", "b.png", 8, 4)
        .at(2, 3)
        .with_duration(6)
        .interpolated(2)
        .map_frame(1, 0)
        .frame_duration(0, 9);
    let json = serde_json::to_string(&built).unwrap();
    let parsed: AnimationDescriptor = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, built);
    assert!(json.contains("\"skip\":2"));
}

#[test]
fn greatest_used_frame_merges_both_maps() {
    let d = AnimationDescriptor::new("a", "b", 1, 1);
    assert_eq!(d.greatest_used_frame(), None);

    let d = d.map_frame(3, 0).frame_duration(9, 2);
    assert_eq!(d.greatest_used_frame(), Some(9));
}

#[test]
fn validate_rejects_bad_geometry_and_timing() {
    assert!(AnimationDescriptor::new("a", "b", 16, 16).validate().is_ok());
    assert!(matches!(
        AnimationDescriptor::new("a", "b", 0, 16).validate(),
        Err(TexAnimError::Descriptor(_))
    ));
    assert!(AnimationDescriptor::new("a", "b", 16, 0).validate().is_err());
    assert!(AnimationDescriptor::new("a", "b", 16, 16)
        .with_duration(0)
        .validate()
        .is_err());
    assert!(AnimationDescriptor::new("a", "b", 16, 16)
        .frame_duration(4, 0)
        .validate()
        .is_err());
    assert!(AnimationDescriptor::new("", "b", 16, 16).validate().is_err());
}

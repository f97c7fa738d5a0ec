use knurl_params_core::{
    Interpolation, ParamError, ParamKind, Parameter, Value, ValueKind,
};

fn approx(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn double_of(v: Value) -> f64 {
    match v {
        Value::Double(d) => d,
        other => panic!("expected Double, got {other:?}"),
    }
}

/// it should answer getValue for static dimensions at any time
#[test]
fn static_dimension_ignores_time() {
    let mut p = Parameter::new(ParamKind::Double, "gain", 1);
    p.set_value(0, Value::Double(0.75)).unwrap();
    for t in [-10.0, 0.0, 42.0] {
        assert_eq!(
            p.get_value_at_time(t, 0).unwrap(),
            p.get_value(0).unwrap().clone()
        );
    }
}

/// it should animate one dimension of a 2-dimensional parameter independently
#[test]
fn two_dimensional_size_scenario() {
    let mut size = Parameter::new(ParamKind::Double, "size", 2);
    size.set_value_at_time(0.0, 0, Value::Double(10.0)).unwrap();
    size.set_value_at_time(10.0, 0, Value::Double(20.0)).unwrap();
    assert_eq!(size.interpolation(), Interpolation::Linear);

    approx(double_of(size.get_value_at_time(5.0, 0).unwrap()), 15.0, 1e-12);
    approx(double_of(size.get_value_at_time(-5.0, 0).unwrap()), 10.0, 1e-12);
    approx(double_of(size.get_value_at_time(50.0, 0).unwrap()), 20.0, 1e-12);

    // Dimension 1 stays static and independent.
    size.set_value(1, Value::Double(3.0)).unwrap();
    assert!(!size.has_animation(1));
    approx(double_of(size.get_value_at_time(5.0, 1).unwrap()), 3.0, 1e-12);
}

/// it should keep keyframes intact when setting the fallback on an animated dimension
#[test]
fn set_value_on_animated_dimension_updates_fallback_only() {
    let mut p = Parameter::new(ParamKind::Double, "mix", 1);
    p.set_value_at_time(0.0, 0, Value::Double(0.0)).unwrap();
    p.set_value_at_time(1.0, 0, Value::Double(1.0)).unwrap();

    p.set_value(0, Value::Double(9.0)).unwrap();
    assert_eq!(p.keyframes(0).unwrap().len(), 2);
    assert_eq!(p.get_value(0).unwrap(), &Value::Double(9.0));
    approx(double_of(p.get_value_at_time(0.5, 0).unwrap()), 0.5, 1e-12);

    // Removing every key reverts reads to the fallback.
    assert!(p.remove_keyframe(0.0, 0).unwrap());
    assert!(p.remove_keyframe(1.0, 0).unwrap());
    assert!(!p.has_animation(0));
    assert_eq!(p.get_value_at_time(0.5, 0).unwrap(), Value::Double(9.0));
}

/// it should refuse keyframes on kinds that never animate
#[test]
fn non_animatable_kinds_reject_keys() {
    for kind in [ParamKind::Bool, ParamKind::File, ParamKind::Button, ParamKind::Choice] {
        let mut p = Parameter::new(kind, "p", 1);
        let value = kind.default_value();
        let err = p.set_value_at_time(0.0, 0, value).unwrap_err();
        assert_eq!(
            err,
            ParamError::AnimationNotSupported {
                type_name: kind.type_name().to_string(),
            }
        );
    }
}

/// it should reject out-of-range dimensions on value accessors
#[test]
fn dimension_bounds_are_hard_errors() {
    let mut p = Parameter::new(ParamKind::Double, "pos", 2);
    assert!(matches!(
        p.set_value(2, Value::Double(0.0)),
        Err(ParamError::DimensionOutOfRange { dimension: 2, .. })
    ));
    assert!(matches!(
        p.get_value(5),
        Err(ParamError::DimensionOutOfRange { dimension: 5, .. })
    ));
    assert!(matches!(
        p.get_value_at_time(0.0, 2),
        Err(ParamError::DimensionOutOfRange { .. })
    ));
    // The failed call left dimension 0 untouched.
    assert_eq!(p.get_value(0).unwrap(), &Value::Double(0.0));
}

/// it should reject value tags foreign to the parameter's kind
#[test]
fn kind_constrains_value_tags() {
    let mut p = Parameter::new(ParamKind::Int, "count", 1);
    let err = p.set_value(0, Value::Double(1.0)).unwrap_err();
    assert_eq!(
        err,
        ParamError::InvalidValueKind {
            expected: ValueKind::Int,
            actual: ValueKind::Double,
        }
    );
}

/// it should report ordered keyframes and an empty mapping when static
#[test]
fn keyframes_mapping() {
    let mut p = Parameter::new(ParamKind::Double, "curve", 1);
    assert!(p.keyframes(0).unwrap().is_empty());

    p.set_value_at_time(2.0, 0, Value::Double(2.0)).unwrap();
    p.set_value_at_time(0.0, 0, Value::Double(0.0)).unwrap();
    p.set_value_at_time(1.0, 0, Value::Double(1.0)).unwrap();
    let keys = p.keyframes(0).unwrap();
    let times: Vec<f64> = keys.iter().map(|(t, _)| *t).collect();
    assert_eq!(times, vec![0.0, 1.0, 2.0]);
}

/// it should clone values and curves by name and stay isolated afterwards
#[test]
fn clone_fidelity_and_isolation() {
    let mut src = Parameter::new(ParamKind::Double, "size", 1);
    src.set_value(0, Value::Double(4.0)).unwrap();
    src.set_value_at_time(0.0, 0, Value::Double(10.0)).unwrap();
    src.set_value_at_time(10.0, 0, Value::Double(20.0)).unwrap();

    let mut copy = Parameter::new(ParamKind::Double, "size", 1);
    copy.clone_values_from(&src).unwrap();

    assert_eq!(copy.get_value(0).unwrap(), src.get_value(0).unwrap());
    for t in [0.0, 2.5, 5.0, 10.0, 40.0] {
        assert_eq!(
            copy.get_value_at_time(t, 0).unwrap(),
            src.get_value_at_time(t, 0).unwrap()
        );
    }
    assert_eq!(copy.hash_contribution(), src.hash_contribution());

    // Mutating the source afterwards must not leak into the copy.
    src.set_value_at_time(5.0, 0, Value::Double(-100.0)).unwrap();
    approx(double_of(copy.get_value_at_time(5.0, 0).unwrap()), 15.0, 1e-12);

    let other = Parameter::new(ParamKind::Double, "scale", 1);
    assert_eq!(
        copy.clone_values_from(&other),
        Err(ParamError::NameMismatch {
            this: "size".to_string(),
            other: "scale".to_string(),
        })
    );
}

/// it should treat range metadata as advisory and store out-of-range values verbatim
#[test]
fn range_metadata_never_clamps() {
    let mut p = Parameter::new(ParamKind::Int, "level", 1);
    p.set_minimum(0.0, 0);
    p.set_maximum(100.0, 0);
    p.set_value(0, Value::Int(150)).unwrap();
    assert_eq!(p.get_value(0).unwrap(), &Value::Int(150));
    assert_eq!(p.meta().mins, vec![0.0]);
    assert_eq!(p.meta().maxs, vec![100.0]);
}

/// it should resolve the active entry text of a Choice parameter
#[test]
fn choice_entries() {
    let mut p = Parameter::new(ParamKind::Choice, "filter", 1);
    p.set_entries(vec!["box".into(), "gaussian".into(), "lanczos".into()]);
    assert_eq!(p.active_entry_text(), Some("box"));
    p.set_value(0, Value::Index(2)).unwrap();
    assert_eq!(p.active_entry_text(), Some("lanczos"));
    p.set_value(0, Value::Index(9)).unwrap();
    assert_eq!(p.active_entry_text(), None);
}

/// it should round-trip keyframed parameter state through serde
#[test]
fn state_serde_round_trip() {
    use knurl_params_core::ParamState;

    let mut p = Parameter::new(ParamKind::Double, "size", 2);
    p.set_value(1, Value::Double(3.0)).unwrap();
    p.set_value_at_time(0.0, 0, Value::Double(10.0)).unwrap();
    p.set_value_at_time(10.0, 0, Value::Double(20.0)).unwrap();

    let state = ParamState::capture(&p);
    let json = serde_json::to_string(&state).unwrap();
    let back: ParamState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);
}

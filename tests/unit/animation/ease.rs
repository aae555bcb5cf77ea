use super::*;

#[test]
fn endpoints_are_exact() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
    }
}

#[test]
fn out_of_range_input_is_clamped() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(-0.5), 0.0);
        assert_eq!(ease.apply(3.0), 1.0);
    }
}

#[test]
fn curves_are_monotonic() {
    for ease in Ease::ALL {
        let mut prev = ease.apply(0.0);
        for i in 1..=1000 {
            let v = ease.apply(f64::from(i) / 1000.0);
            assert!(v >= prev, "{ease:?} decreased at step {i}");
            prev = v;
        }
    }
}

#[test]
fn in_out_cubic_matches_reference_points() {
    let e = Ease::InOutCubic;
    assert!((e.apply(0.25) - 0.0625).abs() < 1e-12);
    assert!((e.apply(0.5) - 0.5).abs() < 1e-12);
    assert!((e.apply(0.75) - 0.9375).abs() < 1e-12);
}

#[test]
fn default_is_in_out_cubic_and_serializes_snake_case() {
    assert_eq!(Ease::default(), Ease::InOutCubic);
    let v = serde_json::to_value(Ease::InOutCubic).unwrap();
    assert_eq!(v, serde_json::json!("in_out_cubic"));
    let back: Ease = serde_json::from_value(serde_json::json!("out_quad")).unwrap();
    assert_eq!(back, Ease::OutQuad);
}

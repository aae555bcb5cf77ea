use super::*;

#[test]
fn defaults_match_observed_constants() {
    let cfg = PlaybackConfig::default();
    assert_eq!(cfg.morph_duration(), Duration::from_millis(1500));
    assert_eq!(cfg.poll_interval(), Duration::from_millis(30));
    assert_eq!(cfg.stage_pause(), Duration::from_millis(500));
    assert_eq!(cfg.clause_lookahead_secs, 0.1);
    assert_eq!(cfg.clause_weight_floor, 10);
    assert_eq!(cfg.ease, Ease::InOutCubic);
    assert_eq!(cfg.stall_timeout(), Duration::from_secs(1));
    cfg.validate().unwrap();
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = PlaybackConfig::from_json(r#"{"stage_pause_ms": 250, "ease": "linear"}"#).unwrap();
    assert_eq!(cfg.stage_pause_ms, 250);
    assert_eq!(cfg.ease, Ease::Linear);
    assert_eq!(cfg.poll_interval_ms, 30);
}

#[test]
fn rejects_unknown_fields_and_bad_values() {
    assert!(matches!(
        PlaybackConfig::from_json(r#"{"poll_ms": 5}"#).unwrap_err(),
        MorphcastError::Serde(_)
    ));
    assert!(matches!(
        PlaybackConfig::from_json(r#"{"poll_interval_ms": 0}"#).unwrap_err(),
        MorphcastError::Validation(_)
    ));
    assert!(matches!(
        PlaybackConfig::from_json(r#"{"clause_lookahead_secs": -1.0}"#).unwrap_err(),
        MorphcastError::Validation(_)
    ));
}

#[test]
fn zero_morph_duration_is_rejected() {
    let err = PlaybackConfig::from_json(r#"{"morph_duration_ms": 0}"#).unwrap_err();
    assert!(matches!(err, MorphcastError::Validation(_)));
    assert!(err.to_string().contains("morph_duration_ms"));

    // A zero pause between stages is a legitimate choice.
    let cfg = PlaybackConfig::from_json(r#"{"stage_pause_ms": 0}"#).unwrap();
    assert_eq!(cfg.stage_pause(), Duration::ZERO);
}

use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MorphcastError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        MorphcastError::diagram("x")
            .to_string()
            .contains("diagram error:")
    );
    assert!(MorphcastError::color("x").to_string().contains("color error:"));
    assert!(
        MorphcastError::narration("x")
            .to_string()
            .contains("narration error:")
    );
    assert!(
        MorphcastError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        MorphcastError::render("x")
            .to_string()
            .contains("render error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MorphcastError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: MorphcastError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, MorphcastError::Serde(_)));
}

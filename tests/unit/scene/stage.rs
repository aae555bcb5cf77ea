use super::*;
use serde_json::json;

fn doc(stages: serde_json::Value) -> String {
    json!({ "stages": stages }).to_string()
}

#[test]
fn loads_and_orders_stages_by_index() {
    let json = doc(json!([
        { "stageIndex": 2, "title": "Compression", "script": "Squeeze.",
          "svg": "<svg><circle id=\"p\" r=\"2\"/></svg>" },
        { "stageIndex": 1, "title": "Intake", "script": "Air flows in.",
          "svg": "<svg><circle id=\"p\" r=\"1\"/></svg>" }
    ]));
    let stages = load_stages_json(&json).unwrap();
    assert_eq!(stages.len(), 2);
    assert_eq!(stages[0].index, 1);
    assert_eq!(stages[0].title, "Intake");
    assert_eq!(stages[1].script, "Squeeze.");
    assert!(stages[1].diagram.find("p").is_some());
}

#[test]
fn malformed_diagram_names_the_stage() {
    let json = doc(json!([
        { "stageIndex": 3, "title": "t", "script": "s",
          "svg": "<svg><circle r=\"1\" fill=\"blue\"/></svg>" }
    ]));
    let err = load_stages_json(&json).unwrap_err();
    assert!(matches!(err, MorphcastError::Color(_)));
    assert!(err.to_string().contains("stage 3"), "{err}");
}

#[test]
fn rejects_empty_duplicate_and_malformed_documents() {
    assert!(matches!(
        load_stages_json(&doc(json!([]))).unwrap_err(),
        MorphcastError::Validation(_)
    ));

    let dup = doc(json!([
        { "stageIndex": 1, "title": "a", "script": "a", "svg": "<svg/>" },
        { "stageIndex": 1, "title": "b", "script": "b", "svg": "<svg/>" }
    ]));
    assert!(matches!(
        load_stages_json(&dup).unwrap_err(),
        MorphcastError::Validation(_)
    ));

    assert!(matches!(
        load_stages_json("{\"stages\": [{\"title\": 1}]}").unwrap_err(),
        MorphcastError::Serde(_)
    ));
}

#[test]
fn reader_and_string_loading_agree() {
    let json = doc(json!([
        { "stageIndex": 1, "title": "a", "script": "a.", "svg": "<svg><rect width=\"1\" height=\"1\"/></svg>" }
    ]));
    assert_eq!(
        load_stages_reader(json.as_bytes()).unwrap(),
        load_stages_json(&json).unwrap()
    );
}

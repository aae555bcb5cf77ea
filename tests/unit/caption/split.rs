use super::*;

#[test]
fn clauses_split_on_the_full_punctuation_set() {
    assert_eq!(split_into_clauses("A, B. C!"), vec!["A,", "B.", "C!"]);
    assert_eq!(
        split_into_clauses("Fuel enters; the spark fires: boom? Yes."),
        vec!["Fuel enters;", "the spark fires:", "boom?", "Yes."]
    );
}

#[test]
fn sentences_ignore_clause_punctuation() {
    assert_eq!(
        split_into_sentences("Air flows in, slowly. Then it burns! Why? Heat."),
        vec!["Air flows in, slowly.", "Then it burns!", "Why?", "Heat."]
    );
}

#[test]
fn punctuation_without_following_whitespace_does_not_split() {
    assert_eq!(split_into_clauses("3.14 is pi,no space"), vec!["3.14 is pi,no space"]);
    assert_eq!(split_into_sentences("Wait... what?"), vec!["Wait...", "what?"]);
}

#[test]
fn whitespace_runs_and_edges_are_trimmed() {
    assert_eq!(
        split_into_clauses("  First,\n\n  second.   "),
        vec!["First,", "second."]
    );
    assert!(split_into_clauses("").is_empty());
    assert!(split_into_sentences("   \t ").is_empty());
}

#[test]
fn non_ascii_text_is_split_on_char_boundaries() {
    assert_eq!(
        split_into_clauses("Café, crème brûlée. Über!"),
        vec!["Café,", "crème brûlée.", "Über!"]
    );
}

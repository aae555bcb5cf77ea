use regex::Regex;
use std::sync::LazyLock;

// The terminal punctuation is ASCII, so a match's first byte is always the mark itself.
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("sentence break pattern is valid"));
static CLAUSE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?:;,]\s+").expect("clause break pattern is valid"));

/// Split narration into sentences at whitespace following `.`, `!` or `?`.
///
/// Pieces are trimmed and empty pieces dropped. Used for paragraph grouping only.
pub fn split_into_sentences(text: &str) -> Vec<String> {
    split_after_marks(text, &SENTENCE_BREAK)
}

/// Split narration into clauses at whitespace following any of `. ! ? : ; ,`.
///
/// Clauses are the caption timing granularity.
pub fn split_into_clauses(text: &str) -> Vec<String> {
    split_after_marks(text, &CLAUSE_BREAK)
}

fn split_after_marks(text: &str, breaks: &Regex) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for m in breaks.find_iter(text) {
        pieces.push(&text[start..m.start() + 1]);
        start = m.end();
    }
    pieces.push(&text[start..]);

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/caption/split.rs"]
mod tests;

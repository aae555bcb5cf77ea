use crate::caption::split::{split_into_clauses, split_into_sentences};
use crate::caption::timing::{active_clause, calculate_clause_timings_with_floor};
use std::collections::HashMap;
use std::ops::Range;
use std::sync::Arc;

/// One timed clause of a stage script.
#[derive(Clone, Debug, PartialEq)]
pub struct Clause {
    /// Clause text, trimmed.
    pub text: String,
    /// Start offset in seconds from the beginning of the stage's narration segment.
    pub start: f64,
}

/// A sentence and the contiguous clause indices it contains.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sentence {
    /// Sentence text, trimmed.
    pub text: String,
    /// Indices into [`CaptionTrack::clauses`].
    pub clauses: Range<usize>,
}

/// Highlight state of a clause relative to the active one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseState {
    /// Already narrated.
    Spoken,
    /// Being narrated now.
    Active,
    /// Not reached yet.
    Upcoming,
}

/// Timed caption layout for one stage script over one segment duration.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionTrack {
    clauses: Vec<Clause>,
    offsets: Vec<f64>,
    sentences: Vec<Sentence>,
    duration: f64,
}

impl CaptionTrack {
    /// Split `script` into clauses timed across `duration` seconds and group them by sentence.
    pub fn build(script: &str, duration: f64, weight_floor: usize) -> Self {
        let texts = split_into_clauses(script);
        let offsets = calculate_clause_timings_with_floor(&texts, duration, weight_floor);
        let clauses: Vec<Clause> = texts
            .into_iter()
            .zip(offsets.iter().copied())
            .map(|(text, start)| Clause { text, start })
            .collect();

        // Sentence breaks are a subset of clause breaks, so each sentence owns a whole run of
        // clauses.
        let mut sentences = Vec::new();
        let mut next = 0;
        for text in split_into_sentences(script) {
            let n = split_into_clauses(&text).len();
            let end = (next + n).min(clauses.len());
            sentences.push(Sentence {
                text,
                clauses: next..end,
            });
            next = end;
        }

        Self {
            clauses,
            offsets,
            sentences,
            duration,
        }
    }

    /// Clauses in narration order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Clause start offsets, parallel to [`CaptionTrack::clauses`].
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    /// Sentences in narration order.
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Segment duration the offsets were computed for.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Clause being spoken `elapsed` seconds into the segment.
    pub fn active_clause(&self, elapsed: f64) -> Option<usize> {
        active_clause(&self.offsets, elapsed)
    }

    /// Sentence containing clause `clause`.
    pub fn sentence_of(&self, clause: usize) -> Option<usize> {
        self.sentences
            .iter()
            .position(|s| s.clauses.contains(&clause))
    }

    /// Highlight state of clause `index` while `active` is being spoken.
    pub fn clause_state(&self, index: usize, active: Option<usize>) -> ClauseState {
        match active {
            Some(a) if index < a => ClauseState::Spoken,
            Some(a) if index == a => ClauseState::Active,
            _ => ClauseState::Upcoming,
        }
    }
}

/// Memoizes caption tracks per (script, duration).
///
/// Building is deterministic, so the cache only saves work.
#[derive(Debug, Default)]
pub struct CaptionCache {
    weight_floor: usize,
    tracks: HashMap<(String, u64), Arc<CaptionTrack>>,
}

impl CaptionCache {
    /// Create a cache building tracks with `weight_floor`.
    pub fn new(weight_floor: usize) -> Self {
        Self {
            weight_floor,
            tracks: HashMap::new(),
        }
    }

    /// Cached track for `script` over `duration`, building it on first use.
    pub fn track(&mut self, script: &str, duration: f64) -> Arc<CaptionTrack> {
        let floor = self.weight_floor;
        Arc::clone(
            self.tracks
                .entry((script.to_owned(), duration.to_bits()))
                .or_insert_with(|| Arc::new(CaptionTrack::build(script, duration, floor))),
        )
    }

    /// Number of cached tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Return `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Drop every cached track.
    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/caption/track.rs"]
mod tests;

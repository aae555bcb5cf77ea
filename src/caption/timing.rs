/// Minimum weight a clause contributes, in characters.
pub const DEFAULT_CLAUSE_WEIGHT_FLOOR: usize = 10;

/// Start offsets (seconds into the segment) for each clause, using the default weight floor.
pub fn calculate_clause_timings<S: AsRef<str>>(clauses: &[S], total_duration: f64) -> Vec<f64> {
    calculate_clause_timings_with_floor(clauses, total_duration, DEFAULT_CLAUSE_WEIGHT_FLOOR)
}

/// Start offsets for each clause, each clause weighted by `max(char count, floor)`.
///
/// `offset[i] = total_duration * (sum of weights before i) / (sum of all weights)`, so offsets
/// start at 0 and never decrease. Text length stands in for speaking time; the result is a
/// deterministic approximation, not an acoustic alignment.
pub fn calculate_clause_timings_with_floor<S: AsRef<str>>(
    clauses: &[S],
    total_duration: f64,
    floor: usize,
) -> Vec<f64> {
    let weights: Vec<usize> = clauses
        .iter()
        .map(|c| c.as_ref().chars().count().max(floor))
        .collect();
    let total_weight: usize = weights.iter().sum();
    if total_weight == 0 {
        return vec![0.0; clauses.len()];
    }

    let mut offsets = Vec::with_capacity(weights.len());
    let mut before = 0usize;
    for w in weights {
        offsets.push(total_duration * before as f64 / total_weight as f64);
        before += w;
    }
    offsets
}

/// Index of the clause being spoken at `elapsed` seconds into the segment.
///
/// This is the largest `i` with `offsets[i] <= elapsed`; `None` means nothing is highlighted yet.
pub fn active_clause(offsets: &[f64], elapsed: f64) -> Option<usize> {
    offsets.partition_point(|&o| o <= elapsed).checked_sub(1)
}

#[cfg(test)]
#[path = "../../tests/unit/caption/timing.rs"]
mod tests;

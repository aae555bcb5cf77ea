use crate::animation::ease::Ease;
use crate::caption::timing::DEFAULT_CLAUSE_WEIGHT_FLOOR;
use crate::foundation::error::{MorphcastError, MorphcastResult};
use std::time::Duration;

/// Tunables for morphing, polling and caption timing.
///
/// The inter-stage pause, clause lookahead, weight floor and easing curve are empirical choices;
/// they are exposed here rather than fixed.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaybackConfig {
    /// Wall-clock length of a diagram morph.
    pub morph_duration_ms: u64,
    /// Cadence of the per-frame morph callback.
    pub frame_interval_ms: u64,
    /// Cadence of the progress/caption poll.
    pub poll_interval_ms: u64,
    /// Pause between the end of one stage's narration and the start of the next.
    pub stage_pause_ms: u64,
    /// Added to the in-segment time before clause lookup, compensating for poll lag.
    pub clause_lookahead_secs: f64,
    /// Minimum clause weight, in characters.
    pub clause_weight_floor: usize,
    /// Morph easing curve.
    pub ease: Ease,
    /// How long the playhead may sit still before the segment counts as finished.
    pub stall_timeout_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            morph_duration_ms: 1500,
            frame_interval_ms: 16,
            poll_interval_ms: 30,
            stage_pause_ms: 500,
            clause_lookahead_secs: 0.1,
            clause_weight_floor: DEFAULT_CLAUSE_WEIGHT_FLOOR,
            ease: Ease::InOutCubic,
            stall_timeout_ms: 1000,
        }
    }
}

impl PlaybackConfig {
    /// Parse a (possibly partial) JSON config; missing fields take defaults.
    pub fn from_json(json: &str) -> MorphcastResult<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject intervals that would stall the timer loops and zero-length morphs.
    ///
    /// Hosts wanting a hard cut pass `animate = false` to the morph engine instead.
    pub fn validate(&self) -> MorphcastResult<()> {
        if self.morph_duration_ms == 0 {
            return Err(MorphcastError::validation("morph_duration_ms must be > 0"));
        }
        if self.frame_interval_ms == 0 {
            return Err(MorphcastError::validation("frame_interval_ms must be > 0"));
        }
        if self.poll_interval_ms == 0 {
            return Err(MorphcastError::validation("poll_interval_ms must be > 0"));
        }
        if !self.clause_lookahead_secs.is_finite() || self.clause_lookahead_secs < 0.0 {
            return Err(MorphcastError::validation(
                "clause_lookahead_secs must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Morph length as a [`Duration`].
    pub fn morph_duration(&self) -> Duration {
        Duration::from_millis(self.morph_duration_ms)
    }

    /// Frame interval as a [`Duration`].
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Poll interval as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Stall timeout as a [`Duration`].
    pub fn stall_timeout(&self) -> Duration {
        Duration::from_millis(self.stall_timeout_ms)
    }

    /// Inter-stage pause as a [`Duration`].
    pub fn stage_pause(&self) -> Duration {
        Duration::from_millis(self.stage_pause_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/config.rs"]
mod tests;

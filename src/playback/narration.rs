use crate::foundation::error::{MorphcastError, MorphcastResult};
use serde::{Deserialize, Serialize};

/// One stage's slice of the shared narration track, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrationSegment {
    /// Track position where the stage's narration begins.
    pub start_time: f64,
    /// Track position where it ends.
    pub end_time: f64,
    /// Speaking duration used for progress and caption timing.
    pub duration: f64,
}

impl NarrationSegment {
    /// Build a segment spanning `[start_time, end_time]`.
    pub fn new(start_time: f64, end_time: f64) -> Self {
        Self {
            start_time,
            end_time,
            duration: end_time - start_time,
        }
    }

    fn validate(&self, index: usize) -> MorphcastResult<()> {
        let finite = self.start_time.is_finite()
            && self.end_time.is_finite()
            && self.duration.is_finite();
        if !finite || self.end_time < self.start_time || self.duration <= 0.0 {
            return Err(MorphcastError::validation(format!(
                "narration segment {index} is invalid: start={} end={} duration={}",
                self.start_time, self.end_time, self.duration
            )));
        }
        Ok(())
    }
}

/// Opaque reference to the combined narration audio (URL, path or encoded payload).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioTrack(pub String);

/// Narration produced for a stage sequence: one audio track plus one segment per stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Narration {
    /// Combined audio for every stage.
    pub audio: AudioTrack,
    /// Per-stage segments, in stage order.
    pub segments: Vec<NarrationSegment>,
}

impl Narration {
    /// Parse a narration document (`{"audio": ..., "segments": [...]}`).
    pub fn from_json(json: &str) -> MorphcastResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check every segment and that there is one for each of `stage_count` stages.
    pub fn validate(&self, stage_count: usize) -> MorphcastResult<()> {
        if self.segments.len() < stage_count {
            return Err(MorphcastError::validation(format!(
                "narration has {} segments for {stage_count} stages",
                self.segments.len()
            )));
        }
        for (i, seg) in self.segments.iter().enumerate() {
            seg.validate(i)?;
        }
        Ok(())
    }
}

/// Availability of narration for the current session.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum NarrationStatus {
    /// Still being generated; `play()` is a no-op.
    #[default]
    Pending,
    /// Ready to play.
    Ready(Narration),
    /// Generation failed; `play()` reports the message.
    Failed(String),
}

impl From<MorphcastResult<Narration>> for NarrationStatus {
    fn from(result: MorphcastResult<Narration>) -> Self {
        match result {
            Ok(n) => Self::Ready(n),
            Err(MorphcastError::Narration(msg)) => Self::Failed(msg),
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/narration.rs"]
mod tests;

use crate::foundation::error::MorphcastResult;
use crate::playback::narration::AudioTrack;
use std::time::Duration;

/// A playable handle on the combined narration track.
///
/// `now` is the host clock; real devices may ignore it and report their own position.
pub trait AudioOutput {
    /// Move the playhead to `secs` into the track.
    fn seek(&mut self, secs: f64, now: Duration);
    /// Start or resume playback.
    fn play(&mut self, now: Duration);
    /// Pause playback, keeping the playhead.
    fn pause(&mut self, now: Duration);
    /// Playhead position in seconds.
    fn position(&self, now: Duration) -> f64;
}

/// Opens audio outputs for narration tracks.
pub trait AudioDevice {
    /// Output type produced by this device.
    type Output: AudioOutput;

    /// Open `track` for playback.
    fn open(&mut self, track: &AudioTrack) -> MorphcastResult<Self::Output>;
}

/// Device producing [`SimulatedAudio`] outputs that advance with the host clock.
#[derive(Clone, Debug, Default)]
pub struct SimulatedDevice {
    length: Option<f64>,
    opened: usize,
}

impl SimulatedDevice {
    /// Device whose tracks stop advancing at `length` seconds.
    pub fn with_length(length: f64) -> Self {
        Self {
            length: Some(length),
            opened: 0,
        }
    }

    /// Number of outputs opened so far.
    pub fn opened(&self) -> usize {
        self.opened
    }
}

impl AudioDevice for SimulatedDevice {
    type Output = SimulatedAudio;

    fn open(&mut self, track: &AudioTrack) -> MorphcastResult<SimulatedAudio> {
        self.opened += 1;
        tracing::debug!(track = %track.0, "opened simulated audio");
        Ok(SimulatedAudio {
            length: self.length,
            ..SimulatedAudio::default()
        })
    }
}

/// Clock-driven stand-in for an audio element.
#[derive(Clone, Debug, Default)]
pub struct SimulatedAudio {
    anchor_position: f64,
    playing_since: Option<Duration>,
    length: Option<f64>,
    seeks: Vec<f64>,
}

impl SimulatedAudio {
    /// Return `true` while playing.
    pub fn is_playing(&self) -> bool {
        self.playing_since.is_some()
    }

    /// Every position passed to `seek`, in order.
    pub fn seeks(&self) -> &[f64] {
        &self.seeks
    }
}

impl AudioOutput for SimulatedAudio {
    fn seek(&mut self, secs: f64, now: Duration) {
        self.anchor_position = secs;
        if self.playing_since.is_some() {
            self.playing_since = Some(now);
        }
        self.seeks.push(secs);
    }

    fn play(&mut self, now: Duration) {
        if self.playing_since.is_none() {
            self.playing_since = Some(now);
        }
    }

    fn pause(&mut self, now: Duration) {
        self.anchor_position = self.position(now);
        self.playing_since = None;
    }

    fn position(&self, now: Duration) -> f64 {
        let played = self
            .playing_since
            .map(|since| now.saturating_sub(since).as_secs_f64())
            .unwrap_or(0.0);
        let pos = self.anchor_position + played;
        match self.length {
            Some(len) => pos.min(len),
            None => pos,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/audio.rs"]
mod tests;

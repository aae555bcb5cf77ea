use crate::caption::track::{CaptionCache, CaptionTrack};
use crate::foundation::error::{MorphcastError, MorphcastResult};
use crate::morph::engine::{AnimationId, FrameStatus, MorphEngine};
use crate::playback::audio::{AudioDevice, AudioOutput};
use crate::playback::config::PlaybackConfig;
use crate::playback::narration::{AudioTrack, Narration, NarrationSegment, NarrationStatus};
use crate::playback::state::{PlaybackEvent, PlaybackSnapshot, PlaybackState};
use crate::playback::timer::{TimerHandle, TimerQueue};
use crate::scene::stage::Stage;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Copy, Debug)]
enum Task {
    MorphFrame(AnimationId),
    Poll { generation: u64 },
    NextStage { generation: u64, stage: usize },
}

/// Drives stage-by-stage narration, diagram morphs and caption highlighting.
///
/// Single-threaded and clock-agnostic: the host reports time through [`PlaybackController::play`],
/// [`PlaybackController::stop`] and [`PlaybackController::advance_to`], and may sleep until
/// [`PlaybackController::next_deadline`]. Every timer carries the segment generation that
/// scheduled it, so a callback from a stopped or superseded segment does nothing.
pub struct PlaybackController<D: AudioDevice> {
    config: PlaybackConfig,
    stages: Vec<Stage>,
    narration: NarrationStatus,
    device: D,
    audio: Option<D::Output>,
    audio_track: Option<AudioTrack>,
    morph: MorphEngine,
    captions: CaptionCache,
    track: Option<Arc<CaptionTrack>>,

    timers: TimerQueue<Task>,
    poll_timer: Option<TimerHandle>,
    frame_timer: Option<TimerHandle>,
    advance_timer: Option<TimerHandle>,
    generation: u64,

    state: PlaybackState,
    stage_index: usize,
    progress: f64,
    active_clause: Option<usize>,
    last_position: Option<f64>,
    stalled_since: Option<Duration>,
    events: Vec<PlaybackEvent>,
    now: Duration,
}

impl<D: AudioDevice> PlaybackController<D> {
    /// Create an idle controller with no stages.
    pub fn new(config: PlaybackConfig, device: D) -> MorphcastResult<Self> {
        config.validate()?;
        Ok(Self {
            morph: MorphEngine::new(config.morph_duration(), config.ease),
            captions: CaptionCache::new(config.clause_weight_floor),
            config,
            stages: Vec::new(),
            narration: NarrationStatus::Pending,
            device,
            audio: None,
            audio_track: None,
            track: None,
            timers: TimerQueue::default(),
            poll_timer: None,
            frame_timer: None,
            advance_timer: None,
            generation: 0,
            state: PlaybackState::Idle,
            stage_index: 0,
            progress: 0.0,
            active_clause: None,
            last_position: None,
            stalled_since: None,
            events: Vec::new(),
            now: Duration::ZERO,
        })
    }

    /// Start a fresh session with `stages`, discarding narration, audio, captions and display.
    pub fn load_stages(&mut self, stages: Vec<Stage>) {
        self.stop(self.now);
        self.stages = stages;
        self.narration = NarrationStatus::Pending;
        self.audio = None;
        self.audio_track = None;
        self.track = None;
        self.captions.clear();
        self.morph = MorphEngine::new(self.config.morph_duration(), self.config.ease);
    }

    /// Record the outcome of narration generation for the current stages.
    ///
    /// Replacing narration mid-run stops playback; the next `play()` starts a new run on the new
    /// track.
    pub fn set_narration(&mut self, result: MorphcastResult<Narration>) {
        self.stop(self.now);
        if let Err(e) = &result {
            tracing::warn!(error = %e, "narration unavailable");
        }
        self.narration = result.into();
    }

    /// Start playback from the first stage.
    ///
    /// Returns `Ok(false)` without doing anything when already playing, when there are no stages
    /// or while narration is still pending. A failed or inconsistent narration is an error.
    #[tracing::instrument(skip(self))]
    pub fn play(&mut self, now: Duration) -> MorphcastResult<bool> {
        self.now = self.now.max(now);
        if self.snapshot().is_playing() || self.stages.is_empty() {
            return Ok(false);
        }
        let narration = match &self.narration {
            NarrationStatus::Pending => return Ok(false),
            NarrationStatus::Failed(msg) => return Err(MorphcastError::narration(msg.clone())),
            NarrationStatus::Ready(n) => n,
        };
        narration.validate(self.stages.len())?;

        if self.audio.is_none() || self.audio_track.as_ref() != Some(&narration.audio) {
            self.audio = Some(self.device.open(&narration.audio)?);
            self.audio_track = Some(narration.audio.clone());
        }

        self.stage_index = 0;
        self.state = PlaybackState::Playing { stage: 0 };
        self.events.push(PlaybackEvent::Started);
        self.play_segment(0, self.now)
    }

    /// Stop playback: pause audio, cancel every timer and any in-flight morph, rewind to stage 0.
    pub fn stop(&mut self, now: Duration) {
        self.now = self.now.max(now);
        let was_playing = self.snapshot().is_playing();

        if let Some(audio) = self.audio.as_mut() {
            audio.pause(self.now);
        }
        for handle in [
            self.poll_timer.take(),
            self.frame_timer.take(),
            self.advance_timer.take(),
        ]
        .into_iter()
        .flatten()
        {
            self.timers.cancel(handle);
        }
        self.morph.cancel();
        self.generation += 1;

        self.state = PlaybackState::Idle;
        self.stage_index = 0;
        self.progress = 0.0;
        self.active_clause = None;
        if was_playing {
            tracing::info!("playback stopped");
            self.events.push(PlaybackEvent::Stopped);
        }
    }

    /// Run every timer due at or before `now`, in deadline order.
    pub fn advance_to(&mut self, now: Duration) -> MorphcastResult<()> {
        while let Some((due, task)) = self.timers.pop_due(now) {
            self.now = self.now.max(due);
            match task {
                Task::MorphFrame(id) => self.on_morph_frame(id, due),
                Task::Poll { generation } => self.on_poll(generation, due),
                Task::NextStage { generation, stage } => {
                    self.on_next_stage(generation, stage, due)?
                }
            }
        }
        self.now = self.now.max(now);
        Ok(())
    }

    /// Earliest pending timer deadline, for hosts that sleep between callbacks.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_due()
    }

    /// Current observable state.
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            state: self.state,
            stage_index: self.stage_index,
            progress_percent: self.progress,
            active_clause: self.active_clause,
        }
    }

    /// Take every event recorded since the last call.
    ///
    /// Events accumulate until drained. Back-to-back progress updates are merged into one, so an
    /// undrained queue grows with state changes rather than with poll ticks.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.events)
    }

    /// Loaded stages.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Morph engine owning the displayed diagram.
    pub fn morph(&self) -> &MorphEngine {
        &self.morph
    }

    /// Caption track of the stage being narrated.
    pub fn caption_track(&self) -> Option<&CaptionTrack> {
        self.track.as_deref()
    }

    /// Audio output, once opened by the first `play()` of the session.
    pub fn audio(&self) -> Option<&D::Output> {
        self.audio.as_ref()
    }

    /// Audio device.
    pub fn device(&self) -> &D {
        &self.device
    }

    fn segment(&self, stage: usize) -> MorphcastResult<NarrationSegment> {
        match &self.narration {
            NarrationStatus::Ready(n) => n.segments.get(stage).copied().ok_or_else(|| {
                MorphcastError::validation(format!("no narration segment for stage {stage}"))
            }),
            _ => Err(MorphcastError::validation("narration is not ready")),
        }
    }

    #[tracing::instrument(skip(self))]
    fn play_segment(&mut self, stage: usize, now: Duration) -> MorphcastResult<bool> {
        let segment = self.segment(stage)?;
        let Some(current) = self.stages.get(stage) else {
            return Err(MorphcastError::validation(format!("no stage {stage}")));
        };
        let diagram = current.diagram.clone();
        let track = self.captions.track(&current.script, segment.duration);
        tracing::info!(stage, title = %current.title, "stage started");

        self.generation += 1;
        let generation = self.generation;

        let animated = stage > 0;
        if let Some(handle) = self.frame_timer.take() {
            self.timers.cancel(handle);
        }
        if let Some(id) = self.morph.display(diagram, animated) {
            self.frame_timer = Some(
                self.timers
                    .schedule(now + self.config.frame_interval(), Task::MorphFrame(id)),
            );
        }
        self.events.push(PlaybackEvent::StageStarted { stage, animated });

        self.track = Some(track);
        self.progress = 0.0;
        self.active_clause = None;
        self.last_position = None;
        self.stalled_since = None;

        if let Some(audio) = self.audio.as_mut() {
            audio.seek(segment.start_time, now);
            audio.play(now);
        }

        self.poll_timer = Some(
            self.timers
                .schedule(now + self.config.poll_interval(), Task::Poll { generation }),
        );
        Ok(true)
    }

    fn on_morph_frame(&mut self, id: AnimationId, at: Duration) {
        self.frame_timer = None;
        if let FrameStatus::Running { .. } = self.morph.frame(id, at) {
            self.frame_timer = Some(
                self.timers
                    .schedule(at + self.config.frame_interval(), Task::MorphFrame(id)),
            );
        }
    }

    fn on_poll(&mut self, generation: u64, at: Duration) {
        if generation != self.generation {
            return;
        }
        let PlaybackState::Playing { stage } = self.state else {
            return;
        };
        self.poll_timer = None;
        let (Ok(segment), Some(audio)) = (self.segment(stage), self.audio.as_ref()) else {
            tracing::warn!(stage, "narration or audio went away mid-stage; stopping");
            self.stop(at);
            return;
        };
        let position = audio.position(at);
        let stalled = self.audio_stalled(position, at);

        let fraction = (position - segment.start_time) / segment.duration;
        self.progress = fraction.clamp(0.0, 1.0) * 100.0;
        self.push_progress(stage);

        let time_in_segment = position - segment.start_time + self.config.clause_lookahead_secs;
        let clause = self
            .track
            .as_ref()
            .and_then(|t| t.active_clause(time_in_segment));
        self.set_active_clause(stage, clause);

        if stalled {
            tracing::warn!(stage, position, "audio stopped short of the segment end");
        }
        if position < segment.end_time && !stalled {
            self.poll_timer = Some(
                self.timers
                    .schedule(at + self.config.poll_interval(), Task::Poll { generation }),
            );
            return;
        }

        self.progress = 100.0;
        self.set_active_clause(stage, None);
        self.events.push(PlaybackEvent::StageFinished { stage });

        let next = stage + 1;
        if next < self.stages.len() {
            self.advance_timer = Some(self.timers.schedule(
                at + self.config.stage_pause(),
                Task::NextStage {
                    generation,
                    stage: next,
                },
            ));
            return;
        }

        if let Some(audio) = self.audio.as_mut() {
            audio.pause(at);
        }
        self.state = PlaybackState::Idle;
        tracing::info!(stages = self.stages.len(), "playback complete");
        self.events.push(PlaybackEvent::Completed);
    }

    fn on_next_stage(
        &mut self,
        generation: u64,
        stage: usize,
        at: Duration,
    ) -> MorphcastResult<()> {
        if generation != self.generation || !self.snapshot().is_playing() {
            return Ok(());
        }
        self.advance_timer = None;
        if let Err(e) = self.segment(stage) {
            self.stop(at);
            return Err(e);
        }
        self.stage_index = stage;
        self.state = PlaybackState::Playing { stage };
        self.play_segment(stage, at)?;
        Ok(())
    }

    /// Return `true` once the playhead has not moved for the configured stall timeout.
    fn audio_stalled(&mut self, position: f64, at: Duration) -> bool {
        let advanced = self.last_position.is_none_or(|last| position > last);
        self.last_position = Some(position);
        if advanced {
            self.stalled_since = None;
            return false;
        }
        let since = *self.stalled_since.get_or_insert(at);
        at.saturating_sub(since) >= self.config.stall_timeout()
    }

    fn push_progress(&mut self, stage: usize) {
        let percent = self.progress;
        if let Some(PlaybackEvent::Progress { stage: last, percent: p }) = self.events.last_mut()
            && *last == stage
        {
            *p = percent;
            return;
        }
        self.events.push(PlaybackEvent::Progress { stage, percent });
    }

    fn set_active_clause(&mut self, stage: usize, clause: Option<usize>) {
        if self.active_clause != clause {
            self.active_clause = clause;
            self.events.push(PlaybackEvent::ClauseChanged { stage, clause });
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/controller.rs"]
mod tests;

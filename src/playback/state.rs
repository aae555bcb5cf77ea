/// Controller state. There is no paused state: stopping always rewinds to the first stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing playing.
    #[default]
    Idle,
    /// Narrating stage `stage` (0-based), including the pause after its narration.
    Playing {
        /// 0-based stage position.
        stage: usize,
    },
}

/// Observable controller state for the presentation layer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlaybackSnapshot {
    /// Current state.
    pub state: PlaybackState,
    /// 0-based stage position.
    pub stage_index: usize,
    /// Narration progress through the current stage, `0..=100`.
    pub progress_percent: f64,
    /// Clause being spoken; `None` when nothing is highlighted.
    pub active_clause: Option<usize>,
}

impl PlaybackSnapshot {
    /// Return `true` while playing.
    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing { .. })
    }
}

/// State changes, in the order they happened.
#[derive(Clone, Debug, PartialEq)]
pub enum PlaybackEvent {
    /// `play()` started a run from the first stage.
    Started,
    /// A stage's diagram was handed to the morph engine and its narration began.
    StageStarted {
        /// 0-based stage position.
        stage: usize,
        /// Whether the diagram morphs in from the previous one.
        animated: bool,
    },
    /// Poll tick progress update.
    Progress {
        /// 0-based stage position.
        stage: usize,
        /// `0..=100`.
        percent: f64,
    },
    /// The highlighted clause changed.
    ClauseChanged {
        /// 0-based stage position.
        stage: usize,
        /// New active clause.
        clause: Option<usize>,
    },
    /// A stage's narration reached its segment end.
    StageFinished {
        /// 0-based stage position.
        stage: usize,
    },
    /// The last stage finished; the controller is idle.
    Completed,
    /// `stop()` interrupted playback.
    Stopped,
}

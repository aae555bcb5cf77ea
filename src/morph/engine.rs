use crate::animation::ease::Ease;
use crate::diagram::model::Diagram;
use crate::morph::transition::Transition;
use std::time::Duration;

/// Default wall-clock length of one diagram morph.
pub const DEFAULT_MORPH_DURATION: Duration = Duration::from_millis(1500);

/// Identifies one in-flight morph. Frames tagged with a stale id are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimationId(u64);

/// Callback invoked once when a morph reaches its target.
pub type CompletionFn = Box<dyn FnOnce()>;

/// Result of driving one display frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameStatus {
    /// Nothing to animate, or the frame belonged to a finished/cancelled morph.
    Idle,
    /// Attributes were updated to the given eased progress; schedule another frame.
    Running {
        /// Eased progress in `[0, 1)`.
        progress: f64,
    },
    /// The target diagram is now displayed verbatim.
    Completed,
}

struct ActiveMorph {
    id: AnimationId,
    transition: Transition,
    target: Diagram,
    started_at: Option<Duration>,
    on_complete: Option<CompletionFn>,
}

/// Animates the displayed diagram into each new target diagram.
///
/// The engine owns the displayed tree; nothing else mutates it. It holds no clock: the host calls
/// [`MorphEngine::frame`] once per display frame with its current timestamp.
pub struct MorphEngine {
    displayed: Option<Diagram>,
    active: Option<ActiveMorph>,
    duration: Duration,
    ease: Ease,
    next_id: u64,
}

impl Default for MorphEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MORPH_DURATION, Ease::InOutCubic)
    }
}

impl MorphEngine {
    /// Create an engine morphing over `duration` along `ease`.
    pub fn new(duration: Duration, ease: Ease) -> Self {
        Self {
            displayed: None,
            active: None,
            duration,
            ease,
            next_id: 0,
        }
    }

    /// Currently displayed diagram, including mid-morph attribute values.
    pub fn displayed(&self) -> Option<&Diagram> {
        self.displayed.as_ref()
    }

    /// Return `true` while a morph is in flight.
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Id of the in-flight morph, if any.
    pub fn animation_id(&self) -> Option<AnimationId> {
        self.active.as_ref().map(|m| m.id)
    }

    /// Show `diagram`, morphing from the current display when `animate` is set.
    ///
    /// Returns the id the host must pass to [`MorphEngine::frame`], or `None` when the diagram was
    /// shown immediately.
    pub fn display(&mut self, diagram: Diagram, animate: bool) -> Option<AnimationId> {
        self.display_with(diagram, animate, None)
    }

    /// [`MorphEngine::display`] with a callback fired once the target is fully displayed.
    ///
    /// Immediate displays fire the callback before returning. Cancelled morphs never fire it.
    #[tracing::instrument(skip(self, diagram, on_complete))]
    pub fn display_with(
        &mut self,
        diagram: Diagram,
        animate: bool,
        on_complete: Option<CompletionFn>,
    ) -> Option<AnimationId> {
        // A morph still in flight is abandoned where it stands; the new one starts from there.
        self.cancel();

        let Some(current) = self.displayed.as_ref().filter(|_| animate) else {
            self.displayed = Some(diagram);
            if let Some(cb) = on_complete {
                cb();
            }
            return None;
        };

        let transition = Transition::between(current, &diagram);
        tracing::debug!(entries = transition.len(), "morph transition computed");

        let id = AnimationId(self.next_id);
        self.next_id += 1;
        self.active = Some(ActiveMorph {
            id,
            transition,
            target: diagram,
            started_at: None,
            on_complete,
        });
        Some(id)
    }

    /// Advance morph `id` to timestamp `now`.
    ///
    /// The first frame latches the start time. A frame for any id other than the in-flight one is
    /// a no-op returning [`FrameStatus::Idle`].
    pub fn frame(&mut self, id: AnimationId, now: Duration) -> FrameStatus {
        let Some(active) = self.active.as_mut().filter(|m| m.id == id) else {
            return FrameStatus::Idle;
        };
        let started_at = *active.started_at.get_or_insert(now);

        let raw = if self.duration.is_zero() {
            1.0
        } else {
            (now.saturating_sub(started_at).as_secs_f64() / self.duration.as_secs_f64())
                .clamp(0.0, 1.0)
        };

        if raw < 1.0 {
            let progress = self.ease.apply(raw);
            if let Some(displayed) = self.displayed.as_mut() {
                active.transition.apply(displayed, progress);
            }
            return FrameStatus::Running { progress };
        }

        let Some(done) = self.active.take() else {
            return FrameStatus::Idle;
        };
        self.displayed = Some(done.target);
        tracing::debug!(?id, "morph complete");
        if let Some(cb) = done.on_complete {
            cb();
        }
        FrameStatus::Completed
    }

    /// Stop the in-flight morph, leaving the display at its last applied frame. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(active) = self.active.take() {
            tracing::debug!(id = ?active.id, "morph cancelled");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/morph/engine.rs"]
mod tests;

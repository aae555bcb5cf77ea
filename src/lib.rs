//! morphcast plays a narrated, multi-stage process explanation: each stage's SVG diagram morphs
//! into the next while captions highlight clause by clause in step with the narration.
//!
//! The crate has three engines:
//!
//! - **Morph**: [`MorphEngine`] matches primitives across two independently generated diagrams by
//!   identity token and interpolates their geometry, paint and opacity frame by frame.
//! - **Captions**: [`split_into_clauses`], [`calculate_clause_timings`] and [`CaptionTrack`]
//!   subdivide a stage's coarse narration segment into clause-level timings from text length.
//! - **Playback**: [`PlaybackController`] sequences stages, owns the audio handle, polls the
//!   playhead and triggers morphs at stage boundaries.
//!
//! Everything is single-threaded and clock-agnostic: hosts feed timestamps in and render the
//! observable state out.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod caption;
mod diagram;
mod foundation;
mod morph;
mod playback;
mod scene;

/// Diagram rasterization.
pub mod render;

pub use animation::ease::Ease;
pub use animation::lerp::Lerp;
pub use caption::split::{split_into_clauses, split_into_sentences};
pub use caption::timing::{
    DEFAULT_CLAUSE_WEIGHT_FLOOR, active_clause, calculate_clause_timings,
    calculate_clause_timings_with_floor,
};
pub use caption::track::{CaptionCache, CaptionTrack, Clause, ClauseState, Sentence};
pub use diagram::model::{Attr, AttrValue, Diagram, Element, ElementKind, Node, ValueKind};
pub use foundation::core::Rgb8;
pub use foundation::error::{MorphcastError, MorphcastResult};
pub use morph::engine::{
    AnimationId, CompletionFn, DEFAULT_MORPH_DURATION, FrameStatus, MorphEngine,
};
pub use morph::transition::{Transition, TransitionEntry};
pub use playback::audio::{AudioDevice, AudioOutput, SimulatedAudio, SimulatedDevice};
pub use playback::config::PlaybackConfig;
pub use playback::controller::PlaybackController;
pub use playback::narration::{AudioTrack, Narration, NarrationSegment, NarrationStatus};
pub use playback::state::{PlaybackEvent, PlaybackSnapshot, PlaybackState};
pub use playback::timer::{TimerHandle, TimerQueue};
pub use scene::stage::{Stage, load_stages_json, load_stages_reader};

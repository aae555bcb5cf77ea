use super::*;
use crate::playback::audio::SimulatedDevice;
use crate::playback::narration::{AudioTrack, Narration};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn stage(i: u32, cx: u32) -> Stage {
    Stage::new(
        i,
        format!("Stage {i}"),
        "Fuel enters the chamber, the piston rises. Then it fires!",
        &format!(
            r##"<svg viewBox="0 0 100 100"><circle id="p" cx="{cx}" cy="50" r="5" fill="#336699"/></svg>"##
        ),
    )
    .unwrap()
}

fn narration(n: usize) -> Narration {
    Narration {
        audio: AudioTrack("narration.mp3".to_owned()),
        segments: (0..n)
            .map(|i| NarrationSegment::new(i as f64 * 2.0, i as f64 * 2.0 + 2.0))
            .collect(),
    }
}

fn controller(stages: usize) -> PlaybackController<SimulatedDevice> {
    let mut c = PlaybackController::new(PlaybackConfig::default(), SimulatedDevice::default())
        .unwrap();
    c.load_stages((1..=stages as u32).map(|i| stage(i, i * 10)).collect());
    c.set_narration(Ok(narration(stages)));
    c
}

#[test]
fn play_is_a_no_op_without_ready_inputs() {
    let mut c = PlaybackController::new(PlaybackConfig::default(), SimulatedDevice::default())
        .unwrap();
    assert!(!c.play(ms(0)).unwrap());

    c.load_stages(vec![stage(1, 10)]);
    assert!(!c.play(ms(0)).unwrap());
    assert_eq!(c.device().opened(), 0);
    assert!(c.drain_events().is_empty());
    assert_eq!(c.next_deadline(), None);
}

#[test]
fn narration_failure_is_propagated_by_play() {
    let mut c = controller(1);
    c.set_narration(Err(MorphcastError::narration("synthesis failed")));
    let err = c.play(ms(0)).unwrap_err();
    assert!(matches!(err, MorphcastError::Narration(_)));
    assert!(!c.snapshot().is_playing());
}

#[test]
fn too_few_segments_is_a_validation_error() {
    let mut c = controller(2);
    c.set_narration(Ok(narration(1)));
    assert!(matches!(
        c.play(ms(0)).unwrap_err(),
        MorphcastError::Validation(_)
    ));
}

#[test]
fn first_stage_is_shown_without_animation() {
    let mut c = controller(2);
    assert!(c.play(ms(0)).unwrap());
    assert_eq!(
        c.drain_events(),
        vec![
            PlaybackEvent::Started,
            PlaybackEvent::StageStarted {
                stage: 0,
                animated: false
            }
        ]
    );
    assert!(!c.morph().is_animating());
    assert_eq!(c.morph().displayed(), Some(&c.stages()[0].diagram));
    assert_eq!(c.snapshot().state, PlaybackState::Playing { stage: 0 });
    assert!(c.audio().unwrap().is_playing());
    assert_eq!(c.audio().unwrap().seeks(), &[0.0]);
    // A second play while playing changes nothing.
    assert!(!c.play(ms(10)).unwrap());
}

#[test]
fn polling_tracks_progress_and_clauses() {
    let mut c = controller(2);
    c.play(ms(0)).unwrap();
    c.drain_events();

    c.advance_to(ms(990)).unwrap();
    let snap = c.snapshot();
    // Last poll ran at 990ms into a 2s segment.
    assert!((snap.progress_percent - 49.5).abs() < 1e-9);

    let track = c.caption_track().unwrap();
    let expected = track.active_clause(0.99 + 0.1);
    let clause_count = track.clauses().len();
    assert_eq!(snap.active_clause, expected);
    assert_eq!(snap.active_clause, Some(1));

    let events = c.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        PlaybackEvent::ClauseChanged {
            stage: 0,
            clause: Some(0)
        }
    )));
    // Clause changes are only reported on change.
    let changes = events
        .iter()
        .filter(|e| matches!(e, PlaybackEvent::ClauseChanged { .. }))
        .count();
    assert!(changes <= clause_count);
}

#[test]
fn segment_end_pauses_then_morphs_into_the_next_stage() {
    let mut c = controller(2);
    c.play(ms(0)).unwrap();

    // Narration reaches 2.0s on the poll at 2010ms.
    c.advance_to(ms(2010)).unwrap();
    let snap = c.snapshot();
    assert_eq!(snap.progress_percent, 100.0);
    assert_eq!(snap.active_clause, None);
    assert_eq!(snap.state, PlaybackState::Playing { stage: 0 });
    assert!(c.drain_events().contains(&PlaybackEvent::StageFinished { stage: 0 }));

    // Still pausing just before the next stage.
    c.advance_to(ms(2500)).unwrap();
    assert_eq!(c.snapshot().stage_index, 0);

    c.advance_to(ms(2510)).unwrap();
    assert_eq!(c.snapshot().state, PlaybackState::Playing { stage: 1 });
    assert_eq!(c.snapshot().progress_percent, 0.0);
    assert!(c.drain_events().contains(&PlaybackEvent::StageStarted {
        stage: 1,
        animated: true
    }));
    assert!(c.morph().is_animating());
    assert_eq!(c.audio().unwrap().seeks(), &[0.0, 2.0]);

    // The morph settles on the target diagram.
    c.advance_to(ms(2510 + 1600)).unwrap();
    assert!(!c.morph().is_animating());
    assert_eq!(c.morph().displayed(), Some(&c.stages()[1].diagram));
}

#[test]
fn stop_cancels_everything_and_rewinds() {
    let mut c = controller(2);
    c.play(ms(0)).unwrap();
    c.advance_to(ms(2600)).unwrap();
    assert!(c.morph().is_animating());
    c.drain_events();

    c.stop(ms(2700));
    assert_eq!(c.drain_events(), vec![PlaybackEvent::Stopped]);
    assert_eq!(c.next_deadline(), None);
    assert!(!c.morph().is_animating());
    assert!(!c.audio().unwrap().is_playing());

    let snap = c.snapshot();
    assert_eq!(snap.state, PlaybackState::Idle);
    assert_eq!(snap.stage_index, 0);
    assert_eq!(snap.progress_percent, 0.0);
    assert_eq!(snap.active_clause, None);

    c.advance_to(ms(20_000)).unwrap();
    assert!(c.drain_events().is_empty());

    // Stopping again while idle is silent.
    c.stop(ms(20_000));
    assert!(c.drain_events().is_empty());
}

#[test]
fn audio_is_opened_once_per_session() {
    let mut c = controller(1);
    c.play(ms(0)).unwrap();
    c.stop(ms(100));
    c.play(ms(200)).unwrap();
    assert_eq!(c.device().opened(), 1);

    c.load_stages(vec![stage(1, 10)]);
    c.set_narration(Ok(narration(1)));
    assert!(c.audio().is_none());
    c.play(ms(300)).unwrap();
    assert_eq!(c.device().opened(), 2);
}

#[test]
fn replacing_narration_mid_run_stops_playback() {
    let mut c = controller(2);
    c.play(ms(0)).unwrap();
    c.advance_to(ms(500)).unwrap();
    c.drain_events();

    c.set_narration(Err(MorphcastError::narration("regenerating")));
    assert_eq!(c.snapshot().state, PlaybackState::Idle);
    assert_eq!(c.drain_events(), vec![PlaybackEvent::Stopped]);
    assert_eq!(c.next_deadline(), None);

    c.advance_to(ms(60_000)).unwrap();
    assert!(c.drain_events().is_empty());
    assert!(matches!(
        c.play(ms(60_000)).unwrap_err(),
        MorphcastError::Narration(_)
    ));

    c.set_narration(Ok(narration(2)));
    assert!(c.play(ms(61_000)).unwrap());
    assert_eq!(c.snapshot().state, PlaybackState::Playing { stage: 0 });
}

#[test]
fn ready_narration_swapped_mid_run_restarts_from_the_first_stage() {
    let mut c = controller(2);
    c.play(ms(0)).unwrap();
    c.advance_to(ms(2600)).unwrap();
    assert_eq!(c.snapshot().state, PlaybackState::Playing { stage: 1 });

    c.set_narration(Ok(narration(2)));
    assert!(!c.snapshot().is_playing());
    assert!(c.play(ms(2700)).unwrap());
    assert_eq!(c.snapshot().stage_index, 0);
}

#[test]
fn losing_narration_during_a_poll_stops_instead_of_hanging() {
    let mut c = controller(2);
    c.play(ms(0)).unwrap();
    c.drain_events();

    c.narration = NarrationStatus::Pending;
    c.advance_to(ms(100)).unwrap();
    assert_eq!(c.snapshot().state, PlaybackState::Idle);
    assert!(c.drain_events().contains(&PlaybackEvent::Stopped));
    assert_eq!(c.next_deadline(), None);
}

#[test]
fn new_audio_track_opens_a_new_output() {
    let mut c = controller(1);
    c.play(ms(0)).unwrap();
    c.stop(ms(100));

    let mut other = narration(1);
    other.audio = AudioTrack("other.mp3".to_owned());
    c.set_narration(Ok(other.clone()));
    c.play(ms(200)).unwrap();
    assert_eq!(c.device().opened(), 2);
    assert_eq!(c.audio().unwrap().seeks(), &[0.0]);

    // Same track again keeps the open output.
    c.stop(ms(300));
    c.set_narration(Ok(other));
    c.play(ms(400)).unwrap();
    assert_eq!(c.device().opened(), 2);
}

#[test]
fn audio_ending_before_the_segment_end_finishes_the_stage() {
    let mut c = PlaybackController::new(PlaybackConfig::default(), SimulatedDevice::with_length(3.0))
        .unwrap();
    c.load_stages(vec![stage(1, 10), stage(2, 20)]);
    c.set_narration(Ok(narration(2)));
    c.play(ms(0)).unwrap();

    // Stage 1 plays 2.0..4.0 but the track ends at 3.0 (reached around 3510ms).
    c.advance_to(ms(4500)).unwrap();
    assert_eq!(c.snapshot().state, PlaybackState::Playing { stage: 1 });
    assert!((c.snapshot().progress_percent - 50.0).abs() < 1e-9);

    // One second without the playhead moving ends the stage.
    c.advance_to(ms(4600)).unwrap();
    let events = c.drain_events();
    assert!(events.contains(&PlaybackEvent::StageFinished { stage: 1 }));
    assert!(events.contains(&PlaybackEvent::Completed));
    assert_eq!(c.snapshot().state, PlaybackState::Idle);
    assert_eq!(c.next_deadline(), None);
}

#[test]
fn consecutive_progress_updates_are_merged() {
    let mut c = controller(2);
    c.play(ms(0)).unwrap();
    c.advance_to(ms(100)).unwrap();
    c.drain_events();

    // No clause boundary falls between 100ms and 700ms, so only progress changes.
    c.advance_to(ms(700)).unwrap();
    let events = c.drain_events();
    assert_eq!(events.len(), 1, "{events:?}");
    match events[0] {
        PlaybackEvent::Progress { stage, percent } => {
            assert_eq!(stage, 0);
            assert!((percent - 35.0).abs() < 1e-9);
        }
        ref other => panic!("unexpected event {other:?}"),
    }
}

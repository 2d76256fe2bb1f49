//! Deferred restore: engine readiness racing the fallback timer

mod common;

use coherence_core::SessionSnapshot;
use coherence_playback::{ResumeMode, ResumeTrigger, SessionManager};
use common::{track, Harness};
use futures::executor::block_on;

/// Save a playing session, then reload against an engine that is not ready
fn reload_unready(harness: &mut Harness, advance_ms: i64) -> SessionManager {
    let mut manager = harness.with_queue(&["A", "B"]);
    manager.next_track().unwrap();
    harness.set_position(81.0);
    manager.tick();

    harness.engine.0.borrow_mut().ready = false;
    harness.clock.advance(advance_ms);
    harness.reload()
}

#[test]
fn readiness_resolves_pending_resume() {
    let mut harness = Harness::new();
    let mut manager = reload_unready(&mut harness, 600);

    let pending = manager.take_pending_resume().expect("resume should wait for the engine");
    assert_eq!(pending.plan.mode, ResumeMode::AutoPlay);
    assert_eq!(harness.engine.0.borrow().load_calls, 1);
    assert_eq!(harness.engine.0.borrow().position, 0.0);
    assert!(!harness.engine.0.borrow().playing);

    manager.on_engine_ready();
    // The timer fires later and loses
    assert!(!pending.resolver.resolve(ResumeTrigger::TimedOut));

    let trigger = block_on(pending.signal);
    assert_eq!(trigger, ResumeTrigger::Ready);

    manager.complete_resume(&pending.plan, trigger);
    assert!(manager.is_playing());
    assert_eq!(harness.engine.0.borrow().position, 81.0);
    assert_eq!(manager.current_index(), 1);
}

#[test]
fn timeout_forces_resume_attempt() {
    let mut harness = Harness::new();
    let mut manager = reload_unready(&mut harness, 600);
    let pending = manager.take_pending_resume().unwrap();

    assert!(pending.resolver.resolve(ResumeTrigger::TimedOut));
    // Readiness arriving afterwards is discarded
    manager.on_engine_ready();

    let trigger = block_on(pending.signal);
    assert_eq!(trigger, ResumeTrigger::TimedOut);

    manager.complete_resume(&pending.plan, trigger);
    assert!(manager.is_playing());
    assert_eq!(harness.engine.0.borrow().position, 81.0);
}

#[test]
fn older_session_waits_paused() {
    let mut harness = Harness::new();
    let mut manager = reload_unready(&mut harness, 30_000);
    let pending = manager.take_pending_resume().unwrap();
    assert_eq!(pending.plan.mode, ResumeMode::Paused);

    manager.on_engine_ready();
    let trigger = block_on(pending.signal);
    manager.complete_resume(&pending.plan, trigger);

    assert!(!manager.is_playing());
    assert_eq!(harness.engine.0.borrow().play_calls, 0);
    assert_eq!(harness.engine.0.borrow().position, 81.0);
}

#[test]
fn new_track_supersedes_pending_resume() {
    let mut harness = Harness::new();
    let mut manager = reload_unready(&mut harness, 600);
    let pending = manager.take_pending_resume().unwrap();

    manager.play_track(track("Other"), None);
    harness.set_position(3.0);

    manager.on_engine_ready();
    let trigger = block_on(pending.signal);
    manager.complete_resume(&pending.plan, trigger);

    assert_eq!(harness.playing_url().as_deref(), Some("/audio/Other.mp3"));
    assert_eq!(harness.engine.0.borrow().position, 3.0);
}

#[test]
fn leaving_before_resume_keeps_saved_position() {
    let mut harness = Harness::new();
    let mut manager = reload_unready(&mut harness, 600);
    let pending = manager.take_pending_resume().unwrap();

    manager.on_page_hide();

    let snapshot = SessionSnapshot::from_json(&harness.stored().unwrap()).unwrap();
    assert_eq!(snapshot.current_track.map(|t| t.url).as_deref(), Some("/audio/B.mp3"));
    assert_eq!(snapshot.current_time, 81.0);
    assert!(snapshot.is_playing);

    // Once resumed, saves follow the engine again
    manager.on_engine_ready();
    let trigger = block_on(pending.signal);
    manager.complete_resume(&pending.plan, trigger);
    harness.set_position(90.0);
    manager.on_page_hide();

    let snapshot = SessionSnapshot::from_json(&harness.stored().unwrap()).unwrap();
    assert_eq!(snapshot.current_time, 90.0);
}

#[test]
fn leaving_a_paused_restore_saves_it_paused() {
    let mut harness = Harness::new();
    let mut manager = reload_unready(&mut harness, 30_000);

    manager.on_page_hide();

    let snapshot = SessionSnapshot::from_json(&harness.stored().unwrap()).unwrap();
    assert_eq!(snapshot.current_time, 81.0);
    assert!(!snapshot.is_playing);
}

#[test]
fn pending_resume_is_handed_out_once() {
    let mut harness = Harness::new();
    let mut manager = reload_unready(&mut harness, 600);

    assert!(manager.take_pending_resume().is_some());
    assert!(manager.take_pending_resume().is_none());
}

#[test]
fn ready_engine_resumes_without_waiting() {
    let mut harness = Harness::new();
    let mut manager = harness.with_queue(&["A"]);
    manager.tick();
    harness.clock.advance(100);

    let mut restored = harness.reload();

    assert!(restored.take_pending_resume().is_none());
    assert!(restored.is_playing());
}

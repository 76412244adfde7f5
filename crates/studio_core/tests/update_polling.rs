use pretty_assertions::assert_eq;
use studio_core::{update, AppState, ControlState, Effect, Msg, Reply};
use url::Url;

fn fresh_state() -> AppState {
    AppState::new(Url::parse("http://127.0.0.1:5000/video_feed").unwrap())
}

fn running_state() -> AppState {
    let (state, _) = update(fresh_state(), Msg::SelectionChanged("clip1.mp4".to_string()));
    update(state, Msg::StartReplied(Reply::Success)).0
}

#[test]
fn page_open_starts_polling_once() {
    studio_logging::initialize_for_tests();
    let (state, effects) = update(fresh_state(), Msg::PageOpened);
    assert_eq!(effects, vec![Effect::LoadPage, Effect::StartStatusPoll]);

    let (_, effects) = update(state, Msg::PageOpened);
    assert_eq!(effects, vec![Effect::LoadPage]);
}

#[test]
fn saving_status_is_annotated() {
    let (state, effects) = update(running_state(), Msg::StatusPolled("saving".to_string()));

    assert!(effects.is_empty());
    assert_eq!(
        state.view().status_text,
        "Statut: saving (Sauvegarde en cours...)"
    );
    assert_eq!(state.control(), ControlState::Running);
}

#[test]
fn other_statuses_only_update_text() {
    for status in ["idle", "processing", "Completed", ""] {
        let state = running_state();
        let (state, effects) = update(state, Msg::StatusPolled(status.to_string()));
        let view = state.view();

        assert!(effects.is_empty());
        assert_eq!(view.status_text, format!("Statut: {status}"));
        assert_eq!(view.control, ControlState::Running);
        assert!(view.stop_enabled);
    }
}

#[test]
fn completed_forces_idle_from_running() {
    let (state, effects) = update(running_state(), Msg::StatusPolled("completed".to_string()));
    let view = state.view();

    assert!(effects.is_empty());
    assert_eq!(view.control, ControlState::Idle);
    assert!(view.start_enabled);
    assert!(!view.stop_enabled);
    assert_eq!(view.status_text, "Statut: completed");
}

#[test]
fn completed_while_idle_stays_idle() {
    let (state, _) = update(fresh_state(), Msg::StatusPolled("completed".to_string()));
    assert_eq!(state.control(), ControlState::Idle);
    // No selection, so Start stays disabled.
    assert!(!state.view().start_enabled);
}

#[test]
fn repeated_identical_status_does_not_redraw() {
    let (mut state, _) = update(fresh_state(), Msg::StatusPolled("processing".to_string()));
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::StatusPolled("processing".to_string()));
    assert!(!state.consume_dirty());
}

#[test]
fn stale_poll_after_start_keeps_running() {
    // A tick answered before the service noticed the new job.
    let (state, _) = update(running_state(), Msg::StatusPolled("idle".to_string()));
    assert_eq!(state.control(), ControlState::Running);
    assert_eq!(state.view().status_text, "Statut: idle");
}

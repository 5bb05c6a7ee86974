use std::sync::Once;
use std::time::Duration;

use pretty_assertions::assert_eq;
use verifier_core::{
    update, AgentState, CycleId, Effect, ElementInfo, Kind, Msg, PollSettings, UiEvent,
    VerificationRequest, DEFAULT_MAX_ATTEMPTS, EDITOR_NOT_FOUND_MESSAGE, ERROR_HIDE_DELAY,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(verifier_logging::initialize_for_tests);
}

fn ctrl_enter() -> Msg {
    Msg::Ui(UiEvent::key_down("Enter", true, false))
}

fn start_cycle(state: AgentState) -> (AgentState, CycleId) {
    let (state, effects) = update(state, ctrl_enter());
    let cycle = match effects.as_slice() {
        [Effect::StartPolling { cycle, .. }] => *cycle,
        other => panic!("expected a single StartPolling effect, got {other:?}"),
    };
    (state, cycle)
}

fn tick(state: AgentState, cycle: CycleId, text: Option<&str>) -> (AgentState, Vec<Effect>) {
    update(
        state,
        Msg::PollTick {
            cycle,
            text: text.map(str::to_string),
        },
    )
}

#[test]
fn trigger_starts_polling_with_configured_interval() {
    init_logging();
    let settings = PollSettings {
        max_attempts: 3,
        interval: Duration::from_millis(25),
    };
    let (next, effects) = update(AgentState::with_settings(settings), ctrl_enter());

    assert_eq!(
        effects,
        vec![Effect::StartPolling {
            cycle: 1,
            interval: Duration::from_millis(25),
        }]
    );
    assert_eq!(next.view().active_cycles, 1);
}

#[test]
fn unrelated_events_start_nothing() {
    init_logging();
    let state = AgentState::new();
    let (next, effects) = update(state.clone(), Msg::Ui(UiEvent::key_down("Enter", false, false)));
    assert!(effects.is_empty());
    assert_eq!(next, state);

    let (next, effects) = update(
        next,
        Msg::Ui(UiEvent::click(vec![ElementInfo::button("Share")])),
    );
    assert!(effects.is_empty());
    assert_eq!(next.view().active_cycles, 0);
}

#[test]
fn text_found_on_later_tick_sends_exactly_one_request() {
    init_logging();
    let (state, cycle) = start_cycle(AgentState::new());

    let (state, effects) = tick(state, cycle, None);
    assert!(effects.is_empty());
    let (state, effects) = tick(state, cycle, None);
    assert!(effects.is_empty());

    let (state, effects) = tick(state, cycle, Some("\\section{Intro}\n$x^2$"));
    assert_eq!(
        effects,
        vec![
            Effect::StopPolling { cycle },
            Effect::SendRequest(VerificationRequest::new("\\section{Intro}\n$x^2$")),
        ]
    );
    assert_eq!(state.view().requests_sent, 1);
    assert_eq!(state.view().active_cycles, 0);

    // A straggling tick after the cycle finished changes nothing.
    let (state, effects) = tick(state, cycle, Some("late text"));
    assert!(effects.is_empty());
    assert_eq!(state.view().requests_sent, 1);
}

#[test]
fn empty_text_counts_as_editor_not_ready() {
    init_logging();
    let (state, cycle) = start_cycle(AgentState::new());

    let (state, effects) = tick(state, cycle, Some(""));
    assert!(effects.is_empty());
    assert_eq!(state.view().active_cycles, 1);
}

#[test]
fn exhausted_cycle_renders_local_error_without_request() {
    init_logging();
    let settings = PollSettings {
        max_attempts: 3,
        interval: Duration::from_millis(500),
    };
    let (mut state, cycle) = start_cycle(AgentState::with_settings(settings));

    for _ in 0..2 {
        let (next, effects) = tick(state, cycle, None);
        assert!(effects.is_empty());
        state = next;
    }
    let (state, effects) = tick(state, cycle, None);

    assert_eq!(
        effects,
        vec![
            Effect::StopPolling { cycle },
            Effect::ReportEditorMissing { cycle, attempts: 3 },
            Effect::ScheduleDismiss {
                generation: 1,
                after: ERROR_HIDE_DELAY,
            },
        ]
    );
    let view = state.view();
    assert_eq!(view.requests_sent, 0);
    assert_eq!(view.active_cycles, 0);
    let notification = view.notification.expect("notification rendered");
    assert_eq!(notification.kind, Kind::Error);
    assert_eq!(notification.message, EDITOR_NOT_FOUND_MESSAGE);
    assert!(notification.visible);
}

#[test]
fn text_on_the_last_allowed_tick_is_sent_not_exhausted() {
    init_logging();
    let (mut state, cycle) = start_cycle(AgentState::new());

    for _ in 1..DEFAULT_MAX_ATTEMPTS {
        let (next, effects) = tick(state, cycle, None);
        assert!(effects.is_empty());
        state = next;
    }
    let (state, effects) = tick(state, cycle, Some("\\begin{proof}"));

    assert_eq!(
        effects,
        vec![
            Effect::StopPolling { cycle },
            Effect::SendRequest(VerificationRequest::new("\\begin{proof}")),
        ]
    );
    let view = state.view();
    assert_eq!(view.requests_sent, 1);
    assert_eq!(view.active_cycles, 0);
    assert_eq!(view.notification, None);
}

#[test]
fn empty_text_on_every_tick_exhausts_the_cycle() {
    init_logging();
    let (mut state, cycle) = start_cycle(AgentState::new());

    for _ in 1..DEFAULT_MAX_ATTEMPTS {
        let (next, effects) = tick(state, cycle, Some(""));
        assert!(effects.is_empty());
        state = next;
    }
    let (state, effects) = tick(state, cycle, Some(""));

    assert_eq!(
        effects,
        vec![
            Effect::StopPolling { cycle },
            Effect::ReportEditorMissing {
                cycle,
                attempts: DEFAULT_MAX_ATTEMPTS,
            },
            Effect::ScheduleDismiss {
                generation: 1,
                after: ERROR_HIDE_DELAY,
            },
        ]
    );
    let view = state.view();
    assert_eq!(view.requests_sent, 0);
    let notification = view.notification.expect("notification rendered");
    assert_eq!(notification.kind, Kind::Error);
    assert_eq!(notification.message, EDITOR_NOT_FOUND_MESSAGE);
}

#[test]
fn concurrent_cycles_are_independent() {
    init_logging();
    let (state, first) = start_cycle(AgentState::new());
    let (state, second) = start_cycle(state);
    assert_ne!(first, second);
    assert_eq!(state.view().active_cycles, 2);

    let (state, effects) = tick(state, second, Some("b"));
    assert_eq!(
        effects,
        vec![
            Effect::StopPolling { cycle: second },
            Effect::SendRequest(VerificationRequest::new("b")),
        ]
    );

    let (state, _) = tick(state, first, None);
    assert_eq!(state.view().active_cycles, 1);
    let (state, effects) = tick(state, first, Some("a"));
    assert_eq!(
        effects,
        vec![
            Effect::StopPolling { cycle: first },
            Effect::SendRequest(VerificationRequest::new("a")),
        ]
    );
    assert_eq!(state.view().requests_sent, 2);
}

#[test]
fn ticks_for_unknown_cycles_are_ignored() {
    init_logging();
    let state = AgentState::new();
    let (next, effects) = tick(state.clone(), 42, Some("text"));
    assert!(effects.is_empty());
    assert_eq!(next, state);
}

use crate::{classify, AgentState, Effect, FeedbackEvent, Msg, PollOutcome, VerificationRequest};

pub const EDITOR_NOT_FOUND_MESSAGE: &str =
    "Error: Could not find the Overleaf editor. Please try reloading the page.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AgentState, msg: Msg) -> (AgentState, Vec<Effect>) {
    let effects = match msg {
        Msg::Ui(event) => {
            if classify(&event).is_none() {
                return (state, Vec::new());
            }
            // Every trigger gets its own cycle; earlier cycles keep running.
            let cycle = state.start_cycle();
            vec![Effect::StartPolling {
                cycle,
                interval: state.settings().interval,
            }]
        }
        Msg::PollTick { cycle, text } => match state.tick_cycle(cycle, text) {
            PollOutcome::Found(code) => {
                state.record_request_sent();
                vec![
                    Effect::StopPolling { cycle },
                    Effect::SendRequest(VerificationRequest { code }),
                ]
            }
            PollOutcome::Exhausted { attempts } => {
                let (generation, after) =
                    state.show(&FeedbackEvent::error(EDITOR_NOT_FOUND_MESSAGE));
                vec![
                    Effect::StopPolling { cycle },
                    Effect::ReportEditorMissing { cycle, attempts },
                    Effect::ScheduleDismiss { generation, after },
                ]
            }
            PollOutcome::Pending { .. } | PollOutcome::Ignored => Vec::new(),
        },
        Msg::Feedback(event) => {
            let (generation, after) = state.show(&event);
            vec![Effect::ScheduleDismiss { generation, after }]
        }
        Msg::DismissElapsed { generation } => {
            state.dismiss(generation);
            Vec::new()
        }
    };

    (state, effects)
}

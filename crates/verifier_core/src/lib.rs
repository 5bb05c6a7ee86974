//! Verifier core: pure page-agent state machine, protocol payloads and view-model helpers.
mod effect;
mod feedback;
mod msg;
mod poll;
mod protocol;
mod state;
mod trigger;
mod update;
mod view_model;

pub use effect::Effect;
pub use feedback::{hide_delay, Notification, Treatment, DEFAULT_HIDE_DELAY, ERROR_HIDE_DELAY};
pub use msg::Msg;
pub use poll::{
    PollCycle, PollOutcome, PollSettings, DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL,
};
pub use protocol::{
    FeedbackEvent, Kind, Message, VerificationRequest, ACTION_DISPLAY_FEEDBACK,
    ACTION_VERIFY_LATEX, VERIFYING_MESSAGE,
};
pub use state::{AgentState, CycleId};
pub use trigger::{classify, ElementInfo, Trigger, UiEvent, RECOMPILE_LABEL};
pub use update::{update, EDITOR_NOT_FOUND_MESSAGE};
pub use view_model::{AgentViewModel, NotificationView};

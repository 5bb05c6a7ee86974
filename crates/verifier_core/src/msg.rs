use crate::{CycleId, FeedbackEvent, UiEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Raw input event observed on the host page.
    Ui(UiEvent),
    /// Poll timer fired for `cycle`; `text` is what the editor returned on this tick.
    PollTick { cycle: CycleId, text: Option<String> },
    /// Feedback relayed back by the relay service.
    Feedback(FeedbackEvent),
    /// The hide timer scheduled for notification `generation` elapsed.
    DismissElapsed { generation: u64 },
}

use std::collections::BTreeMap;
use std::time::Duration;

use crate::view_model::AgentViewModel;
use crate::{FeedbackEvent, Notification, PollCycle, PollOutcome, PollSettings};

/// Identifies one triggered verification attempt.
pub type CycleId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AgentState {
    settings: PollSettings,
    cycles: BTreeMap<CycleId, PollCycle>,
    next_cycle: CycleId,
    notification: Notification,
    requests_sent: u64,
    dirty: bool,
}

impl AgentState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: PollSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> PollSettings {
        self.settings
    }

    pub fn view(&self) -> AgentViewModel {
        AgentViewModel {
            active_cycles: self.cycles.len(),
            requests_sent: self.requests_sent,
            notification: self.notification.view(),
            dirty: self.dirty,
        }
    }

    /// Returns whether the visible state changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn start_cycle(&mut self) -> CycleId {
        self.next_cycle += 1;
        let cycle = self.next_cycle;
        self.cycles.insert(cycle, PollCycle::new(self.settings));
        cycle
    }

    /// Feeds one tick into `cycle`; terminated cycles are dropped.
    pub(crate) fn tick_cycle(&mut self, cycle: CycleId, text: Option<String>) -> PollOutcome {
        let Some(poll) = self.cycles.get_mut(&cycle) else {
            return PollOutcome::Ignored;
        };
        let outcome = poll.tick(text);
        if poll.is_terminal() {
            self.cycles.remove(&cycle);
        }
        outcome
    }

    pub(crate) fn record_request_sent(&mut self) {
        self.requests_sent += 1;
    }

    pub(crate) fn show(&mut self, event: &FeedbackEvent) -> (u64, Duration) {
        self.dirty = true;
        self.notification.render(event)
    }

    pub(crate) fn dismiss(&mut self, generation: u64) -> bool {
        let hidden = self.notification.dismiss(generation);
        if hidden {
            self.dirty = true;
        }
        hidden
    }
}

use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PollPhase {
    Polling,
    Found,
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Editor not available yet; keep ticking.
    Pending { attempts: u32 },
    /// Editor text obtained on this tick.
    Found(String),
    /// Attempt budget spent without seeing the editor.
    Exhausted { attempts: u32 },
    /// Tick arrived after the cycle had already terminated.
    Ignored,
}

/// Bounded retry while waiting for the host editor to mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollCycle {
    settings: PollSettings,
    attempts: u32,
    phase: PollPhase,
}

impl PollCycle {
    pub fn new(settings: PollSettings) -> Self {
        Self {
            settings,
            attempts: 0,
            phase: PollPhase::Polling,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.phase != PollPhase::Polling
    }

    /// Records one tick with whatever the editor returned.
    ///
    /// An empty string counts as "editor not ready": a mounted editor always
    /// renders at least one line.
    pub fn tick(&mut self, text: Option<String>) -> PollOutcome {
        if self.is_terminal() {
            return PollOutcome::Ignored;
        }
        self.attempts += 1;
        match text.filter(|text| !text.is_empty()) {
            Some(text) => {
                self.phase = PollPhase::Found;
                PollOutcome::Found(text)
            }
            None if self.attempts >= self.settings.max_attempts => {
                self.phase = PollPhase::Exhausted;
                PollOutcome::Exhausted {
                    attempts: self.attempts,
                }
            }
            None => PollOutcome::Pending {
                attempts: self.attempts,
            },
        }
    }
}

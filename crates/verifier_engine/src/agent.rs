//! Page agent runtime: owns the core state machine and executes its effects.
//!
//! The agent runs as a single task fed by an inbox, mirroring the single
//! event loop of a page context. Poll cycles and the hide timer are separate
//! tasks, each guarded by its own [`CancellationToken`], so independent
//! cycles can be started and stopped without touching one another.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant};
use tokio_util::sync::CancellationToken;
use verifier_core::{
    classify, update, AgentState, CycleId, Effect, FeedbackEvent, Msg, NotificationView,
    PollSettings, Trigger, UiEvent,
};
use verifier_logging::{verifier_debug, verifier_error, verifier_info, verifier_warn};

use crate::{ContextId, RequestChannel};

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Read access to the host page's editor.
pub trait EditorSource: Send + Sync {
    /// Full current document text, or `None` while the editor is not mounted.
    fn extract_text(&self) -> Option<String>;
}

/// Where the notification is drawn.
pub trait NotificationSurface: Send + Sync {
    fn apply(&self, view: &NotificationView);
}

/// What the host should do with an event it handed to the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Disposition {
    pub triggered: bool,
    /// Stop default handling and propagation of the host event.
    pub suppress_default: bool,
}

#[derive(Clone)]
pub struct PageAgentHandle {
    context: ContextId,
    msg_tx: mpsc::UnboundedSender<Msg>,
    shutdown: CancellationToken,
}

impl PageAgentHandle {
    /// Starts the agent task on the current tokio runtime.
    pub fn spawn(
        context: ContextId,
        settings: PollSettings,
        editor: Arc<dyn EditorSource>,
        relay: Arc<dyn RequestChannel>,
        surface: Arc<dyn NotificationSurface>,
    ) -> (Self, JoinHandle<()>) {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();
        let agent = AgentLoop {
            context,
            state: AgentState::with_settings(settings),
            editor,
            relay,
            surface,
            msg_tx: msg_tx.clone(),
            polls: HashMap::new(),
            dismiss: None,
            shutdown: shutdown.clone(),
        };
        let task = tokio::spawn(agent.run(msg_rx));
        let handle = Self {
            context,
            msg_tx,
            shutdown,
        };
        (handle, task)
    }

    pub fn context(&self) -> ContextId {
        self.context
    }

    /// Hands a host input event to the agent.
    ///
    /// The disposition is decided synchronously so the host can suppress the
    /// event before its own handlers run.
    pub fn observe(&self, event: UiEvent) -> Disposition {
        let Some(trigger) = classify(&event) else {
            return Disposition::default();
        };
        verifier_info!("Verification triggered by {:?} in context={}", trigger, self.context);
        self.send(Msg::Ui(event));
        Disposition {
            triggered: true,
            suppress_default: Trigger::suppresses_default(trigger),
        }
    }

    /// Feedback arriving from the relay service.
    pub fn deliver(&self, event: FeedbackEvent) {
        self.send(Msg::Feedback(event));
    }

    /// Stops the agent and every timer it owns.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    fn send(&self, msg: Msg) {
        if self.msg_tx.send(msg).is_err() {
            verifier_debug!("Page agent for context={} has stopped", self.context);
        }
    }
}

struct AgentLoop {
    context: ContextId,
    state: AgentState,
    editor: Arc<dyn EditorSource>,
    relay: Arc<dyn RequestChannel>,
    surface: Arc<dyn NotificationSurface>,
    msg_tx: mpsc::UnboundedSender<Msg>,
    polls: HashMap<CycleId, CancellationToken>,
    dismiss: Option<CancellationToken>,
    shutdown: CancellationToken,
}

impl AgentLoop {
    async fn run(mut self, mut msg_rx: mpsc::UnboundedReceiver<Msg>) {
        let shutdown = self.shutdown.clone();
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                msg = msg_rx.recv() => match msg {
                    Some(msg) => self.dispatch(msg),
                    None => break,
                },
            }
        }
        // Child tokens of `shutdown` are already cancelled on that path.
        for (_, token) in self.polls.drain() {
            token.cancel();
        }
        if let Some(token) = self.dismiss.take() {
            token.cancel();
        }
        verifier_debug!("Page agent for context={} stopped", self.context);
    }

    fn dispatch(&mut self, msg: Msg) {
        if let Msg::PollTick { cycle, text: None } = &msg {
            verifier_debug!("Editor not found for cycle={}; retrying", cycle);
        }

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        for effect in effects {
            self.execute(effect);
        }

        if was_dirty {
            if let Some(notification) = view.notification {
                self.surface.apply(&notification);
            }
        }
    }

    fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::StartPolling { cycle, interval } => self.start_polling(cycle, interval),
            Effect::StopPolling { cycle } => {
                if let Some(token) = self.polls.remove(&cycle) {
                    token.cancel();
                }
            }
            Effect::SendRequest(request) => {
                verifier_info!(
                    "Editor found; sending {} bytes from context={}",
                    request.code.len(),
                    self.context
                );
                self.relay.send_request(self.context, request);
            }
            Effect::ReportEditorMissing { cycle, attempts } => {
                verifier_error!(
                    "Could not find the editor after {} attempts (cycle={})",
                    attempts,
                    cycle
                );
            }
            Effect::ScheduleDismiss { generation, after } => {
                self.schedule_dismiss(generation, after)
            }
        }
    }

    fn start_polling(&mut self, cycle: CycleId, interval: Duration) {
        let interval = interval.max(MIN_POLL_INTERVAL);
        let token = self.shutdown.child_token();
        self.polls.insert(cycle, token.clone());

        let editor = self.editor.clone();
        let msg_tx = self.msg_tx.clone();
        tokio::spawn(async move {
            // First tick fires one interval after the trigger.
            let mut ticker = interval_at(Instant::now() + interval, interval);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        let text = editor.extract_text();
                        if msg_tx.send(Msg::PollTick { cycle, text }).is_err() {
                            break;
                        }
                    }
                }
            }
        });
    }

    fn schedule_dismiss(&mut self, generation: u64, after: Duration) {
        if let Some(previous) = self.dismiss.take() {
            previous.cancel();
        }
        let token = self.shutdown.child_token();
        self.dismiss = Some(token.clone());

        let msg_tx = self.msg_tx.clone();
        let context = self.context;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = sleep(after) => {
                    if msg_tx.send(Msg::DismissElapsed { generation }).is_err() {
                        verifier_warn!("Page agent for context={} gone before dismissal", context);
                    }
                }
            }
        });
    }
}

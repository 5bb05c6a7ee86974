use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Local};
use tokio::sync::mpsc;
use verifier_core::{Kind, NotificationView, VERIFYING_MESSAGE};
use verifier_engine::NotificationSurface;
use verifier_logging::verifier_debug;

/// Draws the notification as terminal lines and reports the outcome.
///
/// The relay sends exactly one interim event before the verdict. The first
/// visible view that is not that interim event is the outcome, whatever its
/// kind, because the backend status is relayed verbatim.
pub struct TerminalSurface {
    outcome_tx: mpsc::UnboundedSender<NotificationView>,
    interim_seen: AtomicBool,
}

impl TerminalSurface {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<NotificationView>) {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let surface = Self {
            outcome_tx,
            interim_seen: AtomicBool::new(false),
        };
        (surface, outcome_rx)
    }

    fn is_interim(&self, view: &NotificationView) -> bool {
        view.kind == Kind::Verifying
            && view.message == VERIFYING_MESSAGE
            && !self.interim_seen.swap(true, Ordering::SeqCst)
    }
}

impl NotificationSurface for TerminalSurface {
    fn apply(&self, view: &NotificationView) {
        if !view.visible {
            verifier_debug!("Notification hidden");
            return;
        }
        println!("{}", format_line(view, Local::now()));
        if self.is_interim(view) {
            return;
        }
        if self.outcome_tx.send(view.clone()).is_err() {
            verifier_debug!("Nobody waits for an outcome; dropping {}", view.kind);
        }
    }
}

fn format_line(view: &NotificationView, now: DateTime<Local>) -> String {
    format!(
        "[{}] {:<10} {} ({} on {})",
        now.format("%H:%M:%S"),
        view.kind,
        view.message,
        view.treatment.foreground,
        view.treatment.background
    )
}

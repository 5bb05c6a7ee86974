//! The single transient notification owned by the page agent.

use std::time::Duration;

use crate::view_model::NotificationView;
use crate::{FeedbackEvent, Kind};

pub const ERROR_HIDE_DELAY: Duration = Duration::from_secs(10);
pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_secs(7);

/// How long a notification of `kind` stays visible.
pub fn hide_delay(kind: &Kind) -> Duration {
    match kind {
        Kind::Error => ERROR_HIDE_DELAY,
        _ => DEFAULT_HIDE_DELAY,
    }
}

/// Background and text colour used to render a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Treatment {
    pub background: &'static str,
    pub foreground: &'static str,
}

impl Treatment {
    pub const SUCCESS: Treatment = Treatment::light_text("#28a745");
    pub const SUGGESTION: Treatment = Treatment {
        background: "#ffc107",
        foreground: "black",
    };
    pub const ERROR: Treatment = Treatment::light_text("#dc3545");
    pub const VERIFYING: Treatment = Treatment::light_text("#6c757d");
    pub const INFO: Treatment = Treatment::light_text("#17a2b8");

    const fn light_text(background: &'static str) -> Self {
        Self {
            background,
            foreground: "white",
        }
    }

    pub fn for_kind(kind: &Kind) -> Self {
        match kind {
            Kind::Success => Self::SUCCESS,
            Kind::Suggestion => Self::SUGGESTION,
            Kind::Error => Self::ERROR,
            Kind::Verifying => Self::VERIFYING,
            Kind::Info | Kind::Other(_) => Self::INFO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Notification {
    message: String,
    kind: Kind,
    visible: bool,
    generation: u64,
}

impl Notification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the displayed content with `event` and makes it visible.
    ///
    /// Returns the new generation together with the delay after which the
    /// caller should hand that generation back to [`Notification::dismiss`].
    pub fn render(&mut self, event: &FeedbackEvent) -> (u64, Duration) {
        self.message.clone_from(&event.message);
        self.kind = event.kind.clone();
        self.visible = true;
        self.generation += 1;
        (self.generation, hide_delay(&event.kind))
    }

    /// Hides the notification if `generation` is still the latest render.
    pub fn dismiss(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.visible {
            return false;
        }
        self.visible = false;
        true
    }

    /// `None` until the first event has been rendered.
    pub fn view(&self) -> Option<NotificationView> {
        if self.generation == 0 {
            return None;
        }
        Some(NotificationView {
            message: self.message.clone(),
            kind: self.kind.clone(),
            treatment: Treatment::for_kind(&self.kind),
            visible: self.visible,
        })
    }
}

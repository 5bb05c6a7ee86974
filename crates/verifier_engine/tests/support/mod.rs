//! Recording fakes shared by the engine integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once};

use tokio::sync::mpsc;
use verifier_core::{FeedbackEvent, NotificationView, VerificationRequest};
use verifier_engine::{
    ContextId, EditorSource, FeedbackSink, NotificationSurface, RequestChannel,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(verifier_logging::initialize_for_tests);
}

/// Editor whose answers are scripted per tick; answers `None` once the script runs out.
#[derive(Default)]
pub struct ScriptedEditor {
    script: Mutex<VecDeque<Option<String>>>,
    calls: AtomicUsize,
}

impl ScriptedEditor {
    pub fn new(script: Vec<Option<&str>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().map(|s| s.map(str::to_string)).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn always(text: &str) -> Self {
        Self::new(vec![Some(text); 64])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EditorSource for ScriptedEditor {
    fn extract_text(&self) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script.lock().unwrap().pop_front().flatten()
    }
}

#[derive(Default)]
pub struct RecordingRelay {
    requests: Mutex<Vec<(ContextId, VerificationRequest)>>,
}

impl RecordingRelay {
    pub fn requests(&self) -> Vec<(ContextId, VerificationRequest)> {
        self.requests.lock().unwrap().clone()
    }
}

impl RequestChannel for RecordingRelay {
    fn send_request(&self, context: ContextId, request: VerificationRequest) {
        self.requests.lock().unwrap().push((context, request));
    }
}

#[derive(Default)]
pub struct RecordingSurface {
    views: Mutex<Vec<NotificationView>>,
}

impl RecordingSurface {
    pub fn views(&self) -> Vec<NotificationView> {
        self.views.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<NotificationView> {
        self.views.lock().unwrap().last().cloned()
    }
}

impl NotificationSurface for RecordingSurface {
    fn apply(&self, view: &NotificationView) {
        self.views.lock().unwrap().push(view.clone());
    }
}

/// Surface that forwards every rendered view to a channel.
pub struct ChannelSurface {
    tx: mpsc::UnboundedSender<NotificationView>,
}

impl ChannelSurface {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<NotificationView>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NotificationSurface for ChannelSurface {
    fn apply(&self, view: &NotificationView) {
        let _ = self.tx.send(view.clone());
    }
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(ContextId, FeedbackEvent)>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<(ContextId, FeedbackEvent)> {
        self.events.lock().unwrap().clone()
    }
}

impl FeedbackSink for RecordingSink {
    fn deliver(&self, context: ContextId, event: FeedbackEvent) {
        self.events.lock().unwrap().push((context, event));
    }
}

/// Sink that forwards relay output to a channel.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<(ContextId, FeedbackEvent)>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(ContextId, FeedbackEvent)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl FeedbackSink for ChannelSink {
    fn deliver(&self, context: ContextId, event: FeedbackEvent) {
        let _ = self.tx.send((context, event));
    }
}

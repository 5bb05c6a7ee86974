use std::collections::HashMap;
use std::sync::Mutex;

use verifier_core::FeedbackEvent;
use verifier_logging::{verifier_error, verifier_warn};

use crate::{ContextId, FeedbackSink, PageAgentHandle};

/// Routes relay output back to the page agent that asked for it.
#[derive(Default)]
pub struct ContextRouter {
    routes: Mutex<HashMap<ContextId, PageAgentHandle>>,
}

impl ContextRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, handle: PageAgentHandle) {
        match self.routes.lock() {
            Ok(mut routes) => {
                routes.insert(handle.context(), handle);
            }
            Err(_) => verifier_error!("Context routes poisoned; cannot register context"),
        }
    }

    pub fn unregister(&self, context: ContextId) -> bool {
        match self.routes.lock() {
            Ok(mut routes) => routes.remove(&context).is_some(),
            Err(_) => false,
        }
    }

    fn lookup(&self, context: ContextId) -> Option<PageAgentHandle> {
        self.routes.lock().ok()?.get(&context).cloned()
    }
}

impl FeedbackSink for ContextRouter {
    fn deliver(&self, context: ContextId, event: FeedbackEvent) {
        match self.lookup(context) {
            Some(handle) => handle.deliver(event),
            None => verifier_warn!(
                "No page context {}; dropping '{}' feedback",
                context,
                event.kind
            ),
        }
    }
}

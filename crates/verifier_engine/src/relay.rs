use std::sync::{mpsc, Arc};
use std::thread;

use verifier_core::{FeedbackEvent, Message, VerificationRequest};
use verifier_logging::{verifier_debug, verifier_error, verifier_info};

use crate::{ContextId, Verifier};

/// Delivers relay output to the page context a request came from.
pub trait FeedbackSink: Send + Sync {
    fn deliver(&self, context: ContextId, event: FeedbackEvent);
}

/// Page-agent side of the channel into the relay service.
pub trait RequestChannel: Send + Sync {
    fn send_request(&self, context: ContextId, request: VerificationRequest);
}

/// Serves one verification request: interim event, one verifier call, one terminal event.
pub async fn handle_request(
    verifier: &dyn Verifier,
    sink: &dyn FeedbackSink,
    context: ContextId,
    request: VerificationRequest,
) {
    verifier_info!(
        "Relaying verification context={} code_len={}",
        context,
        request.code.len()
    );
    sink.deliver(context, FeedbackEvent::verifying());

    let event = match verifier.verify(&request.code).await {
        Ok(verdict) => {
            verifier_debug!("Verdict for context={}: {:?}", context, verdict);
            verdict.into_feedback()
        }
        Err(err) => {
            verifier_error!("Error contacting the verifier for context={}: {}", context, err);
            FeedbackEvent::error(err.user_message())
        }
    };
    sink.deliver(context, event);
}

enum RelayCommand {
    Inbound { context: ContextId, message: Message },
}

/// Handle to the relay service, which runs on its own thread and runtime.
#[derive(Clone)]
pub struct RelayHandle {
    cmd_tx: mpsc::Sender<RelayCommand>,
}

impl RelayHandle {
    pub fn new(verifier: Arc<dyn Verifier>, sink: Arc<dyn FeedbackSink>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    verifier_error!("Relay service could not start its runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let verifier = verifier.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    handle_command(verifier.as_ref(), sink.as_ref(), command).await;
                });
            }
        });

        Self { cmd_tx }
    }

    /// Posts any message on behalf of `context`; only verification requests are acted on.
    pub fn post(&self, context: ContextId, message: Message) {
        if self
            .cmd_tx
            .send(RelayCommand::Inbound { context, message })
            .is_err()
        {
            verifier_error!("Relay service is gone; dropping message from context={}", context);
        }
    }
}

impl RequestChannel for RelayHandle {
    fn send_request(&self, context: ContextId, request: VerificationRequest) {
        self.post(context, Message::VerifyLatex(request));
    }
}

async fn handle_command(verifier: &dyn Verifier, sink: &dyn FeedbackSink, command: RelayCommand) {
    match command {
        RelayCommand::Inbound {
            context,
            message: Message::VerifyLatex(request),
        } => handle_request(verifier, sink, context, request).await,
        RelayCommand::Inbound { context, message } => {
            verifier_debug!(
                "Ignoring '{}' message from context={}",
                message.action(),
                context
            );
        }
    }
}

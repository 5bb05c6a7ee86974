//! Verifier engine: relay service, HTTP verifier client and page-agent runtime.
mod agent;
mod relay;
mod router;
mod types;
mod verify;

pub use agent::{Disposition, EditorSource, NotificationSurface, PageAgentHandle};
pub use relay::{handle_request, FeedbackSink, RelayHandle, RequestChannel};
pub use router::ContextRouter;
pub use types::{ContextId, FailureKind, Verdict, VerifyError};
pub use verify::{ReqwestVerifier, Verifier, VerifySettings, DEFAULT_ENDPOINT};

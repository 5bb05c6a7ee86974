use std::fmt;

use serde::{Deserialize, Serialize};
use verifier_core::{FeedbackEvent, Kind};

/// Identity of an originating page context (one browser tab).
pub type ContextId = u64;

/// Success body returned by the verification endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Verdict {
    pub status: Kind,
    pub message: String,
}

impl Verdict {
    pub fn into_feedback(self) -> FeedbackEvent {
        FeedbackEvent::new(self.message, self.status)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct VerifyBody<'a> {
    pub latex: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct VerifyError {
    pub kind: FailureKind,
    pub message: String,
}

impl VerifyError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Text shown to the user when a verification could not be completed.
    pub fn user_message(&self) -> String {
        format!("An error occurred while contacting the verifier: {self}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    InvalidRequest,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: u64 },
    MalformedResponse,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::InvalidRequest => write!(f, "invalid request"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large ({actual} bytes, max {max_bytes})")
            }
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

//! Payloads crossing the boundary between the page agent and the relay service.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const ACTION_VERIFY_LATEX: &str = "verifyLatex";
pub const ACTION_DISPLAY_FEEDBACK: &str = "displayFeedback";

/// Text of the interim event emitted before the verifier is contacted.
pub const VERIFYING_MESSAGE: &str = "Verifying...";

/// Classification of a feedback event.
///
/// Any label outside the recognised set deserializes to [`Kind::Other`] and is
/// kept verbatim, so a backend status can be relayed without loss.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Kind {
    Success,
    Suggestion,
    Error,
    Verifying,
    #[default]
    Info,
    Other(String),
}

impl Kind {
    pub fn as_str(&self) -> &str {
        match self {
            Kind::Success => "success",
            Kind::Suggestion => "suggestion",
            Kind::Error => "error",
            Kind::Verifying => "verifying",
            Kind::Info => "info",
            Kind::Other(label) => label,
        }
    }
}

impl From<String> for Kind {
    fn from(label: String) -> Self {
        match label.as_str() {
            "success" => Kind::Success,
            "suggestion" => Kind::Suggestion,
            "error" => Kind::Error,
            "verifying" => Kind::Verifying,
            "info" => Kind::Info,
            _ => Kind::Other(label),
        }
    }
}

impl From<&str> for Kind {
    fn from(label: &str) -> Self {
        Kind::from(label.to_string())
    }
}

impl From<Kind> for String {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub code: String,
}

impl VerificationRequest {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEvent {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: Kind,
}

impl FeedbackEvent {
    pub fn new(message: impl Into<String>, kind: Kind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    pub fn verifying() -> Self {
        Self::new(VERIFYING_MESSAGE, Kind::Verifying)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Kind::Error)
    }
}

/// Envelope for everything sent over the messaging channel, tagged by `action`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum Message {
    #[serde(rename = "verifyLatex")]
    VerifyLatex(VerificationRequest),
    #[serde(rename = "displayFeedback")]
    DisplayFeedback(FeedbackEvent),
}

impl Message {
    pub fn action(&self) -> &'static str {
        match self {
            Message::VerifyLatex(_) => ACTION_VERIFY_LATEX,
            Message::DisplayFeedback(_) => ACTION_DISPLAY_FEEDBACK,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

impl From<VerificationRequest> for Message {
    fn from(request: VerificationRequest) -> Self {
        Message::VerifyLatex(request)
    }
}

impl From<FeedbackEvent> for Message {
    fn from(event: FeedbackEvent) -> Self {
        Message::DisplayFeedback(event)
    }
}

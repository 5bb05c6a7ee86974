use std::time::Duration;

use bytes::BytesMut;
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;

use crate::types::VerifyBody;
use crate::{FailureKind, Verdict, VerifyError};

/// Address of the verification backend when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/verify";

#[derive(Debug, Clone)]
pub struct VerifySettings {
    pub endpoint: String,
    /// `None` leaves connection timing to the transport.
    pub connect_timeout: Option<Duration>,
    /// `None` leaves the overall request timing to the transport.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl Default for VerifySettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: None,
            request_timeout: None,
            max_bytes: 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait Verifier: Send + Sync {
    async fn verify(&self, code: &str) -> Result<Verdict, VerifyError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestVerifier {
    settings: VerifySettings,
    endpoint: reqwest::Url,
    client: reqwest::Client,
}

impl ReqwestVerifier {
    pub fn new(settings: VerifySettings) -> Result<Self, VerifyError> {
        let endpoint = reqwest::Url::parse(&settings.endpoint)
            .map_err(|err| VerifyError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(VerifyError::new(
                FailureKind::InvalidEndpoint,
                format!("unsupported scheme {}", endpoint.scheme()),
            ));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| VerifyError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            endpoint,
            client,
        })
    }

    fn too_large(&self, actual: u64) -> VerifyError {
        VerifyError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual,
            },
            "refusing to read the verdict",
        )
    }
}

#[async_trait::async_trait]
impl Verifier for ReqwestVerifier {
    async fn verify(&self, code: &str) -> Result<Verdict, VerifyError> {
        let body = serde_json::to_vec(&VerifyBody { latex: code })
            .map_err(|err| VerifyError::new(FailureKind::InvalidRequest, err.to_string()))?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(VerifyError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let mut bytes = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        serde_json::from_slice::<Verdict>(&bytes)
            .map_err(|err| VerifyError::new(FailureKind::MalformedResponse, err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> VerifyError {
    if err.is_timeout() {
        return VerifyError::new(FailureKind::Timeout, err.to_string());
    }
    VerifyError::new(FailureKind::Network, err.to_string())
}

//! Outbound turn delivery.
//!
//! [`ReplyTransport`] is the seam between the chat session and the network:
//! the session builds a [`TurnRequest`], a transport turns it into the raw
//! reply text or a [`TransportError`].

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::TurnRequest;

#[derive(Debug)]
pub enum TransportError {
    /// The request could not be sent or the body could not be read.
    Network(reqwest::Error),
    /// The endpoint answered with a non-success status.
    Status { status: u16, body: String },
    /// Failure reported by a non-HTTP transport.
    Other(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Network(err) => write!(f, "request failed: {err}"),
            TransportError::Status { status, body } => {
                let body = body.trim();
                if body.is_empty() {
                    write!(f, "endpoint returned HTTP {status}")
                } else {
                    write!(f, "endpoint returned HTTP {status}: {body}")
                }
            }
            TransportError::Other(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Network(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Network(err)
    }
}

#[async_trait]
pub trait ReplyTransport: Send + Sync {
    async fn send_turn(&self, request: &TurnRequest) -> Result<String, TransportError>;
}

/// JSON-over-HTTP transport: `POST` the request, read the body as plain text.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ReplyTransport for HttpTransport {
    async fn send_turn(&self, request: &TurnRequest) -> Result<String, TransportError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            history_len = request.history.len(),
            "sending turn"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }
}

//! The persistence collaborator contract.

use async_trait::async_trait;
use plotpin_types::{Submission, wire::PolygonRecord};
use thiserror::Error;

/// Failures from the submission sink's network round trip.
///
/// A transport failure is terminal for that attempt only: callers log it and
/// leave local state untouched so the user may retry with the same points.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("sink misconfigured: {message}")]
    Config { message: String },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode endpoint response: {message}")]
    Decode { message: String },
}

impl TransportError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into() }
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode { message: message.into() }
    }
}

/// Persists finalized submissions and serves back stored polygons.
///
/// The collector never awaits the sink itself; the UI layer drives the call
/// and feeds the outcome back through
/// [`CaptureSession::apply_submit_outcome`](crate::CaptureSession::apply_submit_outcome).
#[async_trait]
pub trait SubmissionSink {
    /// Sends one finalized submission to the persistence endpoint.
    async fn submit(&self, submission: &Submission) -> Result<(), TransportError>;

    /// Fetches every previously stored polygon, purely for display.
    async fn fetch_all(&self) -> Result<Vec<PolygonRecord>, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_messages_name_the_failure() {
        let err = TransportError::status(500, "boom");
        assert_eq!(err.to_string(), "endpoint returned HTTP 500: boom");

        let err = TransportError::network("connection refused");
        assert!(err.to_string().contains("connection refused"));
    }
}

use thiserror::Error;

/// A failed HTTP round trip, split by cause so callers can prefix error
/// text consistently.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Error text for a typed result, with the category prefix the
    /// service's callers have historically matched on.
    pub(crate) fn classified_message(&self) -> String {
        match self {
            TransportError::Timeout(cause) => format!("Timeout Error: {cause}"),
            TransportError::Server(cause) => format!("Server Error: {cause}"),
            TransportError::Other(cause) => format!("Error: {cause}"),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_status() || err.is_connect() {
            TransportError::Server(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

/// Failures a protocol operation can raise.
///
/// Ordinary failures (a refused order, a transport problem during
/// submission) are folded into the typed results instead; these variants
/// cover the cases where no honest typed result can be built.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The outgoing document is missing the structure the protocol
    /// requires, e.g. no `Orders/Order` root or an unknown type code.
    #[error("malformed order document: {0}")]
    MalformedRequest(String),
    /// The response body was not well-formed XML. Distinct from a
    /// well-formed response that reports a business failure.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    /// A result node carried neither the expected field nor an
    /// `Exception` fallback. The service broke its own contract; there is
    /// no message worth synthesizing.
    #[error("inconsistent response: result node has neither `{field}` nor `Exception`")]
    InconsistentResponse { field: &'static str },
    #[error(transparent)]
    Transport(#[from] TransportError),
}

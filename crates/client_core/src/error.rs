//! Failure taxonomy for search and rebuild requests.
//!
//! Every variant settles a lifecycle into `Failed`; none of them escape the
//! controllers. Errors are cloneable so they can sit inside a phase snapshot.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never produced a response (connection refused, DNS, IO).
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    /// The backend answered with a non-success HTTP status.
    #[error("server returned status {code}")]
    Status { code: u16 },

    /// The body was not JSON or did not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("config error: {0}")]
    Config(String),
}

impl ClientError {
    /// True when the failure came from the network rather than the payload.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status {
                code: status.as_u16(),
            }
        } else if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_stable() {
        assert_eq!(
            ClientError::Transport("connection refused".into()).to_string(),
            "transport error: connection refused"
        );
        assert_eq!(
            ClientError::Status { code: 502 }.to_string(),
            "server returned status 502"
        );
        assert_eq!(
            ClientError::MalformedResponse("expected value".into()).to_string(),
            "malformed response: expected value"
        );
    }

    #[test]
    fn json_errors_map_to_malformed_response() {
        let err = serde_json::from_str::<serde_json::Value>("<html>").expect_err("not json");
        let mapped = ClientError::from(err);
        assert!(matches!(mapped, ClientError::MalformedResponse(_)));
        assert!(!mapped.is_transport());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClientError>();
    }
}

use serde::Serialize;
use thiserror::Error;

/// Broad failure classes a caller can branch on without matching every variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    HttpStatus,
    MalformedResponse,
    LocalState,
    Transport,
    Cancelled,
}

#[derive(Error, Debug, Serialize)]
pub enum ClientError {
    /// Gateway answered with a non-2xx status
    #[error("{operation} failed: {status}")]
    RequestFailed { operation: &'static str, status: u16 },

    /// Registration rejected; carries the server's `error` message when it sent one
    #[error("{0}")]
    RegistrationFailed(String),

    /// Group creation rejected; carries the server body verbatim
    #[error("Failed to create group: {0}")]
    GroupCreationFailed(String),

    /// Membership change rejected; carries the server body verbatim
    #[error("Failed to add member: {0}")]
    MemberAddFailed(String),

    /// 2xx response whose body does not match the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Login payload without the expected `user` record
    #[error("Malformed login response: {0}")]
    MalformedLoginResponse(String),

    /// Durable storage could not be read, written or parsed
    #[error("Local state error: {0}")]
    LocalState(String),

    #[error("Request error: {0}")]
    Transport(String),

    #[error("Request cancelled")]
    Cancelled,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::RequestFailed { .. }
            | ClientError::RegistrationFailed(_)
            | ClientError::GroupCreationFailed(_)
            | ClientError::MemberAddFailed(_) => ErrorKind::HttpStatus,
            ClientError::MalformedResponse(_) | ClientError::MalformedLoginResponse(_) => {
                ErrorKind::MalformedResponse
            }
            ClientError::LocalState(_) => ErrorKind::LocalState,
            ClientError::Transport(_) => ErrorKind::Transport,
            ClientError::Cancelled => ErrorKind::Cancelled,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::MalformedResponse(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

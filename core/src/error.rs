use thiserror::Error;

/// Failure surfaced to the user by a sync operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Credential rejected while loading the collection; the session must end
    #[error("Session expired, please log in again")]
    AuthExpired,
    #[error("{0}")]
    NetworkOrServer(String),
    #[error("{0}")]
    ValidationRejected(String),
}

impl SyncError {
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, SyncError::AuthExpired)
    }
}

/// Failure reported by a `TaskApi` transport
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Credential rejected by server")]
    Unauthorized,
    #[error("Server responded with status {status}")]
    Rejected {
        status: u16,
        /// Human readable message from the response body, if any
        message: Option<String>,
    },
    #[error("Transport error: {0}")]
    Transport(String),
}

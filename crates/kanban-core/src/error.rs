use thiserror::Error;

#[derive(Error, Debug)]
pub enum KanbanError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Remote service returned {status}: {message}")]
    Remote { status: u16, message: String },
}

impl KanbanError {
    /// Whether the failure happened on the way to or from the remote service
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Remote { .. })
    }
}

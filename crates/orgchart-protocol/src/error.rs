use thiserror::Error;

/// Errors raised while decoding requests at the protocol boundary.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown method: {0}")]
    UnknownMethod(String),
}

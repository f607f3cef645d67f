//! Server errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// The listener could not be bound
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Accepting or serving connections failed
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

//! Server startup and runtime errors.

use thiserror::Error;

use crate::domain::TranslationError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),

    #[error("Failed to build translation client: {0}")]
    Translator(#[from] TranslationError),

    #[error("Invalid seed data: {0}")]
    Seed(String),
}

//! # Error Handling
//!
//! Error types for the admin panel logout client, defined with `thiserror`.

use reqwest::StatusCode;

/// Custom result type for admin-logout operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the admin panel logout client
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration errors (bad base URL, unreadable cookie file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The request never produced a response (connect failure, timeout)
    #[error("Transport error: {context}")]
    Transport {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    /// The panel answered with a non-success status
    #[error("HTTP request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The response body was not the expected JSON shape
    #[error("Failed to decode response: {body}")]
    Decode {
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new transport error
    pub fn transport<S: Into<String>>(context: S, source: reqwest::Error) -> Self {
        Self::Transport { context: context.into(), source }
    }

    /// Status code carried by the error, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

//! Unified error types for the site data layer.

use thiserror::Error;

/// Every failure the data layer can surface to a caller.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Local SQLite backend failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Key/value backend failure that is not a database error
    #[error("Storage error: {message}")]
    Storage {
        /// What went wrong
        message: String,
    },

    /// JSON encoding or decoding failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    #[allow(missing_docs)]
    Io(#[from] std::io::Error),

    /// Notification body failed to render
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// Transport-level HTTP failure (remote backend or mail API)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote backend or mail API answered with a non-success status
    #[error("Remote call failed with status {status}: {message}")]
    Remote {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// A table name that is not one of the seven known collections
    #[error("Unknown table: {name}")]
    UnknownTable {
        /// The rejected name
        name: String,
    },

    /// Caller-supplied data failed validation
    #[error("Validation failed: {message}")]
    Validation {
        /// Human-readable reason, suitable for a toast
        message: String,
    },

    /// No credential row matched on either backend
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// An admin-only operation was attempted without a session
    #[error("Not authenticated")]
    NotAuthenticated,

    /// A status change outside the lifecycle state machine
    #[error("Cannot move {entity} from {from} to {to}")]
    InvalidTransition {
        /// Entity kind ("booking", "testimonial")
        entity: &'static str,
        /// Current status
        from: String,
        /// Requested status
        to: String,
    },
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

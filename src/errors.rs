/*!
 * Error types for the gnome-l10n application.
 *
 * The statistics pipeline reports failures through `StatsError`, defined
 * with the thiserror crate. The application layer wraps these in `anyhow`
 * with context before showing them to the user.
 */

use thiserror::Error;

/// Errors that can occur while fetching, caching or exporting statistics
#[derive(Error, Debug)]
pub enum StatsError {
    /// The service could not be reached (DNS, refused connection, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// The response body was not the JSON we expected
    #[error("Failed to parse API response: {0}")]
    Parse(String),

    /// The service answered 404 for the requested resource
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success status returned by the service
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// The configured API address is not a valid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Writing an export failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StatsError {
    /// Whether the error came from the remote service rather than local I/O
    pub fn is_remote(&self) -> bool {
        !matches!(self, Self::Io(_) | Self::InvalidUrl(_))
    }
}

impl From<serde_json::Error> for StatsError {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse(error.to_string())
    }
}

impl From<csv::Error> for StatsError {
    fn from(error: csv::Error) -> Self {
        Self::Io(error.into())
    }
}

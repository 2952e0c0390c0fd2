use thiserror::Error;

/// Everything that can go wrong while fetching the widget.
///
/// The screen collapses all variants into one user-facing message; the
/// variant is kept for logs and error reporting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// DNS, connect, timeout, or transport failure before a status was received.
    #[error("Network error: {message}")]
    Network { message: String },
    /// The API answered with a non-success status.
    #[error("HTTP error! status: {status}")]
    HttpStatus { status: u16 },
    /// The success body was not the expected JSON object.
    #[error("Failed to parse response: {message}")]
    JsonParse { message: String },
}

impl FetchError {
    /// Stable identifier used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network",
            Self::HttpStatus { .. } => "http_status",
            Self::JsonParse { .. } => "json_parse",
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status } => Some(*status),
            _ => None,
        }
    }
}

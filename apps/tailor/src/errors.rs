use thiserror::Error;

/// Alert text shown for anything that is not a backend-reported failure.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong while generating your resume.";

/// Client-level error type.
/// Every variant is caught at the controller's action boundary and turned
/// into an alert via `user_message`.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Backend answered with a non-success status. `body` is its text body.
    #[error("Request failed (status {status}): {body}")]
    RequestFailed { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The page's form inputs could not be read (e.g. a file read rejected).
    #[error("Failed to read form input: {0}")]
    FormRead(String),

    /// A required page element is absent; the browser front end cannot start.
    #[error("Missing page element: #{0}")]
    MissingElement(String),
}

impl ClientError {
    /// Text for the blocking alert. Backend failures are shown verbatim;
    /// everything else collapses to a generic message.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::RequestFailed { body, .. } => body.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn is_request_failure(&self) -> bool {
        matches!(self, ClientError::RequestFailed { .. })
    }
}

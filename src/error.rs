use thiserror::Error;

// Basic error handling with thiserror
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseFailed(#[from] serde_json::Error),

    #[error("URL encoding failed: {0}")]
    UrlEncodingFailed(#[from] serde_urlencoded::ser::Error),

    #[error("auth server returned status {0}")]
    AuthServerError(u16),

    #[error("malformed token response: {0}")]
    MalformedResponse(String),

    #[error("unexpected status {0} from player API")]
    UnexpectedStatus(u16),

    #[error("field '{0}' not found in response")]
    FieldNotFound(&'static str),

    #[error("response ended mid-value for field '{0}'")]
    FieldTruncated(&'static str),

    #[error("no access token has been acquired yet")]
    NotAuthenticated,

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl RemoteError {
    /// True for failures of a single poll or command that must not disturb
    /// held state (token, last snapshot). The caller logs and moves on.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, RemoteError::NotAuthenticated)
    }
}

use axum::http::StatusCode;
use std::fmt;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// Failure of a request issued by the page against the backend.
#[derive(Debug)]
pub enum ClientError {
    Transport(String),
    Status { status: u16, body: String },
    Decode(String),
    /// Raised when a click fires outside a tokio runtime.
    NoRuntime,
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Transport(msg) => write!(f, "request failed: {msg}"),
            ClientError::Status { status, body } if body.is_empty() => {
                write!(f, "server responded with status {status}")
            }
            ClientError::Status { status, body } => {
                write!(f, "server responded with status {status}: {body}")
            }
            ClientError::Decode(msg) => write!(f, "invalid response body: {msg}"),
            ClientError::NoRuntime => f.write_str("no async runtime to run the request on"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

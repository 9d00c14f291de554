use thiserror::Error;

pub type Result<T> = std::result::Result<T, PulseError>;

#[derive(Error, Debug)]
pub enum PulseError {
    #[error("GITHUB_TOKEN environment variable is not set")]
    MissingToken,
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("API error: HTTP {status}: {message}")]
    Api { status: u16, message: String },
    #[error("repository has no commits")]
    EmptyRepository,
    #[error("Render error: {0}")]
    Render(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ureq::Error> for PulseError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(409, _) => PulseError::EmptyRepository,
            ureq::Error::Status(code, resp) => PulseError::Api {
                status: code,
                message: resp.into_string().unwrap_or_default(),
            },
            other => PulseError::Http(other.to_string()),
        }
    }
}

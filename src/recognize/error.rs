/// Failure of a single recognition round-trip. None of these are fatal; the
/// user can retry the submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognizeError {
    /// The canvas snapshot or request body could not be encoded.
    Encode(String),
    /// The request never produced a response (connect, timeout, read).
    Transport(String),
    /// The service answered with a non-success status.
    Status { code: u16, body: String },
    /// The body did not match the expected record shape.
    Malformed(String),
}

impl std::fmt::Display for RecognizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecognizeError::Encode(msg) => write!(f, "failed to encode request: {msg}"),
            RecognizeError::Transport(msg) => write!(f, "request failed: {msg}"),
            RecognizeError::Status { code, body } if body.is_empty() => {
                write!(f, "service returned status {code}")
            }
            RecognizeError::Status { code, body } => {
                write!(f, "service returned status {code}: {body}")
            }
            RecognizeError::Malformed(msg) => write!(f, "malformed response: {msg}"),
        }
    }
}

impl std::error::Error for RecognizeError {}

impl From<image::ImageError> for RecognizeError {
    fn from(err: image::ImageError) -> Self {
        RecognizeError::Encode(err.to_string())
    }
}

impl From<reqwest::Error> for RecognizeError {
    fn from(err: reqwest::Error) -> Self {
        RecognizeError::Transport(err.to_string())
    }
}

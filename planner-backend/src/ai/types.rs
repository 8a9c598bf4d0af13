use std::fmt;

/// Model API error with status code information
#[derive(Debug, Clone)]
pub struct AiError {
    /// Error message
    pub message: String,
    /// HTTP status code if the server answered at all
    pub status_code: Option<u16>,
}

impl AiError {
    pub fn new(message: impl Into<String>) -> Self {
        AiError {
            message: message.into(),
            status_code: None,
        }
    }

    pub fn with_status(message: impl Into<String>, status_code: u16) -> Self {
        AiError {
            message: message.into(),
            status_code: Some(status_code),
        }
    }
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(code) = self.status_code {
            write!(f, "[HTTP {}] {}", code, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for AiError {}

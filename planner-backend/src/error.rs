use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use planner_types::ErrorResponse;
use std::fmt;

/// Errors raised by the day store and the HTTP handlers
#[derive(Debug)]
pub enum PlannerError {
    /// Date string is not a canonical `YYYY-MM-DD` calendar date
    InvalidDate(String),
    /// Year/month pair is not a valid `YYYY-MM`
    InvalidMonth(String),
    /// Required JSON field absent (holds the display name, e.g. "Task")
    MissingField(&'static str),
    /// No plan file exists for the date
    NotFound(String),
    /// Request body could not be read (too large, truncated)
    Payload(StatusCode, String),
    Io(std::io::Error),
    Unhandled(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::InvalidDate(_) => write!(f, "Invalid date format. Use YYYY-MM-DD"),
            PlannerError::InvalidMonth(_) => write!(f, "Invalid date format. Use YYYY-MM"),
            PlannerError::MissingField(field) => write!(f, "{} is required", field),
            PlannerError::NotFound(_) => write!(f, "No task found for this date"),
            PlannerError::Payload(_, msg) => write!(f, "{}", msg),
            PlannerError::Io(e) => write!(f, "{}", e),
            PlannerError::Unhandled(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for PlannerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlannerError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PlannerError {
    fn from(e: std::io::Error) -> Self {
        PlannerError::Io(e)
    }
}

impl ResponseError for PlannerError {
    fn status_code(&self) -> StatusCode {
        match self {
            PlannerError::InvalidDate(_)
            | PlannerError::InvalidMonth(_)
            | PlannerError::MissingField(_) => StatusCode::BAD_REQUEST,
            PlannerError::NotFound(_) => StatusCode::NOT_FOUND,
            PlannerError::Payload(status, _) => *status,
            PlannerError::Io(_) | PlannerError::Unhandled(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        }
        HttpResponse::build(status).json(ErrorResponse::new(self.to_string()))
    }
}

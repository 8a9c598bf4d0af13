pub mod chat;
pub mod health;
pub mod schedule;
pub mod tasks;

use actix_web::web;

use crate::error::PlannerError;

/// Plans and the schedule are free text of any size; only guard against
/// runaway uploads.
pub const MAX_PAYLOAD_BYTES: usize = 64 * 1024 * 1024;

/// Register every route of the HTTP facade.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_PAYLOAD_BYTES))
        .configure(health::config)
        .configure(tasks::config)
        .configure(schedule::config)
        .configure(chat::config);
}

/// Unwrap an extracted body, turning payload failures into JSON errors.
pub(crate) fn request_body(
    body: Result<web::Bytes, actix_web::Error>,
) -> Result<web::Bytes, PlannerError> {
    body.map_err(|e| PlannerError::Payload(e.as_response_error().status_code(), e.to_string()))
}

/// Pull one string field out of a JSON body. Absent, empty, non-JSON bodies
/// and non-string values all count as missing.
pub(crate) fn required_field<T, F>(body: &[u8], field: F) -> Option<String>
where
    T: serde::de::DeserializeOwned,
    F: FnOnce(T) -> Option<String>,
{
    serde_json::from_slice::<T>(body).ok().and_then(field)
}

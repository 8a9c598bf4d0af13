//! `POST /chat` echoes the message back as an assistant turn. The HTTP
//! surface never calls the model; contextual chat lives in the console
//! front end.

use actix_web::{web, HttpResponse};
use planner_types::{ChatReply, ChatRequest};

use super::{request_body, required_field};
use crate::error::PlannerError;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/chat").route(web::post().to(chat)));
}

async fn chat(
    body: Result<web::Bytes, actix_web::Error>,
) -> Result<HttpResponse, PlannerError> {
    let message = required_field::<ChatRequest, _>(&request_body(body)?, |req| req.message)
        .ok_or(PlannerError::MissingField("Message"))?;
    Ok(HttpResponse::Ok().json(ChatReply::assistant(message)))
}

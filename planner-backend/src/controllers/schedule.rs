use actix_web::{web, HttpResponse};
use planner_types::{MessageResponse, ScheduleRequest, ScheduleResponse};

use super::{request_body, required_field};
use crate::error::PlannerError;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/schedule")
            .route(web::get().to(get_schedule))
            .route(web::put().to(put_schedule)),
    );
}

/// GET /schedule
async fn get_schedule(state: web::Data<AppState>) -> Result<HttpResponse, PlannerError> {
    let schedule = state.store.read_schedule().await?;
    Ok(HttpResponse::Ok().json(ScheduleResponse { schedule }))
}

/// PUT /schedule -- replaces the whole weekly schedule
async fn put_schedule(
    state: web::Data<AppState>,
    body: Result<web::Bytes, actix_web::Error>,
) -> Result<HttpResponse, PlannerError> {
    let schedule = required_field::<ScheduleRequest, _>(&request_body(body)?, |req| req.schedule)
        .ok_or(PlannerError::MissingField("Schedule"))?;

    state.store.write_schedule(&schedule).await?;
    log::info!("Updated weekly schedule");

    Ok(HttpResponse::Ok().json(MessageResponse::new("Schedule updated successfully")))
}

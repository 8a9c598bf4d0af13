use actix_web::{web, HttpResponse};
use planner_types::{MessageResponse, TaskRequest, TaskResponse};

use super::{request_body, required_field};
use crate::error::PlannerError;
use crate::store::{PlanDate, PlanMonth};
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/tasks/month/{year}/{month}").route(web::get().to(get_month_tasks)),
    )
    .service(
        web::resource("/tasks/{date}")
            .route(web::get().to(get_task))
            .route(web::post().to(add_task))
            .route(web::put().to(edit_task)),
    );
}

/// GET /tasks/month/{year}/{month}
async fn get_month_tasks(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, PlannerError> {
    let (year, month) = path.into_inner();
    let month = PlanMonth::parse(&year, &month)?;
    let tasks = state.store.list_month(month).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// GET /tasks/{date}
async fn get_task(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, PlannerError> {
    let date = PlanDate::parse(&path)?;
    let task = state.store.read(date).await?;
    Ok(HttpResponse::Ok().json(TaskResponse { task }))
}

/// POST /tasks/{date} -- create or overwrite
async fn add_task(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: Result<web::Bytes, actix_web::Error>,
) -> Result<HttpResponse, PlannerError> {
    let date = PlanDate::parse(&path)?;
    let task = task_from_body(&request_body(body)?)?;

    state.store.write(date, &task).await?;
    log::info!("Stored plan for {}", date);

    Ok(HttpResponse::Created().json(MessageResponse::new("Task added successfully")))
}

/// PUT /tasks/{date} -- overwrite an existing plan only
async fn edit_task(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: Result<web::Bytes, actix_web::Error>,
) -> Result<HttpResponse, PlannerError> {
    let date = PlanDate::parse(&path)?;
    let task = task_from_body(&request_body(body)?)?;

    if !state.store.exists(date).await? {
        return Err(PlannerError::NotFound(date.to_string()));
    }
    state.store.write(date, &task).await?;
    log::info!("Updated plan for {}", date);

    Ok(HttpResponse::Ok().json(MessageResponse::new("Task updated successfully")))
}

fn task_from_body(body: &[u8]) -> Result<String, PlannerError> {
    required_field::<TaskRequest, _>(body, |req| req.task).ok_or(PlannerError::MissingField("Task"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::testing::app_state;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use planner_types::{ErrorResponse, MonthTasks};
    use serde_json::json;

    #[actix_web::test]
    async fn test_task_lifecycle_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(App::new().app_data(app_state(dir.path())).configure(config)).await;

        let req = test::TestRequest::post()
            .uri("/tasks/2025-01-10")
            .set_json(json!({"task": "Write report"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: MessageResponse = test::read_body_json(resp).await;
        assert_eq!(body.message, "Task added successfully");

        let req = test::TestRequest::get().uri("/tasks/2025-01-10").to_request();
        let body: TaskResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.task, "Write report");

        let req = test::TestRequest::put()
            .uri("/tasks/2025-01-10")
            .set_json(json!({"task": "Write report v2"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/tasks/2025-01-10").to_request();
        let body: TaskResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.task, "Write report v2");

        let req = test::TestRequest::put()
            .uri("/tasks/2025-02-01")
            .set_json(json!({"task": "anything"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "No task found for this date");
        assert!(!dir.path().join("days").join("2025-02-01.txt").exists());
    }

    #[actix_web::test]
    async fn test_get_missing_task_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(App::new().app_data(app_state(dir.path())).configure(config)).await;

        let req = test::TestRequest::get().uri("/tasks/2031-07-04").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: TaskResponse = test::read_body_json(resp).await;
        assert_eq!(body.task, "");
    }

    #[actix_web::test]
    async fn test_post_overwrites_in_full() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(App::new().app_data(app_state(dir.path())).configure(config)).await;

        for task in ["first\nsecond\nthird", "replacement"] {
            let req = test::TestRequest::post()
                .uri("/tasks/2025-01-10")
                .set_json(json!({ "task": task }))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::get().uri("/tasks/2025-01-10").to_request();
        let body: TaskResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.task, "replacement");
    }

    #[actix_web::test]
    async fn test_malformed_dates_rejected_everywhere() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let app = test::init_service(App::new().app_data(app_state(&data_dir)).configure(config)).await;

        for bad in ["2024-13-01", "not-a-date"] {
            let uri = format!("/tasks/{}", bad);
            let requests = vec![
                test::TestRequest::get().uri(&uri).to_request(),
                test::TestRequest::post().uri(&uri).set_json(json!({"task": "x"})).to_request(),
                test::TestRequest::put().uri(&uri).set_json(json!({"task": "x"})).to_request(),
            ];
            for req in requests {
                let resp = test::call_service(&app, req).await;
                assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
                let body: ErrorResponse = test::read_body_json(resp).await;
                assert_eq!(body.error, "Invalid date format. Use YYYY-MM-DD");
            }
        }

        // Rejected before any filesystem access
        assert!(!data_dir.exists());
    }

    #[actix_web::test]
    async fn test_missing_task_field() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(App::new().app_data(app_state(dir.path())).configure(config)).await;

        let bodies: Vec<Vec<u8>> = vec![
            b"{}".to_vec(),
            b"".to_vec(),
            b"not json".to_vec(),
            br#"{"task": 42}"#.to_vec(),
        ];
        for body in bodies {
            let req = test::TestRequest::post()
                .uri("/tasks/2025-01-10")
                .insert_header(("content-type", "application/json"))
                .set_payload(body)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let err: ErrorResponse = test::read_body_json(resp).await;
            assert_eq!(err.error, "Task is required");
        }
        assert!(!dir.path().join("days").join("2025-01-10.txt").exists());
    }

    #[actix_web::test]
    async fn test_put_checks_body_before_existence() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(App::new().app_data(app_state(dir.path())).configure(config)).await;

        let req = test::TestRequest::put()
            .uri("/tasks/2025-02-01")
            .set_json(json!({}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_month_listing() {
        let dir = tempfile::tempdir().unwrap();
        let state = app_state(dir.path());
        for (date, text) in [("2025-01-10", "report"), ("2025-01-20", "exam"), ("2025-02-01", "trip")] {
            state.store.write(PlanDate::parse(date).unwrap(), text).await.unwrap();
        }
        let app = test::init_service(App::new().app_data(state).configure(config)).await;

        let req = test::TestRequest::get().uri("/tasks/month/2025/01").to_request();
        let body: MonthTasks = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.len(), 2);
        assert_eq!(body["2025-01-10"], "report");
        assert_eq!(body["2025-01-20"], "exam");

        let req = test::TestRequest::get().uri("/tasks/month/2026/03").to_request();
        let body: MonthTasks = test::call_and_read_body_json(&app, req).await;
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn test_month_listing_rejects_bad_month() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(App::new().app_data(app_state(dir.path())).configure(config)).await;

        for uri in ["/tasks/month/2025/13", "/tasks/month/abcd/01", "/tasks/month/25/01"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
            let body: ErrorResponse = test::read_body_json(resp).await;
            assert_eq!(body.error, "Invalid date format. Use YYYY-MM");
        }
    }

    #[actix_web::test]
    async fn test_write_failure_is_json_500() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("days").join("2025-01-10.txt")).unwrap();
        let app = test::init_service(App::new().app_data(app_state(dir.path())).configure(config)).await;

        let req = test::TestRequest::post()
            .uri("/tasks/2025-01-10")
            .set_json(json!({"task": "Write report"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(!body.error.is_empty());
        assert_ne!(body.error, "Task is required");
    }

    #[actix_web::test]
    async fn test_empty_task_is_stored() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(App::new().app_data(app_state(dir.path())).configure(config)).await;

        let req = test::TestRequest::post()
            .uri("/tasks/2025-01-10")
            .set_json(json!({"task": ""}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let path = dir.path().join("days").join("2025-01-10.txt");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "");
    }
}

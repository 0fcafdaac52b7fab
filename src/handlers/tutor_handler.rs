use actix_web::{post, web, HttpRequest, HttpResponse};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::dto::{ExplainRequest, SubmitAnswerRequest},
};

fn log_failure(req: &HttpRequest, action: &str, id: &Uuid, err: AppError) -> AppError {
    log::warn!(
        "[{}] {} for session {} failed: {}",
        get_request_id(req).unwrap_or_else(|| "-".to_string()),
        action,
        id,
        err
    );
    err
}

#[post("/api/sessions/{id}/explanation")]
pub async fn request_explanation(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<ExplainRequest>,
) -> Result<HttpResponse, AppError> {
    let explanation = state
        .tutor_service
        .request_explanation(&id, request.into_inner())
        .await
        .map_err(|e| log_failure(&req, "Explanation", &id, e))?;
    Ok(HttpResponse::Ok().json(explanation))
}

#[post("/api/sessions/{id}/quiz")]
pub async fn request_quiz(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .tutor_service
        .request_quiz(&id)
        .await
        .map_err(|e| log_failure(&req, "Quiz", &id, e))?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[post("/api/sessions/{id}/quiz/answer")]
pub async fn submit_answer(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<SubmitAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    let outcome = state
        .tutor_service
        .submit_answer(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::RequestIdMiddleware;
    use actix_web::{http::StatusCode, test, App};

    async fn fail(req: HttpRequest) -> Result<HttpResponse, AppError> {
        let id = Uuid::nil();
        Err(log_failure(
            &req,
            "Quiz",
            &id,
            AppError::Conflict("no explanation yet".to_string()),
        ))
    }

    #[actix_web::test]
    async fn failures_pass_through_unchanged() {
        let app = test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .route("/", web::post().to(fail)),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::post().uri("/").to_request()).await;

        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert!(resp.headers().contains_key("x-request-id"));
    }
}

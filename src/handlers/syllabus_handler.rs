use actix_web::{delete, post, web, HttpResponse};
use uuid::Uuid;

use crate::{app_state::AppState, errors::AppError, models::dto::AddTopicRequest};

#[post("/api/sessions/{id}/syllabus")]
pub async fn add_topic(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<AddTopicRequest>,
) -> Result<HttpResponse, AppError> {
    let syllabus = state
        .session_service
        .add_topic(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(syllabus))
}

#[delete("/api/sessions/{id}/syllabus/{index}")]
pub async fn remove_topic(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, usize)>,
) -> Result<HttpResponse, AppError> {
    let (id, index) = path.into_inner();
    let syllabus = state.session_service.remove_topic(&id, index).await?;
    Ok(HttpResponse::Ok().json(syllabus))
}

#[post("/api/sessions/{id}/syllabus/{index}/toggle")]
pub async fn toggle_topic(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, usize)>,
) -> Result<HttpResponse, AppError> {
    let (id, index) = path.into_inner();
    let syllabus = state.session_service.toggle_topic(&id, index).await?;
    Ok(HttpResponse::Ok().json(syllabus))
}

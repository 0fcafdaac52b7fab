use actix_web::{delete, get, post, put, web, HttpResponse};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{OptionsDto, SetCredentialRequest, UpdateSettingsRequest},
};

#[post("/api/sessions")]
pub async fn create_session(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let session = state.session_service.create_session().await?;
    Ok(HttpResponse::Created().json(session))
}

#[get("/api/sessions/{id}")]
pub async fn get_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session = state.session_service.get_session(&id).await?;
    Ok(HttpResponse::Ok().json(session))
}

#[delete("/api/sessions/{id}")]
pub async fn end_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    state.session_service.end_session(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[put("/api/sessions/{id}/settings")]
pub async fn update_settings(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<UpdateSettingsRequest>,
) -> Result<HttpResponse, AppError> {
    let session = state
        .session_service
        .update_settings(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(session))
}

#[put("/api/sessions/{id}/credential")]
pub async fn set_credential(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<SetCredentialRequest>,
) -> Result<HttpResponse, AppError> {
    let session = state
        .tutor_service
        .set_credential(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(session))
}

#[get("/api/options")]
pub async fn get_options() -> HttpResponse {
    HttpResponse::Ok().json(OptionsDto::default())
}

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "credential_configured": state.config.has_api_key()
    }))
}

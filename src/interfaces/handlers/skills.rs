use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{
        response::ApiResponse,
        skill::{SkillFilter, SkillRequest},
    },
    errors::AppError,
    AppState,
};

#[instrument(skip(state))]
pub async fn list_skills(
    state: web::Data<AppState>,
    query: web::Query<SkillFilter>,
) -> Result<impl Responder, AppError> {
    let skills = state.skill_handler.list_skills(&query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(skills)))
}

#[instrument(skip(state))]
pub async fn list_skills_by_category(
    category: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let skills = state.skill_handler.list_active_in_category(&category).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(skills)))
}

#[instrument(skip(state))]
pub async fn get_skill(
    skill_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let skill = state.skill_handler.get_skill(&skill_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(skill)))
}

#[instrument(skip(state, data))]
pub async fn create_skill(
    state: web::Data<AppState>,
    data: web::Json<SkillRequest>,
) -> Result<impl Responder, AppError> {
    let skill = state.skill_handler.create_skill(data.into_inner()).await?;

    tracing::info!(skill_id = %skill.id, "Skill created");
    Ok(HttpResponse::Created().json(ApiResponse::with_message("Skill created successfully", skill)))
}

#[instrument(skip(state, data))]
pub async fn update_skill(
    skill_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<SkillRequest>,
) -> Result<impl Responder, AppError> {
    let skill = state.skill_handler
        .update_skill(&skill_id, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message("Skill updated successfully", skill)))
}

#[instrument(skip(state))]
pub async fn delete_skill(
    skill_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.skill_handler.delete_skill(&skill_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Skill deleted successfully")))
}

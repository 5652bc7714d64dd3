use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{
        project::{ProjectFilter, ProjectRequest},
        response::ApiResponse,
    },
    errors::AppError,
    AppState,
};

#[instrument(skip(state))]
pub async fn list_projects(
    state: web::Data<AppState>,
    query: web::Query<ProjectFilter>,
) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.list_projects(&query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(projects)))
}

#[instrument(skip(state))]
pub async fn get_project(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.get_project(&project_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(project)))
}

#[instrument(skip(state, data))]
pub async fn create_project(
    state: web::Data<AppState>,
    data: web::Json<ProjectRequest>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler
        .create_project(data.into_inner())
        .await?;

    tracing::info!(project_id = %project.id, "Project created");
    Ok(HttpResponse::Created().json(ApiResponse::with_message("Project created successfully", project)))
}

#[instrument(skip(state, data))]
pub async fn update_project(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<ProjectRequest>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler
        .update_project(&project_id, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message("Project updated successfully", project)))
}

#[instrument(skip(state))]
pub async fn delete_project(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.project_handler.delete_project(&project_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Project deleted successfully")))
}

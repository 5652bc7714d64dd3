use actix_web::{http::header::USER_AGENT, web, HttpRequest, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{
        contact::{ContactOrigin, ContactStatusUpdate, NewContactForm},
        response::ApiResponse,
    },
    errors::AppError,
    utils::get_client_ip::get_client_ip,
    AppState,
};

#[instrument(skip(req, state, form))]
pub async fn submit_contact(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Json<NewContactForm>,
) -> Result<impl Responder, AppError> {
    let origin = ContactOrigin {
        ip_address: Some(get_client_ip(&req, state.config.trust_proxy)),
        user_agent: req
            .headers()
            .get(USER_AGENT)
            .and_then(|ua| ua.to_str().ok())
            .map(str::to_string),
    };

    let receipt = state.contact_handler
        .submit_contact(form.into_inner(), origin)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        "Thank you for your message! I will get back to you soon.",
        receipt,
    )))
}

#[instrument(skip(state))]
pub async fn list_contacts(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let contacts = state.contact_handler.list_contacts().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(contacts)))
}

#[instrument(skip(state))]
pub async fn get_contact(
    contact_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let contact = state.contact_handler.get_contact(&contact_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(contact)))
}

#[instrument(skip(state, data))]
pub async fn update_contact_status(
    contact_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<ContactStatusUpdate>,
) -> Result<impl Responder, AppError> {
    let contact = state.contact_handler
        .update_status(&contact_id, &data)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message("Status updated successfully", contact)))
}

#[instrument(skip(state))]
pub async fn delete_contact(
    contact_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.contact_handler.delete_contact(&contact_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Contact submission deleted successfully")))
}

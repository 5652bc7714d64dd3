use actix_web::{
    dev::ServiceResponse,
    middleware::ErrorHandlerResponse,
    web, HttpResponse, Result,
};

use crate::AppState;

const GENERIC_DETAIL: &str = "Something went wrong";

/// Rewrites every 500 into the uniform failure envelope. The underlying
/// error is always logged; it is echoed to the caller only in development.
pub fn mask_internal_error<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    let expose = res
        .request()
        .app_data::<web::Data<AppState>>()
        .is_some_and(|state| state.config.exposes_error_details());

    let detail = res.response().error().map(|e| e.to_string());

    tracing::error!(
        method = %res.request().method(),
        path = %res.request().path(),
        error = detail.as_deref().unwrap_or("unknown"),
        "Unhandled error while serving request"
    );

    let error = match detail {
        Some(detail) if expose => detail,
        _ => GENERIC_DETAIL.to_string(),
    };

    let response = HttpResponse::InternalServerError().json(serde_json::json!({
        "success": false,
        "message": "Internal server error",
        "error": error
    }));

    let (req, _) = res.into_parts();
    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, response).map_into_right_body(),
    ))
}
